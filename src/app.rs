use crate::{cli, context, rest, storage::SqliteStorage};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The main application state.
/// decoupled from CLI parsing to allow for easier testing.
pub struct App {
    config: context::Context,
    storage: SqliteStorage,
    shutdown: CancellationToken,
}

impl App {
    /// Builds the App from CLI arguments: log file, data dir and database.
    pub fn from_cli() -> Result<(App, cli::Cli)> {
        let cli = crate::cli::parse();

        crate::tracing::set_log_file(cli.log_file.as_deref().map(Path::new));

        let ctx = context::Context::from_cli(&cli);
        log_startup_info(&ctx);

        let storage = init_storage(&ctx)?;

        Ok((App::new(ctx, storage), cli))
    }

    fn new(config: context::Context, storage: SqliteStorage) -> Self {
        Self {
            config,
            storage,
            shutdown: CancellationToken::new(),
        }
    }

    /// Serves the HTTP API until Ctrl-C or until the server task stops.
    pub async fn run_daemon(&self) -> Result<()> {
        self.log_runtime_config();

        let mut rest_handle = self.spawn_rest_server();

        self.wait_for_shutdown(&mut rest_handle).await
    }

    fn spawn_rest_server(&self) -> JoinHandle<()> {
        let addr = self.config.api_listen;
        let store = self.storage.clone();
        let token = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = rest::serve(addr, store, token).await {
                log::error!("REST server failed: {:#}", e);
            }
        })
    }

    async fn wait_for_shutdown(&self, rest_task: &mut JoinHandle<()>) -> Result<()> {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => log::info!("🧨 Ctrl-C received, shutting down..."),
            _ = &mut *rest_task => log::error!("REST task exited unexpectedly"),
        }

        self.shutdown.cancel();

        // A finished JoinHandle must not be polled again.
        if !rest_task.is_finished() {
            let _ = rest_task.await;
        }

        log::info!("✅ Shutdown complete");
        Ok(())
    }

    fn log_runtime_config(&self) {
        log::info!("🌐 REST API: http://{}", self.config.api_listen);
        if let Some(path) = self.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }
    }
}

fn log_startup_info(ctx: &context::Context) {
    log::info!("🚀 Starting registrar");
    log::info!("📂 Data dir: {}", ctx.data_dir.to_string_lossy());
}

fn init_storage(ctx: &context::Context) -> Result<SqliteStorage> {
    std::fs::create_dir_all(&ctx.data_dir)
        .with_context(|| format!("creating data dir {}", ctx.data_dir.display()))?;

    let sqlite = SqliteStorage::new(ctx.db_path());
    if ctx.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;

    Ok(sqlite)
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    if let Some(cmd) = &cli.cmd {
        return cmd.run(&app.storage);
    }

    app.run_daemon().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Course, storage::CrudRepository};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn context_in(dir: &Path, reset: bool) -> context::Context {
        context::Context {
            data_dir: dir.join("data"),
            api_listen: "127.0.0.1:3000".parse().unwrap(),
            log_file: None,
            reset,
        }
    }

    #[test]
    fn init_storage_creates_data_dir_and_database() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(dir.path(), false);

        let storage = init_storage(&ctx).unwrap();

        assert!(ctx.data_dir.is_dir());
        assert_eq!(PathBuf::from(&storage.path), ctx.db_path());
        assert!(ctx.db_path().exists());
    }

    #[test]
    fn init_storage_keeps_rows_without_reset() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(dir.path(), false);
        init_storage(&ctx)
            .unwrap()
            .save(&Course::new("Course Z"))
            .unwrap();

        let storage = init_storage(&ctx).unwrap();
        let courses: Vec<Course> = storage.find_all().unwrap();
        assert_eq!(courses.len(), 1);
    }

    #[test]
    fn init_storage_with_reset_wipes_rows() {
        let dir = TempDir::new().unwrap();
        init_storage(&context_in(dir.path(), false))
            .unwrap()
            .save(&Course::new("Course Z"))
            .unwrap();

        let storage = init_storage(&context_in(dir.path(), true)).unwrap();
        let courses: Vec<Course> = storage.find_all().unwrap();
        assert!(courses.is_empty());
    }

    #[tokio::test]
    async fn wait_for_shutdown_exits_when_task_finishes() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(dir.path(), false);
        let storage = init_storage(&ctx).unwrap();
        let app = App::new(ctx, storage);

        let mut rest_task = tokio::spawn(async {});

        let res = app.wait_for_shutdown(&mut rest_task).await;
        assert!(res.is_ok());
        assert!(app.shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn spawn_rest_server_starts_and_serves_health_check() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context_in(dir.path(), false);
        let port = 34581;
        ctx.api_listen = format!("127.0.0.1:{}", port).parse().unwrap();
        let storage = init_storage(&ctx).unwrap();
        let app = App::new(ctx, storage);

        let handle = app.spawn_rest_server();

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        assert!(
            !handle.is_finished(),
            "REST server task finished unexpectedly (likely bind failed)"
        );

        let stream = tokio::net::TcpStream::connect(format!("127.0.0.1:{}", port)).await;
        assert!(stream.is_ok(), "Failed to connect to REST server");
        let mut stream = stream.unwrap();

        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).await.unwrap();
        let response = String::from_utf8_lossy(&buffer);

        assert!(response.contains("200 OK"));
        assert!(response.contains("uptime_secs"));

        app.shutdown.cancel();
        let _ = handle.await;
    }
}
