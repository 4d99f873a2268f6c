use std::net::SocketAddr;
use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "registrar.sqlite";

#[derive(Clone, Debug)]
pub struct Context {
    pub data_dir: PathBuf,
    pub api_listen: SocketAddr,
    pub log_file: Option<PathBuf>,
    pub reset: bool,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            data_dir: PathBuf::from(&cli.data_dir),
            api_listen: cli.api_listen,
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            reset: cli.reset,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}
