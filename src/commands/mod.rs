use anyhow::Context as AnyhowContext;

use crate::cli::Command;
use crate::storage::SqliteStorage;

impl Command {
    pub fn run(&self, storage: &SqliteStorage) -> anyhow::Result<()> {
        match self {
            Command::Init => {
                storage.init().context("initializing storage")?;
                log::info!("🗄️ Schema ready at {}", storage.path);
            }
            Command::Seed => {
                if storage.seed().context("seeding demo data")? {
                    log::info!("✅ Demo data loaded");
                } else {
                    log::info!("⏭️ Data already present, seed skipped");
                }
            }
        }
        Ok(())
    }
}
