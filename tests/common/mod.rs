#![allow(dead_code)]

use std::process::Command as ProcCommand;

use registrar::storage::SqliteStorage;
use tempfile::TempDir;

pub fn base_cmd(data_dir: &TempDir) -> ProcCommand {
    let mut command = ProcCommand::new(env!("CARGO_BIN_EXE_registrar"));
    command
        .env("DOTENV_PATH", data_dir.path().join("missing.env"))
        .env("RUST_LOG", "info")
        .arg("--data-dir")
        .arg(data_dir.path().join("data"));
    command
}

pub fn storage_in(data_dir: &TempDir) -> SqliteStorage {
    SqliteStorage::new(data_dir.path().join("data").join("registrar.sqlite"))
}

pub fn seeded_storage(data_dir: &TempDir) -> SqliteStorage {
    std::fs::create_dir_all(data_dir.path().join("data")).expect("create data dir");
    let storage = storage_in(data_dir);
    storage.init().expect("init storage");
    storage.seed().expect("seed storage");
    storage
}
