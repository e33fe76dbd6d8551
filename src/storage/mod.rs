mod key;

use std::{
    fs::create_dir_all,
    io,
    path::{Path, PathBuf},
};

use include_dir::{Dir, include_dir};
use log::{debug, trace};
use rusqlite::{Connection, OptionalExtension};
use rusqlite_migration::Migrations;
use thiserror::Error;

pub use key::StorageKey;

static MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/migrations");

fn migrations() -> Result<Migrations<'static>, StorageError> {
    Ok(Migrations::from_directory(&MIGRATIONS_DIR)?)
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not prepare storage directory: {0}")]
    Io(#[from] io::Error),
    #[error("storage database failed: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("storage schema could not be migrated: {0}")]
    Migration(#[from] rusqlite_migration::Error),
}

/// Persistent client-side key/value storage holding session context between
/// invocations.
#[derive(Debug)]
pub struct Storage {
    db: Connection,
}

impl Storage {
    pub fn open(state_dir: &Path) -> Result<Self, StorageError> {
        let file = Self::prepare_storage_file(state_dir)?;
        debug!("opening client storage {}", file.display());
        Self::migrated(Connection::open(file)?)
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn prepare_storage_file(state_dir: &Path) -> Result<PathBuf, StorageError> {
        create_dir_all(state_dir)?;
        Ok(state_dir.join("storage.sqlite3"))
    }

    fn migrated(mut db: Connection) -> Result<Self, StorageError> {
        migrations()?.to_latest(&mut db)?;
        Ok(Self { db })
    }

    pub fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .prepare_cached("select value from client_storage where key = ?1")?
            .query_row([key.as_str()], |row| row.get(0))
            .optional()?;
        trace!("read {key}: {value:?}");
        Ok(value)
    }

    pub fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        trace!("write {key}: {value}");
        self.db
            .prepare_cached(
                "insert into client_storage (key, value) values (?1, ?2)
                on conflict (key) do update set value = excluded.value",
            )?
            .execute((key.as_str(), value))?;
        Ok(())
    }
}
