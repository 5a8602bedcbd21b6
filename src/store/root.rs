use std::path::{Path, PathBuf};

use super::Store;

use crate::errors::KnmiDataErr;

impl Store {
    /// Name of the sqlite database file in the root of a store.
    pub const DB_FILE: &'static str = "knmi.db";
    const DATA_DIR: &'static str = "data";

    /// Initialize a new store.
    pub fn create(root: &dyn AsRef<Path>) -> Result<Self, KnmiDataErr> {
        let data_root = root.as_ref().join(Store::DATA_DIR);
        let db_file = root.as_ref().join(Store::DB_FILE);
        let root = root.as_ref().to_path_buf();

        std::fs::create_dir_all(&data_root)?; // The folder for downloads and exports.

        // Create and set up the store
        let db_conn = rusqlite::Connection::open_with_flags(
            db_file,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE | rusqlite::OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        Self::enable_foreign_keys(&db_conn)?;

        db_conn.execute_batch(include_str!("root/create_index.sql"))?;
        log::debug!("created store in {}", root.display());

        Ok(Store { root, db_conn })
    }

    /// Open an existing store.
    pub fn connect(root: &dyn AsRef<Path>) -> Result<Self, KnmiDataErr> {
        let db_file = root.as_ref().join(Store::DB_FILE);
        let root = root.as_ref().to_path_buf();

        let db_conn = rusqlite::Connection::open_with_flags(
            db_file,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE,
        )?;
        Self::enable_foreign_keys(&db_conn)?;

        Self::validate_db_structure(&db_conn)?;

        Ok(Store { root, db_conn })
    }

    /// Retrieve a path to the root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the directory downloads and exports are kept in.
    pub fn data_root(&self) -> PathBuf {
        self.root.join(Store::DATA_DIR)
    }

    // Cascading deletes from stations to measurements depend on this, sqlite defaults to off.
    fn enable_foreign_keys(db_conn: &rusqlite::Connection) -> Result<(), KnmiDataErr> {
        db_conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }

    /// Validate the database structure is correct.
    fn validate_db_structure(db_conn: &rusqlite::Connection) -> Result<(), KnmiDataErr> {
        // Check the number of tables
        let num_tables: i64 = db_conn.query_row(
            "SELECT COUNT(name) FROM sqlite_master WHERE type='table'",
            [],
            |row| row.get(0),
        )?;

        if num_tables != 2 {
            return Err(KnmiDataErr::InvalidSchema);
        }

        // Check the table names.
        let mut stmt =
            db_conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;

        let iter = stmt.query_map([], |row: &rusqlite::Row| {
            let name: String = row.get(0)?;
            Ok(name == "stations" || name == "measurements")
        })?;

        for valid in iter {
            match valid {
                Ok(true) => {}
                Ok(false) => return Err(KnmiDataErr::InvalidSchema),
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}
