//! Persistent, path-keyed sample catalog backed by SQLite.
//!
//! Open it once with [`Catalog::open`] and hand it to whoever needs it; there
//! is no global handle.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use thiserror::Error;

use crate::library::{Category, Sample};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("cannot create catalog directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A grouping label and how many samples carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibrarySummary {
    pub library: String,
    pub samples: u64,
}

pub struct Catalog {
    conn: Mutex<Connection>,
}

const SAMPLE_COLUMNS: &str =
    r#"path, name, size, date, library, category, bpm, "key", duration"#;

impl Catalog {
    /// Open the catalog at `path`, creating the file and its directory if needed.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| CatalogError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let catalog = Self::from_connection(Connection::open(path)?)?;
        log::debug!("opened catalog at {}", path.display());
        Ok(catalog)
    }

    pub fn open_in_memory() -> Result<Self, CatalogError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, CatalogError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS samples (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                size INTEGER NOT NULL,
                date INTEGER NOT NULL,
                library TEXT NOT NULL,
                category TEXT NOT NULL,
                bpm INTEGER,
                "key" TEXT,
                duration REAL NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_samples_date ON samples(date);
            CREATE INDEX IF NOT EXISTS idx_samples_library ON samples(library);
        "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert each sample, or overwrite every field of the row with the same path.
    ///
    /// Records are written one statement at a time; a failure part-way leaves
    /// the earlier records persisted.
    pub fn upsert_batch(&self, samples: &[Sample]) -> Result<usize, CatalogError> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(&format!(
            r#"INSERT INTO samples ({SAMPLE_COLUMNS})
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
               ON CONFLICT(path) DO UPDATE SET
                   name = excluded.name,
                   size = excluded.size,
                   date = excluded.date,
                   library = excluded.library,
                   category = excluded.category,
                   bpm = excluded.bpm,
                   "key" = excluded."key",
                   duration = excluded.duration"#
        ))?;

        for sample in samples {
            stmt.execute(params![
                sample.path.to_string_lossy(),
                sample.name,
                sample.size as i64,
                sample.date.timestamp_millis(),
                sample.library,
                sample.category,
                sample.bpm,
                sample.key,
                sample.duration,
            ])?;
        }
        log::debug!("upserted {} samples", samples.len());
        Ok(samples.len())
    }

    /// Every sample, most recently modified file first.
    pub fn list_all(&self) -> Result<Vec<Sample>, CatalogError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SAMPLE_COLUMNS} FROM samples ORDER BY date DESC, id ASC"
        ))?;
        let rows = stmt.query_map([], sample_from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub fn get(&self, path: &Path) -> Result<Option<Sample>, CatalogError> {
        let conn = self.conn();
        let sample = conn
            .query_row(
                &format!("SELECT {SAMPLE_COLUMNS} FROM samples WHERE path = ?1"),
                [path.to_string_lossy()],
                sample_from_row,
            )
            .optional()?;
        Ok(sample)
    }

    pub fn count(&self) -> Result<u64, CatalogError> {
        let n: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM samples", [], |row| row.get(0))?;
        Ok(n as u64)
    }

    pub fn libraries(&self) -> Result<Vec<LibrarySummary>, CatalogError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT library, COUNT(*) FROM samples GROUP BY library ORDER BY library",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LibrarySummary {
                library: row.get(0)?,
                samples: row.get::<_, i64>(1)? as u64,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Remove every sample. Returns how many were removed.
    pub fn clear_all(&self) -> Result<usize, CatalogError> {
        let removed = self.conn().execute("DELETE FROM samples", [])?;
        log::info!("cleared {removed} samples from catalog");
        Ok(removed)
    }
}

fn sample_from_row(row: &Row<'_>) -> rusqlite::Result<Sample> {
    let path: String = row.get(0)?;
    let millis: i64 = row.get(3)?;
    let date = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Integer,
            format!("timestamp out of range: {millis}").into(),
        )
    })?;

    Ok(Sample {
        path: PathBuf::from(path),
        name: row.get(1)?,
        size: row.get::<_, i64>(2)? as u64,
        date,
        library: row.get(4)?,
        category: row.get(5)?,
        bpm: row.get(6)?,
        key: row.get(7)?,
        duration: row.get(8)?,
    })
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
