//! Document repository contract and SQLite implementation.
//!
//! Each stored value is one JSON payload row in `documents`, addressed by a
//! fixed key. A write is a single `INSERT .. ON CONFLICT` statement, so a
//! reader sees either the previous payload or the new one.

use crate::db::DbError;
use crate::model::document::FamilyDocument;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row key of the family document.
pub const FAMILY_DATA_KEY: &str = "family-data";
/// Row key of the settings object.
pub const SETTINGS_KEY: &str = "family-settings";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Stored payload is not valid JSON, or a value could not be encoded.
    Serialization {
        key: &'static str,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization { key, source } => {
                write!(f, "invalid JSON payload for `{key}`: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Load/save primitives consumed by the service layer.
pub trait DocumentRepository {
    /// Raw stored family document, `None` when nothing was saved yet.
    fn load_document_raw(&self) -> RepoResult<Option<Value>>;
    /// Overwrites the stored family document.
    fn save_document(&self, document: &FamilyDocument) -> RepoResult<()>;
    /// Raw stored settings object, `None` when nothing was saved yet.
    fn load_settings_raw(&self) -> RepoResult<Option<Value>>;
    /// Overwrites the stored settings.
    fn save_settings(&self, settings: &Value) -> RepoResult<()>;
    /// Removes the stored document and settings.
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_payload(&self, key: &'static str) -> RepoResult<Option<Value>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM documents WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            debug!("event=document_load module=repo status=empty key={key}");
            return Ok(None);
        };

        serde_json::from_str(&payload).map(Some).map_err(|source| {
            error!(
                "event=document_load module=repo status=error key={} bytes={} error_code=invalid_json",
                key,
                payload.len()
            );
            RepoError::Serialization { key, source }
        })
    }

    fn write_payload(&self, key: &'static str, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO documents (key, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        debug!(
            "event=document_save module=repo status=ok key={} bytes={}",
            key,
            payload.len()
        );
        Ok(())
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn load_document_raw(&self) -> RepoResult<Option<Value>> {
        self.read_payload(FAMILY_DATA_KEY)
    }

    fn save_document(&self, document: &FamilyDocument) -> RepoResult<()> {
        let payload = serde_json::to_string(document).map_err(|source| {
            RepoError::Serialization {
                key: FAMILY_DATA_KEY,
                source,
            }
        })?;
        self.write_payload(FAMILY_DATA_KEY, &payload)
    }

    fn load_settings_raw(&self) -> RepoResult<Option<Value>> {
        self.read_payload(SETTINGS_KEY)
    }

    fn save_settings(&self, settings: &Value) -> RepoResult<()> {
        self.write_payload(SETTINGS_KEY, &settings.to_string())
    }

    fn clear(&self) -> RepoResult<()> {
        let removed = self.conn.execute(
            "DELETE FROM documents WHERE key IN (?1, ?2);",
            params![FAMILY_DATA_KEY, SETTINGS_KEY],
        )?;
        debug!("event=document_clear module=repo status=ok removed={removed}");
        Ok(())
    }
}
