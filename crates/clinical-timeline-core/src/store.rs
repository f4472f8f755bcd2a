//! Storage seams and the SQLite-backed vault.
//!
//! The engine only ever sees two small traits: [`TimelineStore`] for the
//! whole-document timeline, [`FileStore`] for uploaded exam files.
//! [`SqliteVault`] implements both over the local database.

use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{Database, DbError, StoredFile};
use crate::models::EventItem;

/// Well-known key of the timeline document.
pub const EVENTS_KEY: &str = "data/events.json";

/// URL scheme for files stored in the vault.
pub const VAULT_SCHEME: &str = "vault://";

/// Key prefix for uploaded exam files.
const UPLOAD_PREFIX: &str = "exames";

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Db(#[from] DbError),

    #[error("timeline document is not valid JSON: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    #[error("no file stored at {0}")]
    UnknownUrl(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Whole-document persistence of the event timeline.
pub trait TimelineStore {
    /// Load the stored timeline; `None` if no document exists yet.
    fn load(&self) -> StoreResult<Option<Vec<EventItem>>>;

    /// Persist the full timeline, replacing any prior content.
    fn save(&mut self, timeline: &[EventItem]) -> StoreResult<()>;
}

/// Blob storage for uploaded exam files.
pub trait FileStore {
    /// Store raw bytes under a fresh key; returns a dereferenceable URL.
    fn upload(&mut self, name: &str, bytes: &[u8]) -> StoreResult<String>;

    /// Read back the bytes behind a URL returned by [`FileStore::upload`].
    fn fetch(&self, url: &str) -> StoreResult<Vec<u8>>;
}

/// SQLite-backed document and file store.
pub struct SqliteVault {
    db: Database,
}

impl SqliteVault {
    /// Open the vault at a path, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    /// Create an in-memory vault (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    /// Get the underlying database (for advanced queries).
    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl TimelineStore for SqliteVault {
    fn load(&self) -> StoreResult<Option<Vec<EventItem>>> {
        match self.db.get_document(EVENTS_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, timeline: &[EventItem]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(timeline)?;
        self.db.put_document(EVENTS_KEY, &json)?;
        Ok(())
    }
}

impl FileStore for SqliteVault {
    fn upload(&mut self, name: &str, bytes: &[u8]) -> StoreResult<String> {
        let key = format!("{}/{}-{}", UPLOAD_PREFIX, Uuid::new_v4(), name);
        let file = StoredFile {
            key: key.clone(),
            name: name.to_string(),
            sha256: hex::encode(Sha256::digest(bytes)),
            content: bytes.to_vec(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.db.insert_file(&file)?;
        Ok(format!("{}{}", VAULT_SCHEME, key))
    }

    fn fetch(&self, url: &str) -> StoreResult<Vec<u8>> {
        let key = url
            .strip_prefix(VAULT_SCHEME)
            .ok_or_else(|| StoreError::UnknownUrl(url.to_string()))?;
        match self.db.get_file(key)? {
            Some(file) => Ok(file.content),
            None => Err(StoreError::UnknownUrl(url.to_string())),
        }
    }
}
