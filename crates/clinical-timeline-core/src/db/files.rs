//! Uploaded-file database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};

/// A stored upload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    /// Vault key (e.g. `exames/<uuid>-<name>`)
    pub key: String,
    /// Original file name
    pub name: String,
    /// Hex-encoded SHA-256 of the content
    pub sha256: String,
    /// Raw bytes
    pub content: Vec<u8>,
    /// Upload timestamp (RFC 3339)
    pub created_at: String,
}

impl Database {
    /// Insert an uploaded file.
    pub fn insert_file(&self, file: &StoredFile) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO files (key, name, sha256, content, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                file.key,
                file.name,
                file.sha256,
                file.content,
                file.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get an uploaded file by key.
    pub fn get_file(&self, key: &str) -> DbResult<Option<StoredFile>> {
        self.conn
            .query_row(
                r#"
                SELECT key, name, sha256, content, created_at
                FROM files
                WHERE key = ?
                "#,
                [key],
                |row| {
                    Ok(StoredFile {
                        key: row.get(0)?,
                        name: row.get(1)?,
                        sha256: row.get(2)?,
                        content: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }
}
