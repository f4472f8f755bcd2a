//! Document database operations.

use rusqlite::OptionalExtension;

use super::{Database, DbResult};

impl Database {
    /// Insert or replace the document at a key.
    pub fn put_document(&self, key: &str, content: &str) -> DbResult<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            r#"
            INSERT INTO documents (key, content, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                content = excluded.content,
                updated_at = excluded.updated_at
            "#,
            rusqlite::params![key, content, now],
        )?;
        Ok(())
    }

    /// Get the document at a key.
    pub fn get_document(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT content FROM documents WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }
}
