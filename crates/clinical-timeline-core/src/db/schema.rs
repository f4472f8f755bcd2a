//! SQLite schema definition.

/// Complete database schema for the vault.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Documents (whole-document JSON payloads at well-known keys)
-- ============================================================================

CREATE TABLE IF NOT EXISTS documents (
    key TEXT PRIMARY KEY,
    content TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- ============================================================================
-- Uploaded files
-- ============================================================================

CREATE TABLE IF NOT EXISTS files (
    key TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    sha256 TEXT NOT NULL,
    content BLOB NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_files_sha256 ON files(sha256);
"#;
