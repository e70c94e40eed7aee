// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const APP_NAME: &str = "webring";
pub const SIDEBAR_WIDTH_KEY: &str = "sidebarWidth";

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS settings (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL,
  updated_at TEXT NOT NULL
);
";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[("settings", &["key", "value", "updated_at"])];

/// Preference store backed by a small SQLite file.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open preference database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if is_fresh_database(&self.conn)? {
            self.conn
                .execute_batch(SCHEMA_SQL)
                .context("create preference schema")?;
        } else {
            validate_schema(&self.conn)?;
        }
        Ok(())
    }

    /// The persisted sidebar width, if one was ever saved. The caller clamps
    /// it into range.
    pub fn get_sidebar_width(&self) -> Result<Option<i64>> {
        let Some(raw) = self.get_setting_raw(SIDEBAR_WIDTH_KEY)? else {
            return Ok(None);
        };
        let width = raw.trim().parse::<i64>().map_err(|_| {
            anyhow!(
                "setting `{SIDEBAR_WIDTH_KEY}` has invalid value `{raw}`; drag the divider to save a new width or delete the preference database"
            )
        })?;
        tracing::debug!(width, "loaded sidebar width");
        Ok(Some(width))
    }

    pub fn put_sidebar_width(&self, width: i64) -> Result<()> {
        self.put_setting_raw(SIDEBAR_WIDTH_KEY, &width.to_string())?;
        tracing::debug!(width, "saved sidebar width");
        Ok(())
    }

    fn get_setting_raw(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("read setting {key}"))
    }

    fn put_setting_raw(&self, key: &str, value: &str) -> Result<()> {
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO settings (key, value, updated_at)
                VALUES (?, ?, ?)
                ON CONFLICT(key) DO UPDATE SET
                  value = excluded.value,
                  updated_at = excluded.updated_at
                ",
                params![key, value, now],
            )
            .with_context(|| format!("upsert setting {key}"))?;
        Ok(())
    }
}

/// Per-user data directory, created on demand. Holds the preference
/// database and the log file.
pub fn data_dir() -> Result<PathBuf> {
    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set WEBRING_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir)
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("WEBRING_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }
    Ok(data_dir()?.join("webring.db"))
}

/// Rejects preference paths SQLite would read as a URI. Only plain
/// filesystem paths and `:memory:` are accepted.
pub fn validate_db_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        bail!("preference database path is empty; set [storage].db_path or WEBRING_DB_PATH");
    }
    if path == ":memory:" {
        return Ok(());
    }
    if let Some(scheme) = uri_scheme(path) {
        bail!(
            "preference database path {path:?} is a {scheme}: URI; webring stores preferences in a local file, so give a filesystem path"
        );
    }
    if path.contains('?') {
        bail!(
            "preference database path {path:?} has a '?' query part; drop it and give a filesystem path"
        );
    }
    Ok(())
}

/// `scheme://...` or any `file:` form. Single letters are drive letters.
fn uri_scheme(path: &str) -> Option<&str> {
    if path.starts_with("file:") {
        return Some("file");
    }
    let (scheme, _) = path.split_once("://")?;
    let is_scheme = scheme.len() > 1
        && scheme
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'));
    is_scheme.then_some(scheme)
}

fn is_fresh_database(conn: &Connection) -> Result<bool> {
    let has_tables: bool = conn
        .query_row(
            "SELECT EXISTS (
               SELECT 1 FROM sqlite_schema
               WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             )",
            [],
            |row| row.get(0),
        )
        .context("inspect preference database tables")?;
    Ok(!has_tables)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        let columns = table_columns(conn, table)?;
        if columns.is_empty() {
            bail!(
                "database is missing required table `{table}`; point WEBRING_DB_PATH at a webring preference database"
            );
        }

        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();
        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; delete the preference database to recreate it",
                missing.join(", ")
            );
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("prepare column query for {table}"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query columns for {table}"))?
        .collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))?;
    Ok(names)
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}

#[cfg(test)]
mod tests {
    use super::{SIDEBAR_WIDTH_KEY, Store};
    use anyhow::Result;

    #[test]
    fn invalid_width_setting_is_actionable() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;

        store.put_setting_raw(SIDEBAR_WIDTH_KEY, "wide")?;
        let error = store
            .get_sidebar_width()
            .expect_err("non-numeric width should be rejected");
        assert!(error.to_string().contains("drag the divider"));
        Ok(())
    }

    #[test]
    fn width_is_stored_as_decimal_string() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;

        store.put_sidebar_width(500)?;
        assert_eq!(
            store.get_setting_raw(SIDEBAR_WIDTH_KEY)?.as_deref(),
            Some("500")
        );
        Ok(())
    }
}
