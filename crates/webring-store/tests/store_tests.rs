// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use webring_app::{MAX_SIDEBAR_WIDTH, ResizeController};
use webring_store::{Store, validate_db_path};

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path(":memory:").is_ok());
    assert!(validate_db_path("/tmp/webring.db").is_ok());
}

#[test]
fn validate_db_path_names_the_scheme_and_the_fix() {
    let error = validate_db_path("sqlite+file://prefs.db").expect_err("scheme should fail");
    let message = error.to_string();
    assert!(message.contains("sqlite+file: URI"), "{message}");
    assert!(message.contains("filesystem path"), "{message}");

    let error = validate_db_path("file:prefs.db").expect_err("file: form should fail");
    assert!(error.to_string().contains("file: URI"));

    let error = validate_db_path("prefs.db?cache=shared").expect_err("query should fail");
    assert!(error.to_string().contains("'?' query part"));

    let error = validate_db_path("   ").expect_err("blank path should fail");
    assert!(error.to_string().contains("WEBRING_DB_PATH"));

    assert!(validate_db_path(r"C:\Users\amy\webring.db").is_ok());
    assert!(validate_db_path("relative/dir/webring.db").is_ok());
}

#[test]
fn fresh_store_has_no_sidebar_width() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    assert_eq!(store.get_sidebar_width()?, None);
    assert_eq!(
        ResizeController::restore(store.get_sidebar_width()?).width(),
        webring_app::DEFAULT_SIDEBAR_WIDTH
    );
    Ok(())
}

#[test]
fn sidebar_width_overwrites_previous_value() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    store.put_sidebar_width(500)?;
    store.put_sidebar_width(640)?;
    assert_eq!(store.get_sidebar_width()?, Some(640));

    let rows: i64 = store
        .raw_connection()
        .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))?;
    assert_eq!(rows, 1);
    Ok(())
}

#[test]
fn sidebar_width_survives_reopen() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("webring.db");

    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        store.put_sidebar_width(420)?;
    }

    let reopened = Store::open(&path)?;
    reopened.bootstrap()?;
    assert_eq!(reopened.get_sidebar_width()?, Some(420));
    Ok(())
}

#[test]
fn out_of_range_persisted_width_is_clamped_on_restore() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.put_sidebar_width(4_000)?;

    let restored = ResizeController::restore(store.get_sidebar_width()?);
    assert_eq!(restored.width(), MAX_SIDEBAR_WIDTH);
    Ok(())
}

#[test]
fn bootstrap_rejects_foreign_database() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE projects (id INTEGER PRIMARY KEY);")?;

    let error = store
        .bootstrap()
        .expect_err("schema validation should fail");
    assert!(
        error
            .to_string()
            .contains("missing required table `settings`")
    );
    Ok(())
}

#[test]
fn bootstrap_rejects_settings_table_missing_columns() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE settings (key TEXT PRIMARY KEY, value TEXT NOT NULL);")?;

    let error = store
        .bootstrap()
        .expect_err("schema validation should fail");
    let message = error.to_string();
    assert!(message.contains("table `settings` is missing required columns"));
    assert!(message.contains("updated_at"));
    Ok(())
}

#[test]
fn bootstrap_is_idempotent() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.put_sidebar_width(300)?;
    store.bootstrap()?;
    assert_eq!(store.get_sidebar_width()?, Some(300));
    Ok(())
}
