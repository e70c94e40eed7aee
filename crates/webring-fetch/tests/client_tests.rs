// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use std::fs;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Response, Server};
use webring_fetch::{Client, LoadError};
use webring_testkit::{catalog_json, sample_catalog, temp_catalog_dir};

fn json_header() -> Header {
    Header::from_bytes("Content-Type", "application/json").expect("valid content type header")
}

#[test]
fn remote_catalog_loads_from_base_url() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let base = format!("http://{}/ring", server.server_addr());
    let body = catalog_json(&sample_catalog())?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/ring/webring.json");
        let response = Response::from_string(body)
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&base, Duration::from_secs(1))?;
    assert!(client.is_remote());
    let catalog = client.load()?;
    assert_eq!(catalog, sample_catalog());

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn non_success_status_is_reported_with_code() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let base = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string("no such ring").with_status_code(404);
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&base, Duration::from_secs(1))?;
    let error = client.load().expect_err("404 should fail");
    assert!(matches!(error, LoadError::Status { status: 404, .. }));
    let message = error.to_string();
    assert!(message.contains("404"));
    assert!(message.contains("no such ring"));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn malformed_body_is_a_decode_error() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let base = format!("http://{}/", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string(r#"{"members": []}"#)
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&base, Duration::from_secs(1))?;
    let error = client.load().expect_err("missing sites should fail");
    assert!(matches!(error, LoadError::Decode { .. }));
    assert!(error.to_string().contains("sites"));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn unreachable_base_error_is_actionable() {
    let client = Client::new("http://127.0.0.1:1", Duration::from_millis(50))
        .expect("client should initialize");

    let error = client
        .load()
        .expect_err("load should fail for unreachable endpoint");
    assert!(matches!(error, LoadError::Request { .. }));
    assert!(error.to_string().contains("check the base path"));
}

#[test]
fn local_directory_base_reads_catalog() -> Result<()> {
    let dir = temp_catalog_dir(&sample_catalog())?;
    let base = dir.path().to_string_lossy().to_string();

    let client = Client::new(&base, Duration::from_secs(1))?;
    assert!(!client.is_remote());
    assert_eq!(client.load()?, sample_catalog());
    Ok(())
}

#[test]
fn missing_local_catalog_is_a_read_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let client = Client::new(&dir.path().to_string_lossy(), Duration::from_secs(1))?;

    let error = client.load().expect_err("missing file should fail");
    assert!(matches!(error, LoadError::Read { .. }));
    assert!(error.to_string().contains("webring.json"));
    Ok(())
}

#[test]
fn empty_sites_list_is_a_valid_catalog() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("webring.json"), r#"{"sites": []}"#)?;

    let client = Client::new(&dir.path().to_string_lossy(), Duration::from_secs(1))?;
    assert!(client.load()?.is_empty());
    Ok(())
}
