// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use reqwest::blocking::Client as HttpClient;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;
use webring_app::{CATALOG_FILE_NAME, Catalog};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const SNIPPET_LIMIT: usize = 100;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid base path {base:?}: {reason}")]
    InvalidBase { base: String, reason: String },
    #[error("cannot reach {location} -- check the base path and network connection ({source})")]
    Request {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to fetch webring data: server returned {status} for {location}{detail}")]
    Status {
        location: String,
        status: u16,
        detail: String,
    },
    #[error("read {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "decode {location}: expected {{\"sites\": [...]}} with name, website, year, and program ({source})"
    )]
    Decode {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Remote(Url),
    Local(PathBuf),
}

/// Resolves the catalog document from an HTTP(S) base URL or a local
/// directory.
#[derive(Debug, Clone)]
pub struct Client {
    source: Source,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_path: &str, timeout: Duration) -> Result<Self, LoadError> {
        let source = resolve_source(base_path)?;
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| LoadError::Request {
                location: base_path.to_owned(),
                source,
            })?;

        Ok(Self {
            source,
            timeout,
            http,
        })
    }

    /// Where the catalog document is read from, for logs and diagnostics.
    pub fn location(&self) -> String {
        match &self.source {
            Source::Remote(url) => url.to_string(),
            Source::Local(path) => path.display().to_string(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.source, Source::Remote(_))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn load(&self) -> Result<Catalog, LoadError> {
        let location = self.location();
        tracing::info!(%location, "loading webring catalog");

        let result = match &self.source {
            Source::Remote(url) => self.fetch_remote(url),
            Source::Local(path) => read_local(path),
        }
        .and_then(|raw| {
            Catalog::parse(&raw).map_err(|source| LoadError::Decode {
                location: location.clone(),
                source,
            })
        });

        match &result {
            Ok(catalog) => tracing::info!(%location, sites = catalog.len(), "catalog loaded"),
            Err(error) => tracing::warn!(%location, %error, "catalog load failed"),
        }
        result
    }

    fn fetch_remote(&self, url: &Url) -> Result<String, LoadError> {
        let location = url.to_string();
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|source| LoadError::Request {
                location: location.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LoadError::Status {
                location,
                status: status.as_u16(),
                detail: status_detail(&body),
            });
        }

        response.text().map_err(|source| LoadError::Request {
            location: location.clone(),
            source,
        })
    }
}

fn read_local(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        location: path.display().to_string(),
        source,
    })
}

fn status_detail(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.len() >= SNIPPET_LIMIT || trimmed.contains('<') {
        return String::new();
    }
    format!(": {trimmed}")
}

fn resolve_source(base_path: &str) -> Result<Source, LoadError> {
    let base = base_path.trim();
    if base.is_empty() {
        return Ok(Source::Local(PathBuf::from(CATALOG_FILE_NAME)));
    }

    let invalid = |reason: String| LoadError::InvalidBase {
        base: base.to_owned(),
        reason,
    };

    match Url::parse(base) {
        // Single-letter schemes are Windows drive letters, not URLs.
        Ok(url) if url.scheme().len() > 1 => match url.scheme() {
            "http" | "https" => {
                let mut url = url;
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                let document = url
                    .join(CATALOG_FILE_NAME)
                    .map_err(|error| invalid(error.to_string()))?;
                Ok(Source::Remote(document))
            }
            "file" => {
                let dir = url
                    .to_file_path()
                    .map_err(|()| invalid("file URL does not name a local path".to_owned()))?;
                Ok(Source::Local(dir.join(CATALOG_FILE_NAME)))
            }
            scheme => Err(invalid(format!(
                "unsupported scheme {scheme:?}; use http://, https://, or a directory path"
            ))),
        },
        _ => Ok(Source::Local(Path::new(base).join(CATALOG_FILE_NAME))),
    }
}

#[cfg(test)]
mod tests {
    use super::{Source, resolve_source, status_detail};
    use std::path::PathBuf;

    #[test]
    fn empty_base_reads_from_current_directory() {
        assert_eq!(
            resolve_source("  ").expect("empty base should resolve"),
            Source::Local(PathBuf::from("webring.json"))
        );
    }

    #[test]
    fn http_base_gets_document_appended() {
        let Source::Remote(url) = resolve_source("https://ring.example/sub").expect("valid url")
        else {
            panic!("expected remote source");
        };
        assert_eq!(url.as_str(), "https://ring.example/sub/webring.json");

        let Source::Remote(url) = resolve_source("http://127.0.0.1:8080/").expect("valid url")
        else {
            panic!("expected remote source");
        };
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/webring.json");
    }

    #[test]
    fn directory_base_is_local() {
        assert_eq!(
            resolve_source("public").expect("relative dir should resolve"),
            Source::Local(PathBuf::from("public").join("webring.json"))
        );
    }

    #[test]
    fn unsupported_scheme_is_rejected() {
        let error = resolve_source("ftp://ring.example").expect_err("ftp should fail");
        assert!(error.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn status_detail_keeps_short_plain_bodies_only() {
        assert_eq!(status_detail("not here"), ": not here");
        assert_eq!(status_detail("<html>404</html>"), "");
        assert_eq!(status_detail(""), "");
    }
}
