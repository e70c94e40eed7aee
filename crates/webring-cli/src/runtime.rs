// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::sync::mpsc::Sender;
use std::thread;
use webring_app::Catalog;
use webring_fetch::{Client, LoadError};
use webring_store::Store;
use webring_tui::InternalEvent;

pub struct StoreRuntime<'a> {
    store: &'a Store,
    client: Client,
}

impl<'a> StoreRuntime<'a> {
    pub fn new(store: &'a Store, client: Client) -> Self {
        Self { store, client }
    }
}

impl webring_tui::AppRuntime for StoreRuntime<'_> {
    fn load_catalog(&mut self) -> Result<Catalog, LoadError> {
        self.client.load()
    }

    fn spawn_catalog_load(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        let client = self.client.clone();
        thread::Builder::new()
            .name("catalog-load".to_owned())
            .spawn(move || {
                let result = client.load().map_err(|error| error.to_string());
                let _ = tx.send(InternalEvent::CatalogLoaded(result));
            })
            .context("spawn catalog loader thread")?;
        Ok(())
    }

    fn load_sidebar_width(&mut self) -> Result<Option<i64>> {
        self.store.get_sidebar_width()
    }

    fn save_sidebar_width(&mut self, width: i64) -> Result<()> {
        self.store.put_sidebar_width(width)
    }
}
