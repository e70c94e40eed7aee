// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use webring_app::{CATALOG_FILE_NAME, Catalog, Category, Entry};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const DOMAINS: [&str; 8] = [".dev", ".ca", ".io", ".com", ".net", ".xyz", ".me", ".org"];

const FIRST_YEAR: i32 = 2016;
const YEAR_SPAN: usize = 10;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for member catalogs. The same seed always yields the
/// same sites, and names are unique within one faker.
#[derive(Debug, Clone)]
pub struct RingFaker {
    rng: DeterministicRng,
    issued: usize,
}

impl RingFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            issued: 0,
        }
    }

    pub fn entry(&mut self) -> Entry {
        let programs = program_codes();
        let program = programs[self.rng.int_n(programs.len())];
        self.entry_in(program)
    }

    pub fn entry_in(&mut self, program: &str) -> Entry {
        let first = FIRST_NAMES[self.rng.int_n(FIRST_NAMES.len())];
        let last = LAST_NAMES[self.rng.int_n(LAST_NAMES.len())];
        let domain = DOMAINS[self.rng.int_n(DOMAINS.len())];
        let year = FIRST_YEAR + self.rng.int_n(YEAR_SPAN) as i32;

        // Suffix keeps names unique so hover identity stays unambiguous.
        self.issued += 1;
        let name = format!("{first} {last} {}", self.issued);
        let website = format!(
            "https://{}{}{}",
            first.to_lowercase(),
            last.to_lowercase(),
            domain
        );

        Entry {
            name,
            website,
            year,
            program: program.to_owned(),
        }
    }

    pub fn catalog(&mut self, count: usize) -> Catalog {
        Catalog::new((0..count).map(|_| self.entry()).collect())
    }
}

pub fn entry(name: &str, program: &str, year: i32, website: &str) -> Entry {
    Entry {
        name: name.to_owned(),
        website: website.to_owned(),
        year,
        program: program.to_owned(),
    }
}

/// A small hand-written catalog with ties on year and program and one empty
/// category (ELEC).
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        entry("Bob", "COMP", 2023, "https://bob.com"),
        entry("Amy", "COEN", 2022, "https://amy.ca"),
        entry("carol", "SOEN", 2021, "https://carol.dev"),
        entry("Dan", "COMP", 2024, "https://dan.io"),
        entry("Bea", "MECH", 2022, "https://bea.net"),
        entry("Eli", "COMP", 2022, "https://eli.xyz"),
    ])
}

pub fn catalog_json(catalog: &Catalog) -> Result<String> {
    serde_json::to_string_pretty(catalog).context("encode catalog fixture")
}

/// Writes `catalog` as the catalog document inside `dir` and returns the
/// document path.
pub fn write_catalog(dir: &Path, catalog: &Catalog) -> Result<PathBuf> {
    let path = dir.join(CATALOG_FILE_NAME);
    fs::write(&path, catalog_json(catalog)?)
        .with_context(|| format!("write catalog fixture {}", path.display()))?;
    Ok(path)
}

/// A temp directory usable as a base path, holding `catalog`.
pub fn temp_catalog_dir(catalog: &Catalog) -> Result<tempfile::TempDir> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    write_catalog(dir.path(), catalog)?;
    Ok(dir)
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("webring.db");
    Ok((dir, db_path))
}

fn program_codes() -> Vec<&'static str> {
    Category::ALL
        .into_iter()
        .filter(|category| !category.is_all())
        .map(Category::as_str)
        .collect()
}
