// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

pub const DEFAULT_SIDEBAR_WIDTH: i64 = 800;
pub const MIN_SIDEBAR_WIDTH: i64 = 250;
pub const MAX_SIDEBAR_WIDTH: i64 = 800;

/// File name of the catalog document, relative to the configured base path.
pub const CATALOG_FILE_NAME: &str = "webring.json";

/// One member site. `name` is the identity key used for hover tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub website: String,
    pub year: i32,
    pub program: String,
}

/// The loaded member list. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub sites: Vec<Entry>,
}

impl Catalog {
    pub fn new(sites: Vec<Entry>) -> Self {
        Self { sites }
    }

    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.sites
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// The whole faculty; applies no program filter.
    #[default]
    All,
    Comp,
    Coen,
    Soen,
    Mech,
    Elec,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Comp,
        Self::Coen,
        Self::Soen,
        Self::Mech,
        Self::Elec,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "GCS",
            Self::Comp => "COMP",
            Self::Coen => "COEN",
            Self::Soen => "SOEN",
            Self::Mech => "MECH",
            Self::Elec => "ELEC",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "GCS" => Some(Self::All),
            "COMP" => Some(Self::Comp),
            "COEN" => Some(Self::Coen),
            "SOEN" => Some(Self::Soen),
            "MECH" => Some(Self::Mech),
            "ELEC" => Some(Self::Elec),
            _ => None,
        }
    }

    pub const fn is_all(self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether `program` belongs to this tab. The "all" tab matches nothing
    /// by program; callers skip filtering for it instead.
    pub fn matches_program(self, program: &str) -> bool {
        !self.is_all() && program == self.as_str()
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|category| *category == self)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    Name,
    Program,
    Year,
}

impl SortKey {
    pub const ALL: [Self; 3] = [Self::Name, Self::Program, Self::Year];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Program => "Program",
            Self::Year => "Year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn marker(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Search,
}
