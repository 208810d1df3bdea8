//! Static content loaded once at startup: route fixtures and the annotation
//! catalog.
//!
//! # Design
//! Both tables are plain JSON arrays. The built-in documents are embedded
//! with `include_str!`; configuration may point at replacement files. After
//! loading, neither table is ever mutated.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ConfigError;
use crate::http::HttpMethod;
use crate::types::{DocEntry, RouteFixture};

const BUILTIN_ROUTES: &str = include_str!("../fixtures/routes.json");
const BUILTIN_DOCS: &str = include_str!("../fixtures/annotations.json");

/// Read-only table of canned request/response pairs.
#[derive(Debug, Clone, Default)]
pub struct FixtureTable {
    entries: Vec<RouteFixture>,
}

impl FixtureTable {
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_ROUTES)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            entries: parse_array(raw, "route fixtures")?,
        })
    }

    /// Load from `path`, or fall back to the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_json(&read_data_file(path)?),
            None => Self::builtin(),
        }
    }

    pub fn entries(&self) -> &[RouteFixture] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive match on method and path.
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&RouteFixture> {
        self.entries
            .iter()
            .find(|f| f.method == method && f.path == path)
    }
}

/// Annotation descriptions rendered by the docs section.
#[derive(Debug, Clone, Default)]
pub struct DocsCatalog {
    entries: Vec<DocEntry>,
}

impl DocsCatalog {
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_DOCS)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            entries: parse_array(raw, "annotation catalog")?,
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_json(&read_data_file(path)?),
            None => Self::builtin(),
        }
    }

    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_array<T: DeserializeOwned>(raw: &str, what: &'static str) -> Result<Vec<T>, ConfigError> {
    let entries: Vec<T> =
        serde_json::from_str(raw).map_err(|source| ConfigError::Data { what, source })?;
    debug!("Loaded {} entries into {what}", entries.len());
    Ok(entries)
}

fn read_data_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}
