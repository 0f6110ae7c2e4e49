// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Backends that supply bond collections to the catalog. Sources never
//! filter; every backend is queried through the same pipeline.

pub mod http;
pub mod json;
pub mod sample;
pub mod sqlite;

pub use http::HttpSource;
pub use json::JsonFileSource;
pub use sample::SampleSource;
pub use sqlite::SqliteSource;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::config::{Config, SourcePreference};
use crate::models::Bond;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Sqlite,
    Json,
    Http,
    Sample,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Sqlite => "sqlite",
            SourceKind::Json => "json",
            SourceKind::Http => "http",
            SourceKind::Sample => "sample",
        })
    }
}

pub trait BondSource {
    fn kind(&self) -> SourceKind;

    fn fetch_all(&self) -> Result<Vec<Bond>>;

    /// Look a bond up by canonical or native id.
    fn fetch_by_id(&self, id: &str) -> Result<Option<Bond>> {
        Ok(self.fetch_all()?.into_iter().find(|b| b.matches_id(id)))
    }
}

/// Resolve a source. `Auto` prefers SQLite when it holds bonds, then the JSON
/// fallback file when it exists, then the built-in sample set.
pub fn open<'a>(
    config: &Config,
    conn: &'a Connection,
    preference: SourcePreference,
) -> Result<Box<dyn BondSource + 'a>> {
    let source: Box<dyn BondSource + 'a> = match preference {
        SourcePreference::Sqlite => Box::new(SqliteSource::new(conn)),
        SourcePreference::Json => Box::new(JsonFileSource::new(&config.bonds_json)),
        SourcePreference::Sample => Box::new(SampleSource),
        SourcePreference::Http => {
            let base = config
                .api_url
                .as_deref()
                .context("MUDRA_API_URL must be set to use the http source")?;
            Box::new(HttpSource::new(base)?)
        }
        SourcePreference::Auto => {
            let sqlite = SqliteSource::new(conn);
            if sqlite.count()? > 0 {
                Box::new(sqlite)
            } else if config.bonds_json.is_file() {
                Box::new(JsonFileSource::new(&config.bonds_json))
            } else {
                Box::new(SampleSource)
            }
        }
    };
    info!(source = %source.kind(), requested = %preference, "bond source selected");
    Ok(source)
}
