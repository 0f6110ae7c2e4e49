// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow, bail};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::db;

/// Where bond listings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourcePreference {
    /// SQLite when it holds bonds, else the JSON file, else the sample set.
    #[default]
    Auto,
    Sqlite,
    Json,
    Http,
    Sample,
}

impl SourcePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePreference::Auto => "auto",
            SourcePreference::Sqlite => "sqlite",
            SourcePreference::Json => "json",
            SourcePreference::Http => "http",
            SourcePreference::Sample => "sample",
        }
    }
}

impl fmt::Display for SourcePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourcePreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SourcePreference::Auto),
            "sqlite" | "db" => Ok(SourcePreference::Sqlite),
            "json" => Ok(SourcePreference::Json),
            "http" | "api" => Ok(SourcePreference::Http),
            "sample" => Ok(SourcePreference::Sample),
            other => Err(anyhow!(
                "Unknown source '{}' (use auto|sqlite|json|http|sample)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub bonds_json: PathBuf,
    pub api_url: Option<String>,
    pub source: SourcePreference,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = match get("MUDRA_DB") {
            Some(p) => PathBuf::from(p),
            None => db::default_db_path()?,
        };
        let bonds_json = match get("MUDRA_BONDS_JSON") {
            Some(p) => PathBuf::from(p),
            None => db::data_dir()?.join("bonds.json"),
        };
        let api_url = match get("MUDRA_API_URL") {
            Some(url) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    bail!("MUDRA_API_URL must start with http:// or https://");
                }
                Some(url.trim_end_matches('/').to_string())
            }
            None => None,
        };
        let source = match get("MUDRA_SOURCE") {
            Some(s) => s.parse()?,
            None => SourcePreference::Auto,
        };

        Ok(Config {
            db_path,
            bonds_json,
            api_url,
            source,
        })
    }
}
