// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{BondSource, SourceKind};
use crate::models::{Bond, BondDocument};

/// Bonds read from a JSON document on disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl BondSource for JsonFileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Json
    }

    fn fetch_all(&self) -> Result<Vec<Bond>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Read bonds from {}", self.path.display()))?;
        let bonds = parse_bonds(&text)
            .with_context(|| format!("Parse bonds in {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = bonds.len(), "loaded bond file");
        Ok(bonds)
    }
}

/// Accepts a bare array of bond documents or an object wrapping one under
/// `data` (the REST listing shape).
pub fn parse_documents(text: &str) -> Result<Vec<BondDocument>> {
    let value: Value = serde_json::from_str(text).context("Invalid JSON")?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(items)) => items,
            _ => bail!("Expected an array of bonds or an object with a 'data' array"),
        },
        _ => bail!("Expected an array of bonds or an object with a 'data' array"),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<BondDocument>(item)
                .with_context(|| format!("Bond #{} is malformed", i + 1))
        })
        .collect()
}

pub fn parse_bonds(text: &str) -> Result<Vec<Bond>> {
    parse_documents(text)?
        .into_iter()
        .enumerate()
        .map(|(i, doc)| Bond::try_from(doc).with_context(|| format!("Bond #{}", i + 1)))
        .collect()
}
