// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Mudra", "mudra"));

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("mudra.sqlite"))
}

pub fn open(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    -- decimals are stored as TEXT to keep them exact
    CREATE TABLE IF NOT EXISTS bonds(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        native_id TEXT UNIQUE,
        name TEXT NOT NULL,
        issuer TEXT NOT NULL,
        sector TEXT NOT NULL,
        description TEXT NOT NULL,
        risk_level TEXT NOT NULL CHECK(risk_level IN ('Low','Medium','High')),
        risk_score INTEGER CHECK(risk_score IS NULL OR risk_score BETWEEN 0 AND 100),
        return_rate TEXT NOT NULL,
        price TEXT NOT NULL,
        maturity_years INTEGER NOT NULL CHECK(maturity_years >= 1),
        total_value TEXT,
        available_units TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        launch_date TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_bonds_sector ON bonds(sector);

    CREATE TABLE IF NOT EXISTS holdings(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        bond_id TEXT NOT NULL,
        bond_name TEXT NOT NULL,
        sector TEXT NOT NULL,
        units INTEGER NOT NULL CHECK(units > 0),
        unit_price TEXT NOT NULL,
        return_rate TEXT NOT NULL,
        maturity_years INTEGER NOT NULL,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_holdings_date ON holdings(date);
    "#,
    )?;
    Ok(())
}
