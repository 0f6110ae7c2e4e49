// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use super::{BondSource, SourceKind};
use crate::models::{Bond, RiskLevel};

const SELECT_BONDS: &str = "SELECT id, native_id, name, issuer, sector, description, risk_level,
        risk_score, return_rate, price, maturity_years, total_value, available_units,
        is_active, launch_date
     FROM bonds";

/// Bonds stored in the local database. The row id is the canonical id.
pub struct SqliteSource<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSource<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn count(&self) -> Result<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM bonds", [], |r| r.get(0))?;
        Ok(n)
    }

    fn query_one(&self, sql: &str, key: &dyn rusqlite::ToSql) -> Result<Option<Bond>> {
        let row = self
            .conn
            .query_row(sql, [key], BondRow::read)
            .optional()?;
        row.map(BondRow::into_bond).transpose()
    }
}

impl BondSource for SqliteSource<'_> {
    fn kind(&self) -> SourceKind {
        SourceKind::Sqlite
    }

    fn fetch_all(&self) -> Result<Vec<Bond>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{} ORDER BY id", SELECT_BONDS))?;
        let rows = stmt.query_map([], BondRow::read)?;
        let mut bonds = Vec::new();
        for row in rows {
            bonds.push(row?.into_bond()?);
        }
        Ok(bonds)
    }

    /// Row id first, then the native id.
    fn fetch_by_id(&self, id: &str) -> Result<Option<Bond>> {
        let id = id.trim();
        if let Ok(row_id) = id.parse::<i64>() {
            let sql = format!("{} WHERE id=?1", SELECT_BONDS);
            if let Some(bond) = self.query_one(&sql, &row_id)? {
                return Ok(Some(bond));
            }
        }
        let sql = format!("{} WHERE native_id=?1", SELECT_BONDS);
        self.query_one(&sql, &id)
    }
}

struct BondRow {
    id: i64,
    native_id: Option<String>,
    name: String,
    issuer: String,
    sector: String,
    description: String,
    risk_level: String,
    risk_score: Option<u32>,
    return_rate: String,
    price: String,
    maturity_years: u32,
    total_value: Option<String>,
    available_units: Option<String>,
    is_active: bool,
    launch_date: Option<DateTime<Utc>>,
}

impl BondRow {
    fn read(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(BondRow {
            id: r.get(0)?,
            native_id: r.get(1)?,
            name: r.get(2)?,
            issuer: r.get(3)?,
            sector: r.get(4)?,
            description: r.get(5)?,
            risk_level: r.get(6)?,
            risk_score: r.get(7)?,
            return_rate: r.get(8)?,
            price: r.get(9)?,
            maturity_years: r.get(10)?,
            total_value: r.get(11)?,
            available_units: r.get(12)?,
            is_active: r.get(13)?,
            launch_date: r.get(14)?,
        })
    }

    fn into_bond(self) -> Result<Bond> {
        let id = self.id;
        let dec = |field: &str, raw: &str| -> Result<Decimal> {
            Decimal::from_str_exact(raw)
                .with_context(|| format!("Invalid stored {} '{}' for bond {}", field, raw, id))
        };
        let opt_dec = |field: &str, raw: Option<&str>| -> Result<Option<Decimal>> {
            raw.map(|s| dec(field, s)).transpose()
        };
        Ok(Bond {
            return_rate: dec("return_rate", &self.return_rate)?,
            price: dec("price", &self.price)?,
            total_value: opt_dec("total_value", self.total_value.as_deref())?,
            available_units: opt_dec("available_units", self.available_units.as_deref())?,
            risk_level: self
                .risk_level
                .parse::<RiskLevel>()
                .with_context(|| format!("Invalid stored risk level for bond {}", id))?,
            id: id.to_string(),
            native_id: self.native_id,
            name: self.name,
            issuer: self.issuer,
            sector: self.sector,
            description: self.description,
            risk_score: self.risk_score,
            maturity_years: self.maturity_years,
            is_active: self.is_active,
            launch_date: self.launch_date,
        })
    }
}

/// Insert or update a bond keyed by its native id. Returns the row id.
pub fn upsert_bond(conn: &Connection, bond: &Bond) -> Result<i64> {
    let native_id = bond.native_id.as_deref().unwrap_or(&bond.id);
    conn.execute(
        "INSERT INTO bonds(native_id, name, issuer, sector, description, risk_level, risk_score,
             return_rate, price, maturity_years, total_value, available_units, is_active, launch_date)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14)
         ON CONFLICT(native_id) DO UPDATE SET
             name=excluded.name, issuer=excluded.issuer, sector=excluded.sector,
             description=excluded.description, risk_level=excluded.risk_level,
             risk_score=excluded.risk_score, return_rate=excluded.return_rate,
             price=excluded.price, maturity_years=excluded.maturity_years,
             total_value=excluded.total_value, available_units=excluded.available_units,
             is_active=excluded.is_active, launch_date=excluded.launch_date,
             updated_at=datetime('now')",
        params![
            native_id,
            bond.name,
            bond.issuer,
            bond.sector,
            bond.description,
            bond.risk_level.as_str(),
            bond.risk_score,
            bond.return_rate.to_string(),
            bond.price.to_string(),
            bond.maturity_years,
            bond.total_value.map(|d| d.to_string()),
            bond.available_units.map(|d| d.to_string()),
            bond.is_active,
            bond.launch_date,
        ],
    )
    .with_context(|| format!("Store bond '{}'", bond.name))?;
    let row_id = conn.query_row(
        "SELECT id FROM bonds WHERE native_id=?1",
        params![native_id],
        |r| r.get(0),
    )?;
    Ok(row_id)
}
