// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Bond, RiskLevel};
use crate::source::json::parse_bonds;
use crate::source::sqlite::upsert_bond;
use crate::utils::{parse_bool, parse_decimal, parse_timestamp};
use anyhow::{Context, Result, anyhow, bail};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("bonds", sub)) => import_bonds(conn, sub),
        _ => Ok(()),
    }
}

fn infer_format(path: &str, explicit: Option<&String>) -> Result<String> {
    if let Some(f) = explicit {
        return Ok(f.to_lowercase());
    }
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Ok("json".into()),
        Some("csv") => Ok("csv".into()),
        _ => Err(anyhow!(
            "Cannot infer format of '{}'; pass --format json|csv",
            path
        )),
    }
}

fn import_bonds(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let format = infer_format(path, sub.get_one::<String>("format"))?;
    let bonds = match format.as_str() {
        "json" => {
            let text =
                std::fs::read_to_string(path).with_context(|| format!("Open JSON {}", path))?;
            parse_bonds(&text).with_context(|| format!("Parse {}", path))?
        }
        "csv" => read_csv_bonds(path)?,
        other => bail!("Unknown format: {} (use csv|json)", other),
    };

    for bond in &bonds {
        bond.validate()?;
    }

    let tx = conn.transaction()?;
    for bond in &bonds {
        upsert_bond(&tx, bond)?;
    }
    tx.commit()?;
    info!(count = bonds.len(), path, "bonds imported");
    println!("Imported {} bonds from {}", bonds.len(), path);
    Ok(())
}

/// Columns are matched by header name; `id` and `nativeId` follow the same
/// precedence as JSON documents.
pub fn read_csv_bonds(path: &str) -> Result<Vec<Bond>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;
    let columns: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();

    let mut bonds = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = idx + 2;
        bonds.push(
            bond_from_record(&columns, &rec).with_context(|| format!("{} line {}", path, line))?,
        );
    }
    Ok(bonds)
}

fn bond_from_record(columns: &HashMap<String, usize>, rec: &StringRecord) -> Result<Bond> {
    let get = |col: &str| {
        columns
            .get(col)
            .and_then(|&i| rec.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };
    let need = |col: &str| get(col).with_context(|| format!("{} missing", col));

    let id = need("id")?.to_string();
    let native_id = get("nativeId").map(str::to_string).or_else(|| Some(id.clone()));
    let risk_level: RiskLevel = need("riskLevel")?.parse()?;
    let risk_score = get("riskScore")
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("Invalid risk score '{}'", s))
        })
        .transpose()?;
    let maturity_raw = need("maturityYears")?;
    let maturity_years = maturity_raw
        .parse::<u32>()
        .with_context(|| format!("Invalid maturity '{}'", maturity_raw))?;

    Ok(Bond {
        native_id,
        name: need("name")?.to_string(),
        issuer: need("issuer")?.to_string(),
        sector: need("sector")?.to_string(),
        description: need("description")?.to_string(),
        risk_level,
        risk_score,
        return_rate: parse_decimal(need("returnRate")?)?,
        price: parse_decimal(need("price")?)?,
        maturity_years,
        total_value: get("totalValue").map(parse_decimal).transpose()?,
        available_units: get("availableUnits").map(parse_decimal).transpose()?,
        is_active: get("isActive").map(parse_bool).transpose()?.unwrap_or(true),
        launch_date: get("launchDate").map(parse_timestamp).transpose()?,
        id,
    })
}
