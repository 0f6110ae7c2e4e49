// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::source::BondSource;

pub const CSV_HEADER: [&str; 15] = [
    "id",
    "nativeId",
    "name",
    "issuer",
    "sector",
    "description",
    "riskLevel",
    "riskScore",
    "returnRate",
    "price",
    "maturityYears",
    "totalValue",
    "availableUnits",
    "isActive",
    "launchDate",
];

pub fn handle(source: &dyn BondSource, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("bonds", sub)) => export_bonds(source, sub),
        _ => Ok(()),
    }
}

fn export_bonds(source: &dyn BondSource, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let bonds = source.fetch_all()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(CSV_HEADER)?;
            let opt = |v: Option<String>| v.unwrap_or_default();
            for b in &bonds {
                wtr.write_record([
                    b.id.clone(),
                    opt(b.native_id.clone()),
                    b.name.clone(),
                    b.issuer.clone(),
                    b.sector.clone(),
                    b.description.clone(),
                    b.risk_level.to_string(),
                    opt(b.risk_score.map(|s| s.to_string())),
                    b.return_rate.to_string(),
                    b.price.to_string(),
                    b.maturity_years.to_string(),
                    opt(b.total_value.map(|d| d.to_string())),
                    opt(b.available_units.map(|d| d.to_string())),
                    b.is_active.to_string(),
                    opt(b.launch_date.map(|d| d.to_rfc3339())),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&bonds)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} bonds to {} (source: {})", bonds.len(), out, source.kind());
    Ok(())
}
