// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::project;
use crate::models::{Bond, Holding};
use crate::source::BondSource;
use crate::utils::{fmt_inr, fmt_percent, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

pub fn handle(conn: &Connection, source: &dyn BondSource, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("buy", sub)) => buy(conn, source, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("allocation", sub)) => allocation_cmd(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn buy(conn: &Connection, source: &dyn BondSource, sub: &clap::ArgMatches) -> Result<()> {
    let bond_id = sub.get_one::<String>("bond").unwrap().trim();
    let units = *sub.get_one::<u32>("units").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?,
        None => Utc::now().date_naive(),
    };
    let bond = source
        .fetch_by_id(bond_id)?
        .with_context(|| format!("Bond '{}' not found", bond_id))?;
    let holding = record_holding(conn, &bond, units, date)?;
    println!(
        "Bought {} x {} @ {} (invested {})",
        units,
        bond.name,
        fmt_inr(&bond.price),
        fmt_inr(&holding.invested()?)
    );
    Ok(())
}

/// Snapshot the bond's terms into a new holding.
pub fn record_holding(
    conn: &Connection,
    bond: &Bond,
    units: u32,
    date: NaiveDate,
) -> Result<Holding> {
    if units == 0 {
        bail!("Units must be greater than zero");
    }
    if !bond.is_active {
        bail!("Bond '{}' is not open for investment", bond.name);
    }
    if bond.price.checked_mul(Decimal::from(units)).is_none() {
        bail!(
            "{} units of '{}' at {} exceed the supported amount",
            units,
            bond.name,
            bond.price
        );
    }
    conn.execute(
        "INSERT INTO holdings(bond_id, bond_name, sector, units, unit_price, return_rate, maturity_years, date)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        params![
            bond.id,
            bond.name,
            bond.sector,
            units,
            bond.price.to_string(),
            bond.return_rate.to_string(),
            bond.maturity_years,
            date.to_string()
        ],
    )?;
    let holding = Holding {
        id: conn.last_insert_rowid(),
        bond_id: bond.id.clone(),
        bond_name: bond.name.clone(),
        sector: bond.sector.clone(),
        units,
        unit_price: bond.price,
        return_rate: bond.return_rate,
        maturity_years: bond.maturity_years,
        date,
    };
    info!(bond = %bond.id, units, "paper trade recorded");
    Ok(holding)
}

pub fn load_holdings(conn: &Connection) -> Result<Vec<Holding>> {
    let mut stmt = conn.prepare(
        "SELECT id, bond_id, bond_name, sector, units, unit_price, return_rate, maturity_years, date
         FROM holdings ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, u32>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, u32>(7)?,
            r.get::<_, String>(8)?,
        ))
    })?;
    let mut holdings = Vec::new();
    for row in rows {
        let (id, bond_id, bond_name, sector, units, price_s, rate_s, maturity_years, date_s) =
            row?;
        let unit_price = Decimal::from_str_exact(&price_s)
            .with_context(|| format!("Invalid stored price '{}' for holding {}", price_s, id))?;
        let return_rate = Decimal::from_str_exact(&rate_s)
            .with_context(|| format!("Invalid stored rate '{}' for holding {}", rate_s, id))?;
        let date = parse_date(&date_s)
            .with_context(|| format!("Invalid stored date for holding {}", id))?;
        holdings.push(Holding {
            id,
            bond_id,
            bond_name,
            sector,
            units,
            unit_price,
            return_rate,
            maturity_years,
            date,
        });
    }
    Ok(holdings)
}

#[derive(Debug, Serialize)]
pub struct HoldingView {
    #[serde(flatten)]
    pub holding: Holding,
    pub invested: Decimal,
    pub maturity_value: Decimal,
    pub total_return: Decimal,
}

pub fn holding_views(holdings: Vec<Holding>) -> Result<Vec<HoldingView>> {
    holdings
        .into_iter()
        .map(|h| {
            let invested = h.invested()?;
            let p = project(invested, h.return_rate, i64::from(h.maturity_years))?;
            Ok(HoldingView {
                holding: h,
                invested,
                maturity_value: p.maturity_value,
                total_return: p.total_return,
            })
        })
        .collect()
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let views = holding_views(load_holdings(conn)?)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &views)? {
        return Ok(());
    }
    let total_invested = checked_total(views.iter().map(|v| v.invested))?;
    let total_maturity = checked_total(views.iter().map(|v| v.maturity_value))?;
    let rows = views
        .into_iter()
        .map(|v| {
            vec![
                v.holding.date.to_string(),
                v.holding.bond_id,
                v.holding.bond_name,
                v.holding.units.to_string(),
                fmt_percent(&v.holding.return_rate),
                fmt_inr(&v.invested),
                fmt_inr(&v.maturity_value),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Bond", "Name", "Units", "Rate", "Invested", "At Maturity"],
            rows,
        )
    );
    println!(
        "Invested {} → {} at maturity",
        fmt_inr(&total_invested),
        fmt_inr(&total_maturity)
    );
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorAllocation {
    pub sector: String,
    pub invested: Decimal,
    pub percent: Decimal,
}

fn checked_total(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .context("Portfolio total exceeds the supported amount")
}

/// Invested value per sector, largest first. Ties keep first-seen order.
pub fn allocation(holdings: &[Holding]) -> Result<Vec<SectorAllocation>> {
    let mut by_sector: Vec<SectorAllocation> = Vec::new();
    for h in holdings {
        let sector = if h.sector.trim().is_empty() {
            "Unknown"
        } else {
            h.sector.as_str()
        };
        let invested = h.invested()?;
        match by_sector.iter_mut().find(|a| a.sector == sector) {
            Some(entry) => {
                entry.invested = entry
                    .invested
                    .checked_add(invested)
                    .with_context(|| format!("Sector '{}' total overflows", sector))?;
            }
            None => by_sector.push(SectorAllocation {
                sector: sector.to_string(),
                invested,
                percent: Decimal::ZERO,
            }),
        }
    }
    by_sector.sort_by(|a, b| b.invested.cmp(&a.invested));

    let total = checked_total(by_sector.iter().map(|a| a.invested))?;
    if !total.is_zero() {
        for a in &mut by_sector {
            a.percent = a.invested / total * Decimal::ONE_HUNDRED;
        }
    }
    Ok(by_sector)
}

fn allocation_cmd(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = allocation(&load_holdings(conn)?)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|a| {
                vec![
                    a.sector,
                    fmt_inr(&a.invested),
                    format!("{:.1}%", a.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Sector", "Invested", "Share"], rows));
    }
    Ok(())
}
