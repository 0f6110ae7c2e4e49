// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::catalog::{self, Projection, RawCriteria, project_bond};
use crate::models::{Bond, RiskLevel};
use crate::source::{BondSource, SourceKind};
use crate::utils::{fmt_inr, fmt_inr_compact, fmt_percent, maybe_print_json, pretty_table};

pub fn handle(source: &dyn BondSource, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(source, sub)?,
        Some(("show", sub)) => show(source, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug)]
pub struct BondListing {
    pub source: SourceKind,
    pub total: usize,
    pub bonds: Vec<Bond>,
}

pub fn raw_criteria(sub: &clap::ArgMatches) -> RawCriteria {
    let get = |id: &str| sub.get_one::<String>(id).cloned();
    RawCriteria {
        search: get("search"),
        risk: get("risk"),
        sector: get("sector"),
        min_return: get("min_return"),
        max_return: get("max_return"),
    }
}

pub fn query_bonds(source: &dyn BondSource, sub: &clap::ArgMatches) -> Result<BondListing> {
    let all = source.fetch_all()?;
    let sort = sub
        .get_one::<String>("sort")
        .map(String::as_str)
        .unwrap_or("returnRate-desc");
    let mut bonds = catalog::discover(&all, &raw_criteria(sub), sort)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        bonds.truncate(*limit);
    }
    Ok(BondListing {
        source: source.kind(),
        total: all.len(),
        bonds,
    })
}

fn list(source: &dyn BondSource, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let listing = query_bonds(source, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &listing.bonds)? {
        let rows: Vec<Vec<String>> = listing
            .bonds
            .iter()
            .map(|b| {
                vec![
                    b.id.clone(),
                    b.name.clone(),
                    b.issuer.clone(),
                    b.sector.clone(),
                    b.risk_level.to_string(),
                    fmt_percent(&b.return_rate),
                    fmt_inr(&b.price),
                    format!("{}y", b.maturity_years),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Issuer", "Sector", "Risk", "Return", "Price", "Term"],
                rows,
            )
        );
        println!(
            "Showing {} of {} bonds (source: {})",
            listing.bonds.len(),
            listing.total,
            listing.source
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BondDetail {
    #[serde(flatten)]
    pub bond: Bond,
    pub projection: Projection,
    pub effective_risk_score: u32,
    pub score_tier: RiskLevel,
}

pub fn bond_detail(source: &dyn BondSource, id: &str) -> Result<BondDetail> {
    let id = id.trim();
    let bond = source
        .fetch_by_id(id)?
        .with_context(|| format!("Bond '{}' not found", id))?;
    let projection = project_bond(&bond)?;
    let score = bond.effective_risk_score();
    Ok(BondDetail {
        projection,
        effective_risk_score: score,
        score_tier: RiskLevel::from_score(score),
        bond,
    })
}

fn show(source: &dyn BondSource, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let detail = bond_detail(source, id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &detail)? {
        return Ok(());
    }
    let b = &detail.bond;
    let p = &detail.projection;
    let mut rows = vec![
        vec!["ID".to_string(), b.id.clone()],
        vec!["Name".into(), b.name.clone()],
        vec!["Issuer".into(), b.issuer.clone()],
        vec!["Sector".into(), b.sector.clone()],
        vec!["Description".into(), b.description.clone()],
        vec!["Risk level".into(), b.risk_level.to_string()],
        vec![
            "Risk score".into(),
            format!("{} ({})", detail.effective_risk_score, detail.score_tier),
        ],
        vec!["Return rate".into(), fmt_percent(&b.return_rate)],
        vec!["Min. investment".into(), fmt_inr(&b.price)],
        vec!["Maturity".into(), format!("{} years", b.maturity_years)],
        vec![
            format!("Value after {} years", b.maturity_years),
            fmt_inr(&p.maturity_value),
        ],
        vec!["Total returns".into(), fmt_inr(&p.total_return)],
    ];
    if let Some(total) = b.total_value {
        rows.push(vec!["Issue size".into(), fmt_inr_compact(&total)]);
    }
    if let Some(units) = b.available_units {
        rows.push(vec!["Available units".into(), units.normalize().to_string()]);
    }
    if !b.is_active {
        rows.push(vec!["Status".into(), "closed".into()]);
    }
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}
