// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Bond, RiskLevel};
use crate::source::BondSource;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: &'static str,
    pub bond_id: String,
    pub detail: String,
}

/// Data checks over a bond listing. Risk level/score disagreements are
/// reported here and nowhere else; the catalog trusts its source.
pub fn find_issues(bonds: &[Bond]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for b in bonds {
        *seen.entry(b.id.as_str()).or_default() += 1;

        if let Err(err) = b.validate() {
            issues.push(Issue {
                kind: "invalid_record",
                bond_id: b.id.clone(),
                detail: err.to_string(),
            });
        }
        if let Some(score) = b.risk_score.filter(|_| !b.risk_consistent()) {
            issues.push(Issue {
                kind: "risk_mismatch",
                bond_id: b.id.clone(),
                detail: format!(
                    "level {} but score {} implies {}",
                    b.risk_level,
                    score,
                    RiskLevel::from_score(score)
                ),
            });
        }
        if !b.is_active {
            issues.push(Issue {
                kind: "inactive",
                bond_id: b.id.clone(),
                detail: b.name.clone(),
            });
        }
        if b.available_units == Some(Decimal::ZERO) {
            issues.push(Issue {
                kind: "no_units_available",
                bond_id: b.id.clone(),
                detail: b.name.clone(),
            });
        }
    }

    let mut dups: Vec<(&str, usize)> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    dups.sort();
    for (id, n) in dups {
        issues.push(Issue {
            kind: "duplicate_id",
            bond_id: id.to_string(),
            detail: format!("{} bonds share this id", n),
        });
    }
    issues
}

pub fn handle(source: &dyn BondSource) -> Result<()> {
    let issues = find_issues(&source.fetch_all()?);
    if issues.is_empty() {
        println!("✅ doctor: no issues found (source: {})", source.kind());
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.bond_id, i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Bond", "Detail"], rows));
    }
    Ok(())
}
