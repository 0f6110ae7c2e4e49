// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use super::{BondSource, SourceKind};
use crate::models::{Bond, RiskLevel};

/// Built-in listing used when no other data is available.
pub struct SampleSource;

impl BondSource for SampleSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Sample
    }

    fn fetch_all(&self) -> Result<Vec<Bond>> {
        Ok(sample_bonds())
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    name: &str,
    issuer: &str,
    return_rate: Decimal,
    risk_level: RiskLevel,
    price: i64,
    maturity_years: u32,
    description: &str,
    sector: &str,
) -> Bond {
    Bond {
        id: id.to_string(),
        native_id: Some(id.to_string()),
        name: name.to_string(),
        issuer: issuer.to_string(),
        sector: sector.to_string(),
        description: description.to_string(),
        risk_level,
        risk_score: None,
        return_rate,
        price: Decimal::from(price),
        maturity_years,
        total_value: None,
        available_units: None,
        is_active: true,
        launch_date: None,
    }
}

pub fn sample_bonds() -> Vec<Bond> {
    vec![
        sample(
            "1",
            "National Highway Infrastructure Bond",
            "NHAI",
            Decimal::new(75, 1),
            RiskLevel::Low,
            10_000,
            5,
            "Government-backed infrastructure bond for national highway development",
            "Transportation",
        ),
        sample(
            "2",
            "Metro Rail Development Bond",
            "DMRC",
            Decimal::new(82, 1),
            RiskLevel::Low,
            25_000,
            7,
            "Fund expansion of metro rail networks in major cities",
            "Urban Transit",
        ),
        sample(
            "3",
            "Green Energy Infrastructure Bond",
            "IREDA",
            Decimal::new(90, 1),
            RiskLevel::Medium,
            15_000,
            10,
            "Supporting renewable energy infrastructure projects across India",
            "Energy",
        ),
        sample(
            "4",
            "Smart City Development Bond",
            "Smart City SPV",
            Decimal::new(88, 1),
            RiskLevel::Medium,
            20_000,
            8,
            "Financing smart city initiatives including digital infrastructure",
            "Urban Development",
        ),
        sample(
            "5",
            "Port & Logistics Bond",
            "Sagarmala SPV",
            Decimal::new(95, 1),
            RiskLevel::High,
            50_000,
            12,
            "Investment in port modernization and coastal economic zones",
            "Maritime",
        ),
    ]
}
