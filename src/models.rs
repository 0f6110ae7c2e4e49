// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, CatalogResult};

/// Score assumed when a bond carries no risk score.
pub const NEUTRAL_RISK_SCORE: u32 = 50;

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Case-sensitive match against `Low`, `Medium`, `High`.
    pub fn parse_exact(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lvl| lvl.as_str() == s)
    }

    /// Tier implied by a 0..=100 risk score: <=33 Low, 34..=66 Medium, above High.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=33 => RiskLevel::Low,
            34..=66 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_exact(s).ok_or_else(|| {
            CatalogError::invalid_argument(format!(
                "Risk level must be Low, Medium, or High (got '{}')",
                s
            ))
        })
    }
}

/// Identifier as it appears in a stored document: plain string, integer, or
/// extended-JSON object id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Text(String),
    Number(i64),
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Text(s) => f.write_str(s),
            DocumentId::Number(n) => write!(f, "{}", n),
            DocumentId::ObjectId { oid } => f.write_str(oid),
        }
    }
}

/// Serialized form of a bond as received from a document store, JSON file or
/// REST endpoint. Keys are camelCase; unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondDocument {
    #[serde(default)]
    pub id: Option<DocumentId>,
    #[serde(default, rename = "_id")]
    pub db_id: Option<DocumentId>,
    /// Written by our own exports when the canonical id differs from the
    /// native one.
    #[serde(default)]
    pub native_id: Option<String>,
    pub name: String,
    pub issuer: String,
    pub return_rate: Decimal,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub risk_score: Option<u32>,
    pub price: Decimal,
    pub maturity_years: u32,
    pub description: String,
    pub sector: String,
    #[serde(default)]
    pub total_value: Option<Decimal>,
    #[serde(default)]
    pub available_units: Option<Decimal>,
    #[serde(default)]
    pub launch_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl BondDocument {
    /// The database identifier wins over the native one when both are present.
    pub fn canonical_id(&self) -> Option<String> {
        self.db_id
            .as_ref()
            .or(self.id.as_ref())
            .map(|id| id.to_string())
            .filter(|id| !id.trim().is_empty())
    }
}

/// One investable instrument. Read-only to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
    pub name: String,
    pub issuer: String,
    pub sector: String,
    pub description: String,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u32>,
    pub return_rate: Decimal,
    pub price: Decimal,
    pub maturity_years: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_units: Option<Decimal>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<DateTime<Utc>>,
}

impl TryFrom<BondDocument> for Bond {
    type Error = CatalogError;

    fn try_from(doc: BondDocument) -> Result<Self, Self::Error> {
        let id = doc
            .canonical_id()
            .ok_or_else(|| CatalogError::invalid_record(&doc.name, "missing id and _id"))?;
        Ok(Bond {
            id,
            native_id: doc.native_id.or_else(|| doc.id.map(|id| id.to_string())),
            name: doc.name,
            issuer: doc.issuer,
            sector: doc.sector,
            description: doc.description,
            risk_level: doc.risk_level,
            risk_score: doc.risk_score,
            return_rate: doc.return_rate,
            price: doc.price,
            maturity_years: doc.maturity_years,
            total_value: doc.total_value,
            available_units: doc.available_units,
            is_active: doc.is_active.unwrap_or(true),
            launch_date: doc.launch_date,
        })
    }
}

impl Bond {
    pub fn effective_risk_score(&self) -> u32 {
        self.risk_score.unwrap_or(NEUTRAL_RISK_SCORE)
    }

    /// True when `id` is either the canonical or the native identifier.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || self.native_id.as_deref() == Some(id)
    }

    /// Whether the stated risk level agrees with the tier its score implies.
    /// Bonds without a score are always consistent.
    pub fn risk_consistent(&self) -> bool {
        match self.risk_score {
            Some(score) => RiskLevel::from_score(score) == self.risk_level,
            None => true,
        }
    }

    /// Document-store schema rules, applied when bonds are imported.
    pub fn validate(&self) -> CatalogResult<()> {
        let fail = |reason: &str| -> CatalogResult<()> {
            Err(CatalogError::invalid_record(&self.id, reason))
        };
        if self.name.trim().is_empty() {
            return fail("Bond name is required");
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return fail("Name cannot exceed 200 characters");
        }
        if self.issuer.trim().is_empty() {
            return fail("Issuer is required");
        }
        if self.sector.trim().is_empty() {
            return fail("Sector is required");
        }
        if self.description.trim().is_empty() {
            return fail("Description is required");
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return fail("Description cannot exceed 1000 characters");
        }
        if self.return_rate < Decimal::ZERO {
            return fail("Return rate cannot be negative");
        }
        if self.return_rate > Decimal::ONE_HUNDRED {
            return fail("Return rate cannot exceed 100%");
        }
        if self.price < Decimal::ZERO {
            return fail("Price cannot be negative");
        }
        if self.maturity_years < 1 {
            return fail("Maturity must be at least 1 year");
        }
        if self.risk_score.is_some_and(|s| s > 100) {
            return fail("Risk score must be between 0 and 100");
        }
        if self.total_value.is_some_and(|v| v < Decimal::ZERO) {
            return fail("Total value cannot be negative");
        }
        if self.available_units.is_some_and(|v| v < Decimal::ZERO) {
            return fail("Available units cannot be negative");
        }
        Ok(())
    }
}

/// A paper-trading purchase. Bond terms are snapshotted at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub id: i64,
    pub bond_id: String,
    pub bond_name: String,
    pub sector: String,
    pub units: u32,
    pub unit_price: Decimal,
    pub return_rate: Decimal,
    pub maturity_years: u32,
    pub date: NaiveDate,
}

impl Holding {
    /// `unit_price * units`, or `Overflow` when the product leaves the
    /// decimal range.
    pub fn invested(&self) -> CatalogResult<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.units))
            .ok_or_else(|| {
                CatalogError::Overflow(format!(
                    "{} units at {} in holding {}",
                    self.units, self.unit_price, self.id
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> BondDocument {
        serde_json::from_str(json).unwrap()
    }

    const BODY: &str = r#""name":"N","issuer":"I","returnRate":7.5,"riskLevel":"Low","price":10000,"maturityYears":5,"description":"D","sector":"Energy""#;

    #[test]
    fn database_id_preferred_over_native_id() {
        let d = doc(&format!(r#"{{"id":"7","_id":"65a1f0","createdAt":"x",{}}}"#, BODY));
        let bond = Bond::try_from(d).unwrap();
        assert_eq!(bond.id, "65a1f0");
        assert_eq!(bond.native_id.as_deref(), Some("7"));
        assert!(bond.matches_id("7"));
        assert!(bond.matches_id("65a1f0"));
        assert!(bond.is_active);
    }

    #[test]
    fn exported_native_id_survives_reimport() {
        let d = doc(&format!(r#"{{"id":"3","nativeId":"NHAI-2030",{}}}"#, BODY));
        let bond = Bond::try_from(d).unwrap();
        assert_eq!(bond.id, "3");
        assert_eq!(bond.native_id.as_deref(), Some("NHAI-2030"));
    }

    #[test]
    fn object_id_and_numeric_ids_are_accepted() {
        let d = doc(&format!(r#"{{"_id":{{"$oid":"abc123"}},{}}}"#, BODY));
        assert_eq!(d.canonical_id().as_deref(), Some("abc123"));
        let d = doc(&format!(r#"{{"id":42,{}}}"#, BODY));
        assert_eq!(d.canonical_id().as_deref(), Some("42"));
    }

    #[test]
    fn missing_id_is_rejected() {
        let d = doc(&format!("{{{}}}", BODY));
        assert!(matches!(
            Bond::try_from(d),
            Err(CatalogError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn risk_level_is_case_sensitive() {
        assert_eq!(RiskLevel::parse_exact("Medium"), Some(RiskLevel::Medium));
        assert_eq!(RiskLevel::parse_exact("medium"), None);
        assert!("HIGH".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn score_tiers() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(33), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(34), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(66), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(67), RiskLevel::High);
    }

    #[test]
    fn validate_rejects_out_of_range_return_rate() {
        let d = doc(&format!(r#"{{"id":"1",{}}}"#, BODY));
        let mut bond = Bond::try_from(d).unwrap();
        assert!(bond.validate().is_ok());
        bond.return_rate = Decimal::from(101);
        assert!(bond.validate().is_err());
        bond.return_rate = Decimal::from(5);
        bond.risk_score = Some(120);
        assert!(bond.validate().is_err());
    }
}
