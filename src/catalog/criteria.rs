// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Query normalization: raw user filter input into a canonical predicate set.
//!
//! Malformed fields degrade to "no constraint" instead of failing the query.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::models::RiskLevel;

/// Filter input exactly as typed by the user (query string, CLI flags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCriteria {
    pub search: Option<String>,
    pub risk: Option<String>,
    pub sector: Option<String>,
    pub min_return: Option<String>,
    pub max_return: Option<String>,
}

/// Canonical predicate set. All fields `None` is the identity filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Lower-cased, trimmed, never empty.
    pub search_text: Option<String>,
    pub risk_level: Option<RiskLevel>,
    /// Matched case-insensitively by substring; `all` disables the predicate.
    pub sector: Option<String>,
    pub min_return_rate: Option<Decimal>,
    pub max_return_rate: Option<Decimal>,
}

impl FilterCriteria {
    pub fn is_identity(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

/// Normalize raw input. When both bounds parse and `min > max` they are
/// swapped, so a reversed range never yields an impossible filter.
pub fn normalize(raw: &RawCriteria) -> FilterCriteria {
    let search_text = raw
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let risk_level = raw.risk.as_deref().and_then(RiskLevel::parse_exact);

    let sector = raw
        .sector
        .as_ref()
        .filter(|s| !s.trim().is_empty())
        .cloned();

    let mut min_return_rate = parse_bound("min_return", raw.min_return.as_deref());
    let mut max_return_rate = parse_bound("max_return", raw.max_return.as_deref());
    if let (Some(lo), Some(hi)) = (min_return_rate, max_return_rate) {
        if lo > hi {
            debug!(%lo, %hi, "swapping reversed return-rate bounds");
            min_return_rate = Some(hi);
            max_return_rate = Some(lo);
        }
    }

    FilterCriteria {
        search_text,
        risk_level,
        sector,
        min_return_rate,
        max_return_rate,
    }
}

fn parse_bound(field: &str, raw: Option<&str>) -> Option<Decimal> {
    let s = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
        Ok(d) => Some(d),
        Err(err) => {
            debug!(field, value = s, %err, "ignoring unparseable return-rate bound");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw() -> RawCriteria {
        RawCriteria::default()
    }

    #[test]
    fn empty_input_is_identity() {
        assert!(normalize(&raw()).is_identity());
        let blank = RawCriteria {
            search: Some("   ".into()),
            sector: Some("".into()),
            min_return: Some(" ".into()),
            ..raw()
        };
        assert!(normalize(&blank).is_identity());
    }

    #[test]
    fn search_is_trimmed_and_lowercased() {
        let c = normalize(&RawCriteria {
            search: Some("  METRO Rail ".into()),
            ..raw()
        });
        assert_eq!(c.search_text.as_deref(), Some("metro rail"));
    }

    #[test]
    fn unknown_risk_means_all() {
        for r in ["all", "low", "HIGH", ""] {
            let c = normalize(&RawCriteria {
                risk: Some(r.into()),
                ..raw()
            });
            assert_eq!(c.risk_level, None, "risk {:?}", r);
        }
        let c = normalize(&RawCriteria {
            risk: Some("High".into()),
            ..raw()
        });
        assert_eq!(c.risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn sector_kept_raw() {
        let c = normalize(&RawCriteria {
            sector: Some("Urban Transit".into()),
            ..raw()
        });
        assert_eq!(c.sector.as_deref(), Some("Urban Transit"));
    }

    #[test]
    fn unparseable_bounds_are_dropped_not_zeroed() {
        let c = normalize(&RawCriteria {
            min_return: Some("abc".into()),
            max_return: Some("9.5".into()),
            ..raw()
        });
        assert_eq!(c.min_return_rate, None);
        assert_eq!(c.max_return_rate, Some(dec!(9.5)));
    }

    #[test]
    fn scientific_bounds_parse() {
        let c = normalize(&RawCriteria {
            min_return: Some("7.5e0".into()),
            ..raw()
        });
        assert_eq!(c.min_return_rate, Some(dec!(7.5)));
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let reversed = normalize(&RawCriteria {
            min_return: Some("10".into()),
            max_return: Some("5".into()),
            ..raw()
        });
        let ordered = normalize(&RawCriteria {
            min_return: Some("5".into()),
            max_return: Some("10".into()),
            ..raw()
        });
        assert_eq!(reversed, ordered);
        assert_eq!(ordered.min_return_rate, Some(dec!(5)));
        assert_eq!(ordered.max_return_rate, Some(dec!(10)));
    }
}
