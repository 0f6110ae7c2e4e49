// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filter and sort over an in-memory bond collection.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::{Collator, CollatorOptions, Strength};
use tracing::warn;

use crate::catalog::criteria::FilterCriteria;
use crate::error::CatalogError;
use crate::models::Bond;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    ReturnRateDesc,
    ReturnRateAsc,
    PriceDesc,
    PriceAsc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::ReturnRateDesc,
        SortKey::ReturnRateAsc,
        SortKey::PriceDesc,
        SortKey::PriceAsc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ReturnRateDesc => "returnRate-desc",
            SortKey::ReturnRateAsc => "returnRate-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| {
                let valid: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
                CatalogError::invalid_argument(format!(
                    "Unknown sort key '{}' (expected one of: {})",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when `bond` satisfies every active predicate of `criteria`.
pub fn matches(bond: &Bond, criteria: &FilterCriteria) -> bool {
    if let Some(text) = criteria.search_text.as_deref() {
        if !contains_ci(&bond.name, text) && !contains_ci(&bond.issuer, text) {
            return false;
        }
    }
    if let Some(level) = criteria.risk_level {
        if bond.risk_level != level {
            return false;
        }
    }
    if let Some(sector) = criteria.sector.as_deref() {
        if !sector.trim().eq_ignore_ascii_case("all") && !contains_ci(&bond.sector, sector) {
            return false;
        }
    }
    if criteria.min_return_rate.is_some_and(|lo| bond.return_rate < lo) {
        return false;
    }
    if criteria.max_return_rate.is_some_and(|hi| bond.return_rate > hi) {
        return false;
    }
    true
}

fn name_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    Collator::try_new(&Default::default(), options)
        .inspect_err(|err| warn!(%err, "root collator unavailable, names compare case-folded"))
        .ok()
}

/// Orders bonds by one sort key. Names collate under the root locale, with a
/// code-point tiebreak so the result is a total order.
pub struct Comparator {
    key: SortKey,
    collator: Option<Collator>,
}

impl Comparator {
    pub fn new(key: SortKey) -> Self {
        let collator = match key {
            SortKey::NameAsc | SortKey::NameDesc => name_collator(),
            _ => None,
        };
        Self { key, collator }
    }

    fn compare_names(&self, a: &str, b: &str) -> Ordering {
        let collated = match &self.collator {
            Some(c) => c.compare(a, b),
            None => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
        };
        collated.then_with(|| a.cmp(b))
    }

    pub fn compare(&self, a: &Bond, b: &Bond) -> Ordering {
        match self.key {
            SortKey::ReturnRateDesc => b.return_rate.cmp(&a.return_rate),
            SortKey::ReturnRateAsc => a.return_rate.cmp(&b.return_rate),
            SortKey::PriceDesc => b.price.cmp(&a.price),
            SortKey::PriceAsc => a.price.cmp(&b.price),
            SortKey::NameAsc => self.compare_names(&a.name, &b.name),
            SortKey::NameDesc => self.compare_names(&b.name, &a.name),
        }
    }
}

/// Filter then stably sort. The input slice is left untouched.
pub fn query(bonds: &[Bond], criteria: &FilterCriteria, key: SortKey) -> Vec<Bond> {
    let mut out: Vec<Bond> = bonds
        .iter()
        .filter(|b| matches(b, criteria))
        .cloned()
        .collect();
    let cmp = Comparator::new(key);
    out.sort_by(|a, b| cmp.compare(a, b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_parse_exactly() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!(matches!(
            "rating-desc".parse::<SortKey>(),
            Err(CatalogError::InvalidArgument(_))
        ));
        assert!("Price-Asc".parse::<SortKey>().is_err());
    }

    #[test]
    fn names_collate_by_locale_then_code_point() {
        let cmp = Comparator::new(SortKey::NameAsc);
        assert_eq!(cmp.compare_names("alpha", "Beta"), Ordering::Less);
        assert_eq!(cmp.compare_names("Beta", "alpha"), Ordering::Greater);
        assert_eq!(cmp.compare_names("Énergie", "Zeta"), Ordering::Less);
        assert_ne!(cmp.compare_names("Port", "port"), Ordering::Equal);
        assert_eq!(cmp.compare_names("Port", "Port"), Ordering::Equal);
    }
}
