// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Bond;

/// Projected worth of an investment held to maturity. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub maturity_value: Decimal,
    pub total_return: Decimal,
}

/// Annual compounding with no partial-year proration:
/// `maturity = price * (1 + rate/100)^years`.
///
/// Negative price or rate and `years < 1` are rejected, never clamped.
pub fn project(
    price: Decimal,
    return_rate_percent: Decimal,
    years: i64,
) -> CatalogResult<Projection> {
    if price < Decimal::ZERO {
        return Err(CatalogError::invalid_argument(format!(
            "price must be >= 0 (got {})",
            price
        )));
    }
    if return_rate_percent < Decimal::ZERO {
        return Err(CatalogError::invalid_argument(format!(
            "return rate must be >= 0 (got {})",
            return_rate_percent
        )));
    }
    if years < 1 {
        return Err(CatalogError::invalid_argument(format!(
            "years must be >= 1 (got {})",
            years
        )));
    }

    if price.is_zero() {
        return Ok(Projection {
            maturity_value: Decimal::ZERO,
            total_return: Decimal::ZERO,
        });
    }

    let growth = Decimal::ONE + return_rate_percent / Decimal::ONE_HUNDRED;
    let overflow = || {
        CatalogError::Overflow(format!(
            "{} at {}% over {} years",
            price, return_rate_percent, years
        ))
    };
    let factor = growth.checked_powi(years).ok_or_else(overflow)?;
    let maturity_value = price.checked_mul(factor).ok_or_else(overflow)?;
    Ok(Projection {
        maturity_value,
        total_return: maturity_value - price,
    })
}

/// Projection of one unit of `bond` held for its full term.
pub fn project_bond(bond: &Bond) -> CatalogResult<Projection> {
    project(bond.price, bond.return_rate, i64::from(bond.maturity_years))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_rate_returns_principal() {
        let p = project(dec!(2500), Decimal::ZERO, 10).unwrap();
        assert_eq!(p.maturity_value, dec!(2500));
        assert_eq!(p.total_return, Decimal::ZERO);
    }

    #[test]
    fn single_year_is_simple_interest() {
        let p = project(dec!(1000), dec!(5), 1).unwrap();
        assert_eq!(p.maturity_value, dec!(1050));
        assert_eq!(p.total_return, dec!(50));
    }

    #[test]
    fn negative_inputs_rejected() {
        assert!(matches!(
            project(dec!(-1), dec!(5), 3),
            Err(CatalogError::InvalidArgument(_))
        ));
        assert!(matches!(
            project(dec!(1000), dec!(-0.5), 3),
            Err(CatalogError::InvalidArgument(_))
        ));
        assert!(matches!(
            project(dec!(1000), dec!(5), -2),
            Err(CatalogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_price_projects_to_zero_at_any_horizon() {
        let p = project(Decimal::ZERO, dec!(100), 200).unwrap();
        assert_eq!(p.maturity_value, Decimal::ZERO);
        assert_eq!(p.total_return, Decimal::ZERO);
    }

    #[test]
    fn huge_growth_overflows_instead_of_wrapping() {
        assert!(matches!(
            project(dec!(1000000), dec!(100), 200),
            Err(CatalogError::Overflow(_))
        ));
    }
}
