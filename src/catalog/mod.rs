// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bond discovery and valuation: normalize filter input, filter and sort a
//! collection, project maturity values. Pure functions over in-memory data.

pub mod criteria;
pub mod pipeline;
pub mod valuation;

pub use criteria::{FilterCriteria, RawCriteria, normalize};
pub use pipeline::{Comparator, SortKey, query};
pub use valuation::{Projection, project, project_bond};

use tracing::debug;

use crate::error::CatalogResult;
use crate::models::Bond;

/// Normalize `raw`, parse `sort_key` and run the pipeline over `bonds`.
/// Only the sort key can fail; bad filter fields are ignored.
pub fn discover(bonds: &[Bond], raw: &RawCriteria, sort_key: &str) -> CatalogResult<Vec<Bond>> {
    let key: SortKey = sort_key.parse()?;
    let criteria = normalize(raw);
    let out = query(bonds, &criteria, key);
    debug!(
        total = bonds.len(),
        kept = out.len(),
        sort = %key,
        "catalog query"
    );
    Ok(out)
}
