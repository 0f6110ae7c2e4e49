// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error taxonomy for the bond catalog.
//!
//! An empty filtered collection is a valid outcome and has no variant here.

use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed sort key, or a domain-invalid valuation input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A bond document that fails schema validation.
    #[error("Invalid bond '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },

    /// Projection exceeded the representable decimal range.
    #[error("Projection overflow: {0}")]
    Overflow(String),
}

impl CatalogError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_record(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
