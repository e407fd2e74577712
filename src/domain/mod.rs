//! Domain types and DTOs
//!
//! These types define the data structures for RandGate bid entities:
//! companies, the tenders they publish, the bid responses they submit
//! and their reusable proposal templates.

pub mod bids;
pub mod companies;
pub mod templates;
pub mod tenders;

// Re-export commonly used types
pub use bids::*;
pub use companies::*;
pub use templates::*;
pub use tenders::*;

use thiserror::Error;

/// A string did not name a member of one of the closed enumerations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
