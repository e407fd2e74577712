use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ParseEnumError;

/// Bid status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    #[default]
    Draft,
    Submitted,
    Shortlisted,
    Rejected,
    Awarded,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Awarded => "awarded",
        }
    }

    /// Every state past draft implies the bid was handed in.
    pub fn is_submitted(&self) -> bool {
        !matches!(self, Self::Draft)
    }
}

impl FromStr for BidStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "shortlisted" => Ok(Self::Shortlisted),
            "rejected" => Ok(Self::Rejected),
            "awarded" => Ok(Self::Awarded),
            other => Err(ParseEnumError::new("bid status", other)),
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bid response entity
///
/// The bidding company is independent of the company that owns the tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidResponse {
    pub id: Uuid,
    pub tender_id: Uuid,
    pub company_id: Uuid,
    pub proposal_text: Option<String>,
    pub price_quote: Option<f64>,
    /// Rendered proposal document, produced elsewhere
    pub pdf_url: Option<String>,
    pub status: BidStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BidResponse {
    /// Overwrite every field present in `update`. `at` is the mutation time
    /// and becomes `submitted_at` if this is the first submitted status.
    pub fn apply(&mut self, update: UpdateBidResponseRequest, at: DateTime<Utc>) {
        if let Some(proposal_text) = update.proposal_text {
            self.proposal_text = Some(proposal_text);
        }
        if let Some(price_quote) = update.price_quote {
            self.price_quote = Some(price_quote);
        }
        if let Some(pdf_url) = update.pdf_url {
            self.pdf_url = Some(pdf_url);
        }
        if let Some(status) = update.status {
            self.set_status(status, at);
        }
    }

    /// submitted_at is written once, on the first move out of draft.
    pub fn set_status(&mut self, status: BidStatus, at: DateTime<Utc>) {
        if status.is_submitted() && self.submitted_at.is_none() {
            self.submitted_at = Some(at);
        }
        self.status = status;
    }
}

/// Request DTO for creating a bid response
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBidResponseRequest {
    pub tender_id: Uuid,
    pub company_id: Uuid,
    #[serde(default)]
    pub proposal_text: Option<String>,
    #[serde(default)]
    pub price_quote: Option<f64>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// Request DTO for updating a bid response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBidResponseRequest {
    #[serde(default)]
    pub proposal_text: Option<String>,
    #[serde(default)]
    pub price_quote: Option<f64>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub status: Option<BidStatus>,
}

/// Ordering of a bid listing
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BidOrder {
    #[default]
    Inserted,
    /// Cheapest quote first, unpriced bids leading
    Price,
}

/// Filter for listing bid responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BidResponseFilter {
    #[serde(default)]
    pub tender_id: Option<Uuid>,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub status: Option<BidStatus>,
    #[serde(default)]
    pub order: BidOrder,
}
