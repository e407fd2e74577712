use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ParseEnumError;

/// Kind of procurement request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TenderType {
    /// Request for information
    Rfi,
    /// Request for quotation
    Rfq,
    /// Request for proposal
    Rfp,
    /// Request for tender
    Rft,
}

impl TenderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rfi => "RFI",
            Self::Rfq => "RFQ",
            Self::Rfp => "RFP",
            Self::Rft => "RFT",
        }
    }
}

impl FromStr for TenderType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RFI" => Ok(Self::Rfi),
            "RFQ" => Ok(Self::Rfq),
            "RFP" => Ok(Self::Rfp),
            "RFT" => Ok(Self::Rft),
            other => Err(ParseEnumError::new("tender_type", other)),
        }
    }
}

impl fmt::Display for TenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tender status
///
/// Tenders move draft → published → closed → awarded. The order is the
/// caller's business; any member may be stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    #[default]
    Draft,
    Published,
    Closed,
    Awarded,
}

impl TenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Closed => "closed",
            Self::Awarded => "awarded",
        }
    }
}

impl FromStr for TenderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "closed" => Ok(Self::Closed),
            "awarded" => Ok(Self::Awarded),
            other => Err(ParseEnumError::new("tender status", other)),
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tender entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tender_type: Option<TenderType>,
    pub company_id: Uuid,
    pub deadline: DateTime<Utc>,
    pub status: TenderStatus,
    /// Terms-of-reference document, produced elsewhere
    pub tor_document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tender {
    /// Overwrite every field present in `update`.
    pub fn apply(&mut self, update: UpdateTenderRequest) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(tender_type) = update.tender_type {
            self.tender_type = Some(tender_type);
        }
        if let Some(deadline) = update.deadline {
            self.deadline = deadline;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(tor_document_url) = update.tor_document_url {
            self.tor_document_url = Some(tor_document_url);
        }
    }
}

/// Request DTO for creating a tender
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTenderRequest {
    pub company_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tender_type: Option<TenderType>,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub tor_document_url: Option<String>,
}

/// Request DTO for updating a tender
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTenderRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tender_type: Option<TenderType>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<TenderStatus>,
    #[serde(default)]
    pub tor_document_url: Option<String>,
}

/// Ordering of a tender listing
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TenderOrder {
    #[default]
    Inserted,
    /// Earliest deadline first
    Deadline,
}

/// Filter for listing tenders
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenderFilter {
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub status: Option<TenderStatus>,
    #[serde(default)]
    pub tender_type: Option<TenderType>,
    /// Substring match on the title
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub order: TenderOrder,
}
