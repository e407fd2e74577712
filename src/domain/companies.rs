//! Company domain types
//!
//! Companies are the root aggregate: every tender, bid response and
//! template belongs to one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Company entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub registration_number: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// B-BBEE compliance level, stored as given
    pub bee_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Overwrite every field present in `update`.
    pub fn apply(&mut self, update: UpdateCompanyRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(registration_number) = update.registration_number {
            self.registration_number = Some(registration_number);
        }
        if let Some(logo_url) = update.logo_url {
            self.logo_url = Some(logo_url);
        }
        if let Some(website) = update.website {
            self.website = Some(website);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(bee_status) = update.bee_status {
            self.bee_status = Some(bee_status);
        }
    }
}

/// Request DTO for registering a company
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub bee_status: Option<String>,
}

/// Request DTO for updating a company profile
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanyRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub bee_status: Option<String>,
}

/// Filter for listing companies
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyFilter {
    #[serde(default)]
    pub bee_status: Option<String>,
}
