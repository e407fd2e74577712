//! Proposal template domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reusable proposal skeleton owned by a company
///
/// Templates are deactivated rather than deleted so that past bids built
/// from them keep a valid reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub company_id: Uuid,
    /// Serialized document, not interpreted here
    pub content: String,
    /// Free-form classification, e.g. cleaning, fleet, supply
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Overwrite every field present in `update`.
    pub fn apply(&mut self, update: UpdateTemplateRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
    }
}

/// Request DTO for creating a template
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplateRequest {
    pub company_id: Uuid,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Request DTO for updating a template
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTemplateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Filter for listing templates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}
