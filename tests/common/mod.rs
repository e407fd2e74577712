//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use chrono::{Duration, SubsecRound, Utc};
use randgate_backend::config::Settings;
use randgate_backend::db;
use randgate_backend::domain::{
    Company, CreateBidResponseRequest, CreateCompanyRequest, CreateTenderRequest, Tender,
    TenderType,
};
use randgate_backend::store::{CompanyRepository, Store, TenderRepository};
use tempfile::TempDir;
use uuid::Uuid;

/// Helper: spin up an in-memory database with the schema applied.
pub async fn setup() -> Store {
    let pool = db::connect_in_memory().await.unwrap();
    Store::new(pool)
}

/// Helper: a file-backed database behind the production pool settings, so
/// several connections contend for the write lock. Keep the `TempDir` alive
/// for the duration of the test.
pub async fn setup_on_disk() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("randgate.db").display());
    let settings = Settings::from_lookup(|key| match key {
        "DATABASE_URL" => Some(url.clone()),
        "DATABASE_BUSY_TIMEOUT_SECS" => Some("30".to_string()),
        _ => None,
    })
    .unwrap();

    let pool = db::create_pool(&settings).await.unwrap();
    db::init_db(&pool).await.unwrap();
    (dir, Store::new(pool))
}

pub async fn company(store: &Store, name: &str) -> Company {
    store
        .companies
        .create(CreateCompanyRequest {
            name: name.into(),
            ..Default::default()
        })
        .await
        .unwrap()
}

pub fn tender_request(company_id: Uuid, title: &str) -> CreateTenderRequest {
    CreateTenderRequest {
        company_id,
        title: title.into(),
        description: None,
        tender_type: Some(TenderType::Rfq),
        deadline: (Utc::now() + Duration::days(14)).trunc_subsecs(0),
        tor_document_url: None,
    }
}

pub async fn tender(store: &Store, company_id: Uuid, title: &str) -> Tender {
    store
        .tenders
        .create(tender_request(company_id, title))
        .await
        .unwrap()
}

pub fn bid_request(tender_id: Uuid, company_id: Uuid, price: f64) -> CreateBidResponseRequest {
    CreateBidResponseRequest {
        tender_id,
        company_id,
        proposal_text: Some("We will deliver on time.".into()),
        price_quote: Some(price),
        pdf_url: None,
    }
}
