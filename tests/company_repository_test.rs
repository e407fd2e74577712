//! Integration tests for the Company repository: in-memory SQLite, plus a
//! file-backed pool for concurrent writers.

mod common;

use futures::TryStreamExt;
use randgate_backend::domain::{Company, CompanyFilter, CreateCompanyRequest, UpdateCompanyRequest};
use randgate_backend::store::{CompanyRepository, StoreError};
use uuid::Uuid;

fn full_request() -> CreateCompanyRequest {
    CreateCompanyRequest {
        name: "Khanyisa Facilities".into(),
        registration_number: Some("2015/123456/07".into()),
        logo_url: Some("https://cdn.example.com/khanyisa.png".into()),
        website: Some("https://khanyisa.example.com".into()),
        email: Some("tenders@khanyisa.example.com".into()),
        phone: Some("+27 11 555 0100".into()),
        address: Some("12 Main Road\nJohannesburg".into()),
        bee_status: Some("Level 1".into()),
    }
}

#[tokio::test]
async fn create_and_get_company() {
    let store = common::setup().await;

    let created = store.companies.create(full_request()).await.unwrap();
    assert_eq!(created.name, "Khanyisa Facilities");
    assert_eq!(created.bee_status.as_deref(), Some("Level 1"));
    assert_eq!(created.created_at, created.updated_at);

    let fetched = store.companies.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_unknown_company_is_not_found() {
    let store = common::setup().await;

    let err = store.companies.get(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "company", .. }));
}

#[tokio::test]
async fn duplicate_name_is_a_constraint_violation() {
    let store = common::setup().await;
    common::company(&store, "Acme Supplies").await;

    let err = store
        .companies
        .create(CreateCompanyRequest {
            name: "Acme Supplies".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)), "{err:?}");
}

#[tokio::test]
async fn duplicate_email_and_registration_number_are_rejected() {
    let store = common::setup().await;
    store.companies.create(full_request()).await.unwrap();

    let same_email = CreateCompanyRequest {
        name: "Other".into(),
        email: Some("tenders@khanyisa.example.com".into()),
        ..Default::default()
    };
    let err = store.companies.create(same_email).await.unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)), "{err:?}");

    let same_registration = CreateCompanyRequest {
        name: "Another".into(),
        registration_number: Some("2015/123456/07".into()),
        ..Default::default()
    };
    let err = store.companies.create(same_registration).await.unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)), "{err:?}");
}

#[tokio::test]
async fn companies_without_email_do_not_clash() {
    let store = common::setup().await;

    common::company(&store, "First").await;
    common::company(&store, "Second").await;

    let all: Vec<Company> = store
        .companies
        .list(CompanyFilter::default())
        .try_collect()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn update_company_profile() {
    let store = common::setup().await;
    let company = common::company(&store, "Before").await;

    let updated = store
        .companies
        .update(
            company.id,
            UpdateCompanyRequest {
                name: Some("After".into()),
                phone: Some("011 555 0199".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "After");
    assert_eq!(updated.phone.as_deref(), Some("011 555 0199"));
    assert_eq!(updated.created_at, company.created_at);
    assert!(updated.updated_at > updated.created_at);

    let fetched = store.companies.get(company.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_into_taken_name_is_rejected_and_rolled_back() {
    let store = common::setup().await;
    common::company(&store, "Taken").await;
    let company = common::company(&store, "Free").await;

    let err = store
        .companies
        .update(
            company.id,
            UpdateCompanyRequest {
                name: Some("Taken".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)), "{err:?}");

    let fetched = store.companies.get(company.id).await.unwrap();
    assert_eq!(fetched, company);
}

#[tokio::test]
async fn update_unknown_company_is_not_found() {
    let store = common::setup().await;

    let err = store
        .companies
        .update(Uuid::new_v4(), UpdateCompanyRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn blank_or_oversized_fields_are_validation_errors() {
    let store = common::setup().await;

    let err = store
        .companies
        .create(CreateCompanyRequest {
            name: "  ".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store
        .companies
        .create(CreateCompanyRequest {
            name: "Long Phone".into(),
            phone: Some("0".repeat(21)),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn list_filters_by_bee_status_in_insertion_order() {
    let store = common::setup().await;

    for (name, level) in [("C", "Level 1"), ("A", "Level 4"), ("B", "Level 1")] {
        store
            .companies
            .create(CreateCompanyRequest {
                name: name.into(),
                bee_status: Some(level.into()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let level_one: Vec<Company> = store
        .companies
        .list(CompanyFilter {
            bee_status: Some("Level 1".into()),
        })
        .try_collect()
        .await
        .unwrap();

    let names: Vec<&str> = level_one.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["C", "B"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_to_distinct_companies_all_succeed() {
    let (_dir, store) = common::setup_on_disk().await;

    let mut ids = Vec::new();
    for i in 0..16 {
        ids.push(common::company(&store, &format!("Writer {i}")).await.id);
    }

    let writers: Vec<_> = ids
        .iter()
        .map(|&id| {
            let store = store.clone();
            tokio::spawn(async move {
                for round in 0..20 {
                    store
                        .companies
                        .update(
                            id,
                            UpdateCompanyRequest {
                                bee_status: Some(format!("Level {round}")),
                                ..Default::default()
                            },
                        )
                        .await?;
                }
                Ok::<(), StoreError>(())
            })
        })
        .collect();

    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    for id in ids {
        let company = store.companies.get(id).await.unwrap();
        assert_eq!(company.bee_status.as_deref(), Some("Level 19"));
        assert!(company.updated_at > company.created_at);
    }
}
