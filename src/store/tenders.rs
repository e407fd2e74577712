//! SQLite implementation of [`TenderRepository`].

use chrono::{DateTime, Utc};
use futures::stream::{BoxStream, StreamExt};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::lifecycle::{self, Stamp};
use super::validate::{self, TITLE_MAX, URL_MAX};
use super::{begin_write, ensure_exists, parse_id, StoreError, StoreResult, TenderRepository};
use crate::domain::{
    CreateTenderRequest, Tender, TenderFilter, TenderOrder, TenderStatus, TenderType,
    UpdateTenderRequest,
};

const SELECT_TENDER: &str = r#"
    SELECT id, title, description, tender_type, company_id, deadline, status,
           tor_document_url, created_at, updated_at
    FROM tenders
    WHERE id = ?1
"#;

// ?5 selects the ordering; rowid keeps insertion order as the tiebreak.
const LIST_TENDERS: &str = r#"
    SELECT id, title, description, tender_type, company_id, deadline, status,
           tor_document_url, created_at, updated_at
    FROM tenders
    WHERE (?1 IS NULL OR company_id = ?1)
      AND (?2 IS NULL OR status = ?2)
      AND (?3 IS NULL OR tender_type = ?3)
      AND (?4 IS NULL OR instr(lower(title), lower(?4)) > 0)
    ORDER BY CASE ?5 WHEN 'deadline' THEN deadline END, rowid
"#;

const INSERT_TENDER: &str = r#"
    INSERT INTO tenders (id, title, description, tender_type, company_id, deadline, status,
                         tor_document_url, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

const UPDATE_TENDER: &str = r#"
    UPDATE tenders
    SET title = ?2, description = ?3, tender_type = ?4, deadline = ?5, status = ?6,
        tor_document_url = ?7, updated_at = ?8
    WHERE id = ?1
"#;

/// Database row for tender
#[derive(Debug, sqlx::FromRow)]
struct TenderRow {
    id: String,
    title: String,
    description: Option<String>,
    tender_type: Option<String>,
    company_id: String,
    deadline: DateTime<Utc>,
    status: String,
    tor_document_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TenderRow> for Tender {
    type Error = StoreError;

    fn try_from(row: TenderRow) -> StoreResult<Self> {
        Ok(Self {
            id: parse_id("id", &row.id)?,
            title: row.title,
            description: row.description,
            tender_type: row
                .tender_type
                .as_deref()
                .map(str::parse::<TenderType>)
                .transpose()?,
            company_id: parse_id("company_id", &row.company_id)?,
            deadline: row.deadline,
            status: row.status.parse()?,
            tor_document_url: row.tor_document_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn validate_tender(tender: &Tender) -> StoreResult<()> {
    validate::required("title", &tender.title, TITLE_MAX)?;
    validate::optional(
        "tor_document_url",
        tender.tor_document_url.as_deref(),
        URL_MAX,
    )?;
    Ok(())
}

fn order_key(order: TenderOrder) -> &'static str {
    match order {
        TenderOrder::Inserted => "inserted",
        TenderOrder::Deadline => "deadline",
    }
}

/// SQLite implementation of the Tender repository.
#[derive(Clone)]
pub struct SqliteTenderRepository {
    db: SqlitePool,
}

impl SqliteTenderRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

impl TenderRepository for SqliteTenderRepository {
    async fn create(&self, input: CreateTenderRequest) -> StoreResult<Tender> {
        let stamp = Stamp::new();
        let tender = Tender {
            id: stamp.id,
            title: input.title,
            description: input.description,
            tender_type: input.tender_type,
            company_id: input.company_id,
            deadline: input.deadline,
            status: TenderStatus::Draft,
            tor_document_url: input.tor_document_url,
            created_at: stamp.at,
            updated_at: stamp.at,
        };
        validate_tender(&tender)?;

        let mut tx = begin_write(&self.db, "tenders").await?;
        ensure_exists(&mut tx, "companies", "company", tender.company_id).await?;

        sqlx::query(INSERT_TENDER)
            .bind(tender.id.to_string())
            .bind(&tender.title)
            .bind(&tender.description)
            .bind(tender.tender_type.map(|t| t.as_str()))
            .bind(tender.company_id.to_string())
            .bind(tender.deadline)
            .bind(tender.status.as_str())
            .bind(&tender.tor_document_url)
            .bind(tender.created_at)
            .bind(tender.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            tender_id = %tender.id,
            company_id = %tender.company_id,
            deadline = %tender.deadline,
            "Tender created"
        );
        Ok(tender)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Tender> {
        let row = sqlx::query_as::<_, TenderRow>(SELECT_TENDER)
            .bind(id.to_string())
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("tender", id))?;

        row.try_into()
    }

    async fn update(&self, id: Uuid, input: UpdateTenderRequest) -> StoreResult<Tender> {
        let mut tx = begin_write(&self.db, "tenders").await?;

        let row = sqlx::query_as::<_, TenderRow>(SELECT_TENDER)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::not_found("tender", id))?;

        let mut tender = Tender::try_from(row)?;
        let previous_status = tender.status;
        tender.apply(input);
        tender.updated_at = lifecycle::touch(tender.updated_at);
        validate_tender(&tender)?;

        sqlx::query(UPDATE_TENDER)
            .bind(tender.id.to_string())
            .bind(&tender.title)
            .bind(&tender.description)
            .bind(tender.tender_type.map(|t| t.as_str()))
            .bind(tender.deadline)
            .bind(tender.status.as_str())
            .bind(&tender.tor_document_url)
            .bind(tender.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            tender_id = %tender.id,
            from = %previous_status,
            to = %tender.status,
            "Tender updated"
        );
        Ok(tender)
    }

    fn list(&self, filter: TenderFilter) -> BoxStream<'_, StoreResult<Tender>> {
        sqlx::query_as::<_, TenderRow>(LIST_TENDERS)
            .bind(filter.company_id.map(|id| id.to_string()))
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.tender_type.map(|t| t.as_str()))
            .bind(filter.title)
            .bind(order_key(filter.order))
            .fetch(&self.db)
            .map(|row| row.map_err(StoreError::from).and_then(Tender::try_from))
            .boxed()
    }
}
