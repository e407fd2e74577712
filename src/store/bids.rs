//! SQLite implementation of [`BidResponseRepository`].

use chrono::{DateTime, Utc};
use futures::stream::{BoxStream, StreamExt};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::lifecycle::{self, Stamp};
use super::validate::{self, URL_MAX};
use super::{begin_write, ensure_exists, parse_id, BidResponseRepository, StoreError, StoreResult};
use crate::domain::{
    BidOrder, BidResponse, BidResponseFilter, BidStatus, CreateBidResponseRequest,
    UpdateBidResponseRequest,
};

const SELECT_BID: &str = r#"
    SELECT id, tender_id, company_id, proposal_text, price_quote, pdf_url, status,
           submitted_at, created_at, updated_at
    FROM bid_responses
    WHERE id = ?1
"#;

// Unpriced bids sort first under price ordering (NULLs lead in SQLite).
const LIST_BIDS: &str = r#"
    SELECT id, tender_id, company_id, proposal_text, price_quote, pdf_url, status,
           submitted_at, created_at, updated_at
    FROM bid_responses
    WHERE (?1 IS NULL OR tender_id = ?1)
      AND (?2 IS NULL OR company_id = ?2)
      AND (?3 IS NULL OR status = ?3)
    ORDER BY CASE ?4 WHEN 'price' THEN price_quote END, rowid
"#;

const INSERT_BID: &str = r#"
    INSERT INTO bid_responses (id, tender_id, company_id, proposal_text, price_quote, pdf_url,
                               status, submitted_at, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

const UPDATE_BID: &str = r#"
    UPDATE bid_responses
    SET proposal_text = ?2, price_quote = ?3, pdf_url = ?4, status = ?5, submitted_at = ?6,
        updated_at = ?7
    WHERE id = ?1
"#;

/// Database row for bid response
#[derive(Debug, sqlx::FromRow)]
struct BidRow {
    id: String,
    tender_id: String,
    company_id: String,
    proposal_text: Option<String>,
    price_quote: Option<f64>,
    pdf_url: Option<String>,
    status: String,
    submitted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BidRow> for BidResponse {
    type Error = StoreError;

    fn try_from(row: BidRow) -> StoreResult<Self> {
        Ok(Self {
            id: parse_id("id", &row.id)?,
            tender_id: parse_id("tender_id", &row.tender_id)?,
            company_id: parse_id("company_id", &row.company_id)?,
            proposal_text: row.proposal_text,
            price_quote: row.price_quote,
            pdf_url: row.pdf_url,
            status: row.status.parse()?,
            submitted_at: row.submitted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn validate_bid(bid: &BidResponse) -> StoreResult<()> {
    validate::finite("price_quote", bid.price_quote)?;
    validate::optional("pdf_url", bid.pdf_url.as_deref(), URL_MAX)?;
    Ok(())
}

fn order_key(order: BidOrder) -> &'static str {
    match order {
        BidOrder::Inserted => "inserted",
        BidOrder::Price => "price",
    }
}

/// SQLite implementation of the BidResponse repository.
#[derive(Clone)]
pub struct SqliteBidResponseRepository {
    db: SqlitePool,
}

impl SqliteBidResponseRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

impl BidResponseRepository for SqliteBidResponseRepository {
    async fn create(&self, input: CreateBidResponseRequest) -> StoreResult<BidResponse> {
        let stamp = Stamp::new();
        let bid = BidResponse {
            id: stamp.id,
            tender_id: input.tender_id,
            company_id: input.company_id,
            proposal_text: input.proposal_text,
            price_quote: input.price_quote,
            pdf_url: input.pdf_url,
            status: BidStatus::Draft,
            submitted_at: None,
            created_at: stamp.at,
            updated_at: stamp.at,
        };
        validate_bid(&bid)?;

        let mut tx = begin_write(&self.db, "bid_responses").await?;
        ensure_exists(&mut tx, "tenders", "tender", bid.tender_id).await?;
        ensure_exists(&mut tx, "companies", "company", bid.company_id).await?;

        sqlx::query(INSERT_BID)
            .bind(bid.id.to_string())
            .bind(bid.tender_id.to_string())
            .bind(bid.company_id.to_string())
            .bind(&bid.proposal_text)
            .bind(bid.price_quote)
            .bind(&bid.pdf_url)
            .bind(bid.status.as_str())
            .bind(bid.submitted_at)
            .bind(bid.created_at)
            .bind(bid.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            bid_id = %bid.id,
            tender_id = %bid.tender_id,
            company_id = %bid.company_id,
            "Bid response created"
        );
        Ok(bid)
    }

    async fn get(&self, id: Uuid) -> StoreResult<BidResponse> {
        let row = sqlx::query_as::<_, BidRow>(SELECT_BID)
            .bind(id.to_string())
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("bid response", id))?;

        row.try_into()
    }

    async fn update(&self, id: Uuid, input: UpdateBidResponseRequest) -> StoreResult<BidResponse> {
        let mut tx = begin_write(&self.db, "bid_responses").await?;

        let row = sqlx::query_as::<_, BidRow>(SELECT_BID)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::not_found("bid response", id))?;

        let mut bid = BidResponse::try_from(row)?;
        let previous_status = bid.status;
        let at = lifecycle::touch(bid.updated_at);
        bid.apply(input, at);
        bid.updated_at = at;
        validate_bid(&bid)?;

        sqlx::query(UPDATE_BID)
            .bind(bid.id.to_string())
            .bind(&bid.proposal_text)
            .bind(bid.price_quote)
            .bind(&bid.pdf_url)
            .bind(bid.status.as_str())
            .bind(bid.submitted_at)
            .bind(bid.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if previous_status != bid.status {
            tracing::info!(
                bid_id = %bid.id,
                from = %previous_status,
                to = %bid.status,
                submitted_at = ?bid.submitted_at,
                "Bid response status changed"
            );
        } else {
            tracing::debug!(bid_id = %bid.id, "Bid response updated");
        }
        Ok(bid)
    }

    fn list(&self, filter: BidResponseFilter) -> BoxStream<'_, StoreResult<BidResponse>> {
        sqlx::query_as::<_, BidRow>(LIST_BIDS)
            .bind(filter.tender_id.map(|id| id.to_string()))
            .bind(filter.company_id.map(|id| id.to_string()))
            .bind(filter.status.map(|s| s.as_str()))
            .bind(order_key(filter.order))
            .fetch(&self.db)
            .map(|row| row.map_err(StoreError::from).and_then(BidResponse::try_from))
            .boxed()
    }
}
