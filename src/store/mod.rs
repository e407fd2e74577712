//! Bid domain store
//!
//! One repository per entity, each exposing `create`, `get`, `update` and a
//! lazy `list`. Every write runs in its own transaction; reference checks and
//! the read of the previous row happen inside that transaction. The store
//! never joins across entities: callers look related rows up by id.

pub mod bids;
pub mod companies;
pub mod error;
pub mod lifecycle;
pub mod templates;
pub mod tenders;
pub mod validate;

use futures::stream::BoxStream;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    BidResponse, BidResponseFilter, Company, CompanyFilter, CreateBidResponseRequest,
    CreateCompanyRequest, CreateTemplateRequest, CreateTenderRequest, Template, TemplateFilter,
    Tender, TenderFilter, UpdateBidResponseRequest, UpdateCompanyRequest, UpdateTemplateRequest,
    UpdateTenderRequest,
};

pub use bids::SqliteBidResponseRepository;
pub use companies::SqliteCompanyRepository;
pub use error::{StoreError, StoreResult};
pub use templates::SqliteTemplateRepository;
pub use tenders::SqliteTenderRepository;

// ---------------------------------------------------------------------------
// Repository traits
// ---------------------------------------------------------------------------

pub trait CompanyRepository: Send + Sync {
    fn create(
        &self,
        input: CreateCompanyRequest,
    ) -> impl Future<Output = StoreResult<Company>> + Send;
    fn get(&self, id: Uuid) -> impl Future<Output = StoreResult<Company>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateCompanyRequest,
    ) -> impl Future<Output = StoreResult<Company>> + Send;
    /// Matching companies in registration order. Each call re-runs the query.
    fn list(&self, filter: CompanyFilter) -> BoxStream<'_, StoreResult<Company>>;
}

pub trait TenderRepository: Send + Sync {
    fn create(&self, input: CreateTenderRequest)
        -> impl Future<Output = StoreResult<Tender>> + Send;
    fn get(&self, id: Uuid) -> impl Future<Output = StoreResult<Tender>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateTenderRequest,
    ) -> impl Future<Output = StoreResult<Tender>> + Send;
    fn list(&self, filter: TenderFilter) -> BoxStream<'_, StoreResult<Tender>>;
}

pub trait BidResponseRepository: Send + Sync {
    fn create(
        &self,
        input: CreateBidResponseRequest,
    ) -> impl Future<Output = StoreResult<BidResponse>> + Send;
    fn get(&self, id: Uuid) -> impl Future<Output = StoreResult<BidResponse>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateBidResponseRequest,
    ) -> impl Future<Output = StoreResult<BidResponse>> + Send;
    fn list(&self, filter: BidResponseFilter) -> BoxStream<'_, StoreResult<BidResponse>>;
}

pub trait TemplateRepository: Send + Sync {
    fn create(
        &self,
        input: CreateTemplateRequest,
    ) -> impl Future<Output = StoreResult<Template>> + Send;
    fn get(&self, id: Uuid) -> impl Future<Output = StoreResult<Template>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateTemplateRequest,
    ) -> impl Future<Output = StoreResult<Template>> + Send;
    /// Retire a template without removing it.
    fn deactivate(&self, id: Uuid) -> impl Future<Output = StoreResult<Template>> + Send;
    fn list(&self, filter: TemplateFilter) -> BoxStream<'_, StoreResult<Template>>;
}

// ---------------------------------------------------------------------------
// Store bundle
// ---------------------------------------------------------------------------

/// All four repositories over one connection pool.
#[derive(Clone)]
pub struct Store {
    pub companies: SqliteCompanyRepository,
    pub tenders: SqliteTenderRepository,
    pub bids: SqliteBidResponseRepository,
    pub templates: SqliteTemplateRepository,
}

impl Store {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            companies: SqliteCompanyRepository::new(db.clone()),
            tenders: SqliteTenderRepository::new(db.clone()),
            bids: SqliteBidResponseRepository::new(db.clone()),
            templates: SqliteTemplateRepository::new(db),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared row helpers
// ---------------------------------------------------------------------------

/// Parse an id column; a malformed value is reported as a decode failure.
pub(crate) fn parse_id(column: &str, raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| {
        StoreError::Database(sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
    })
}

/// Open a transaction that holds the database write lock from its first
/// statement.
///
/// `Pool::begin` issues a deferred `BEGIN`, and a deferred transaction that
/// reads before it writes cannot wait for the lock: SQLite answers
/// `SQLITE_BUSY` as soon as another connection is writing. Taking the lock
/// with a no-op write up front behaves like `BEGIN IMMEDIATE`, so concurrent
/// writers queue on the busy timeout instead of failing.
pub(crate) async fn begin_write(
    db: &SqlitePool,
    table: &'static str,
) -> StoreResult<Transaction<'static, Sqlite>> {
    let mut tx = db.begin().await?;
    let sql = format!("UPDATE {table} SET id = id WHERE 0");
    sqlx::query(&sql).execute(&mut *tx).await?;
    Ok(tx)
}

/// Fail with a reference error unless `table` holds a row with `id`.
pub(crate) async fn ensure_exists(
    conn: &mut SqliteConnection,
    table: &'static str,
    entity: &'static str,
    id: Uuid,
) -> StoreResult<()> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)");
    let exists: bool = sqlx::query_scalar(&sql)
        .bind(id.to_string())
        .fetch_one(&mut *conn)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(StoreError::missing_reference(entity, id))
    }
}
