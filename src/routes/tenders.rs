//! Tender routes

use axum::extract::State;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{
    ApiJson, ApiPath, ApiQuery, Created, DataResponse, Paginated, PaginationParams,
};
use crate::app::AppState;
use crate::domain::{CreateTenderRequest, Tender, TenderFilter, UpdateTenderRequest};
use crate::error::ApiResult;
use crate::store::TenderRepository;

/// POST /tenders
///
/// New tenders always start in draft.
pub async fn create_tender(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTenderRequest>,
) -> ApiResult<Created<Tender>> {
    tracing::info!(
        company_id = %req.company_id,
        title = %req.title,
        tender_type = ?req.tender_type,
        "Creating tender"
    );

    let tender = state.store.tenders.create(req).await?;
    Ok(Created(tender))
}

/// GET /tenders
///
/// Filters: `company_id`, `status`, `tender_type`, `title` (substring),
/// `order=deadline`.
pub async fn list_tenders(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<TenderFilter>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> ApiResult<Paginated<Tender>> {
    tracing::info!(
        company_id = ?filter.company_id,
        status = ?filter.status,
        page = pagination.page(),
        per_page = pagination.per_page(),
        "Listing tenders"
    );

    let page = Paginated::collect(state.store.tenders.list(filter), &pagination).await?;
    Ok(page)
}

/// GET /tenders/:tender_id
pub async fn get_tender(
    State(state): State<Arc<AppState>>,
    ApiPath(tender_id): ApiPath<Uuid>,
) -> ApiResult<DataResponse<Tender>> {
    let tender = state.store.tenders.get(tender_id).await?;
    Ok(DataResponse::new(tender))
}

/// PATCH /tenders/:tender_id
pub async fn update_tender(
    State(state): State<Arc<AppState>>,
    ApiPath(tender_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateTenderRequest>,
) -> ApiResult<DataResponse<Tender>> {
    tracing::info!(tender_id = %tender_id, status = ?req.status, "Updating tender");

    let tender = state.store.tenders.update(tender_id, req).await?;
    Ok(DataResponse::new(tender))
}
