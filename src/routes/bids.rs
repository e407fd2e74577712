//! Bid routes
//!
//! Bid response drafting and submission for tenders.

use axum::extract::State;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{
    ApiJson, ApiPath, ApiQuery, Created, DataResponse, Paginated, PaginationParams,
};
use crate::app::AppState;
use crate::domain::{
    BidResponse, BidResponseFilter, CreateBidResponseRequest, UpdateBidResponseRequest,
};
use crate::error::ApiResult;
use crate::store::BidResponseRepository;

/// POST /bids
///
/// Start a draft bid for a tender. Submitting is a status update.
pub async fn create_bid(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateBidResponseRequest>,
) -> ApiResult<Created<BidResponse>> {
    tracing::info!(
        tender_id = %req.tender_id,
        company_id = %req.company_id,
        price_quote = ?req.price_quote,
        "Creating bid"
    );

    let bid = state.store.bids.create(req).await?;
    Ok(Created(bid))
}

/// GET /bids
///
/// Filters: `tender_id`, `company_id`, `status`, `order=price`.
pub async fn list_bids(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<BidResponseFilter>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> ApiResult<Paginated<BidResponse>> {
    tracing::info!(
        tender_id = ?filter.tender_id,
        company_id = ?filter.company_id,
        "Listing bids"
    );

    let page = Paginated::collect(state.store.bids.list(filter), &pagination).await?;
    Ok(page)
}

/// GET /bids/:bid_id
pub async fn get_bid(
    State(state): State<Arc<AppState>>,
    ApiPath(bid_id): ApiPath<Uuid>,
) -> ApiResult<DataResponse<BidResponse>> {
    let bid = state.store.bids.get(bid_id).await?;
    Ok(DataResponse::new(bid))
}

/// PATCH /bids/:bid_id
pub async fn update_bid(
    State(state): State<Arc<AppState>>,
    ApiPath(bid_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateBidResponseRequest>,
) -> ApiResult<DataResponse<BidResponse>> {
    tracing::info!(bid_id = %bid_id, status = ?req.status, "Updating bid");

    let bid = state.store.bids.update(bid_id, req).await?;
    Ok(DataResponse::new(bid))
}
