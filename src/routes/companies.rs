//! Company routes
//!
//! Company registration and profile management.

use axum::extract::State;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{
    ApiJson, ApiPath, ApiQuery, Created, DataResponse, Paginated, PaginationParams,
};
use crate::app::AppState;
use crate::domain::{Company, CompanyFilter, CreateCompanyRequest, UpdateCompanyRequest};
use crate::error::ApiResult;
use crate::store::CompanyRepository;

/// POST /companies
pub async fn create_company(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateCompanyRequest>,
) -> ApiResult<Created<Company>> {
    tracing::info!(name = %req.name, "Registering company");

    let company = state.store.companies.create(req).await?;
    Ok(Created(company))
}

/// GET /companies
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<CompanyFilter>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> ApiResult<Paginated<Company>> {
    let page = Paginated::collect(state.store.companies.list(filter), &pagination).await?;
    Ok(page)
}

/// GET /companies/:company_id
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    ApiPath(company_id): ApiPath<Uuid>,
) -> ApiResult<DataResponse<Company>> {
    let company = state.store.companies.get(company_id).await?;
    Ok(DataResponse::new(company))
}

/// PATCH /companies/:company_id
pub async fn update_company(
    State(state): State<Arc<AppState>>,
    ApiPath(company_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateCompanyRequest>,
) -> ApiResult<DataResponse<Company>> {
    tracing::info!(company_id = %company_id, "Updating company profile");

    let company = state.store.companies.update(company_id, req).await?;
    Ok(DataResponse::new(company))
}
