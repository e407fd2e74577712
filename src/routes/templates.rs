//! Template routes

use axum::extract::State;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{
    ApiJson, ApiPath, ApiQuery, Created, DataResponse, Paginated, PaginationParams,
};
use crate::app::AppState;
use crate::domain::{CreateTemplateRequest, Template, TemplateFilter, UpdateTemplateRequest};
use crate::error::ApiResult;
use crate::store::TemplateRepository;

/// POST /templates
pub async fn create_template(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTemplateRequest>,
) -> ApiResult<Created<Template>> {
    tracing::info!(
        company_id = %req.company_id,
        name = %req.name,
        category = ?req.category,
        "Creating template"
    );

    let template = state.store.templates.create(req).await?;
    Ok(Created(template))
}

/// GET /templates
///
/// Filters: `company_id`, `category`, `is_active`.
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<TemplateFilter>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> ApiResult<Paginated<Template>> {
    let page = Paginated::collect(state.store.templates.list(filter), &pagination).await?;
    Ok(page)
}

/// GET /templates/:template_id
pub async fn get_template(
    State(state): State<Arc<AppState>>,
    ApiPath(template_id): ApiPath<Uuid>,
) -> ApiResult<DataResponse<Template>> {
    let template = state.store.templates.get(template_id).await?;
    Ok(DataResponse::new(template))
}

/// PATCH /templates/:template_id
pub async fn update_template(
    State(state): State<Arc<AppState>>,
    ApiPath(template_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateTemplateRequest>,
) -> ApiResult<DataResponse<Template>> {
    tracing::info!(template_id = %template_id, "Updating template");

    let template = state.store.templates.update(template_id, req).await?;
    Ok(DataResponse::new(template))
}

/// POST /templates/:template_id/deactivate
pub async fn deactivate_template(
    State(state): State<Arc<AppState>>,
    ApiPath(template_id): ApiPath<Uuid>,
) -> ApiResult<DataResponse<Template>> {
    tracing::info!(template_id = %template_id, "Deactivating template");

    let template = state.store.templates.deactivate(template_id).await?;
    Ok(DataResponse::new(template))
}
