pub mod bids;
pub mod companies;
pub mod health;
pub mod templates;
pub mod tenders;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Companies
        .route(
            "/companies",
            post(companies::create_company).get(companies::list_companies),
        )
        .route(
            "/companies/:company_id",
            get(companies::get_company).patch(companies::update_company),
        )
        // Tenders
        .route(
            "/tenders",
            post(tenders::create_tender).get(tenders::list_tenders),
        )
        .route(
            "/tenders/:tender_id",
            get(tenders::get_tender).patch(tenders::update_tender),
        )
        // Bid responses
        .route("/bids", post(bids::create_bid).get(bids::list_bids))
        .route("/bids/:bid_id", get(bids::get_bid).patch(bids::update_bid))
        // Templates
        .route(
            "/templates",
            post(templates::create_template).get(templates::list_templates),
        )
        .route(
            "/templates/:template_id",
            get(templates::get_template).patch(templates::update_template),
        )
        .route(
            "/templates/:template_id/deactivate",
            post(templates::deactivate_template),
        )
}
