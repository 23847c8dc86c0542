//! HTTP server for the document access API.
//!
//! # Endpoints
//!
//! - `GET /health`: Health check endpoint (no identity required)
//! - `POST /documents`: Create a document (admin only)
//! - `GET /documents`: List documents visible to the caller
//! - `GET /documents/{id}`: Fetch a document (READ required)
//! - `DELETE /documents/{id}`: Delete a document (DELETE required)
//! - `POST /documents/{id}/grant`: Grant a permission (admin or WRITE holder)
//! - `POST /documents/access-check`: Filter a set of ids by permission
//!
//! Every `/documents` route requires the `X-User` header; see
//! [`identity`] for how the caller identity is resolved.

pub mod error;
pub mod handlers;
pub mod identity;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::access::{DocumentService, GrantService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub documents: DocumentService,
    pub grants: GrantService,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint (no identity required)
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    // Public routes (no identity)
    let public_routes = Router::new().route("/health", get(health));

    // Document routes (identity required)
    let document_routes = Router::new()
        .route(
            "/documents",
            post(handlers::create_document).get(handlers::list_documents),
        )
        .route(
            "/documents/{id}",
            get(handlers::get_document).delete(handlers::delete_document),
        )
        .route("/documents/{id}/grant", post(handlers::grant_permission))
        .route(
            "/documents/access-check",
            post(handlers::batch_access_check),
        )
        .layer(middleware::from_fn(identity::identity_middleware));

    Router::new()
        .merge(public_routes)
        .merge(document_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
