//! HTTP API for `Metalookup`.
//!
//! Exposes the lookup service as an Axum router:
//!
//! | Route | Lookup |
//! |---|---|
//! | `GET /metadata/{id}` | by id |
//! | `GET /metadata/{group}/{name}` | by group and name |
//! | `GET /metadata/groups/{group}` | all members of a group |
//! | `GET /health` | liveness |
//!
//! The static `groups` segment wins over `{group}`, so a group literally
//! named `groups` is only reachable through the listing route.

pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use metalookup_service::LookupService;
use std::sync::Arc;

/// Build the metadata API router.
pub fn router(service: Arc<LookupService>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/metadata/groups/{group}",
            get(handlers::list_metadata_by_group),
        )
        .route("/metadata/{id}", get(handlers::get_metadata_by_id))
        .route(
            "/metadata/{group}/{name}",
            get(handlers::get_metadata_by_group_and_name),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests;
