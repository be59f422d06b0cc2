//! Axum handlers for the metadata lookup routes.
//!
//! Successful lookups and every group listing carry the service's
//! `Cache-Control` directive; misses are 404 without one.

use crate::error::ApiError;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use metalookup_common::Metadata;
use metalookup_service::{CacheDirective, Lookup, LookupService};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /metadata/{id}
///
/// # Errors
/// 404 when no entity has this id (including ids that are not well formed),
/// 500 on store failure.
pub async fn get_metadata_by_id(
    State(service): State<Arc<LookupService>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let outcome = service.get_by_id(&id)?;
    render_lookup(&service, outcome)
}

/// GET /metadata/{group}/{name}
///
/// # Errors
/// 404 when the group has no entity with this name, 500 on store failure.
pub async fn get_metadata_by_group_and_name(
    State(service): State<Arc<LookupService>>,
    Path((group, name)): Path<(String, String)>,
) -> Result<Response> {
    let outcome = service.get_by_group_and_name(&group, &name)?;
    render_lookup(&service, outcome)
}

/// GET /metadata/groups/{group}
///
/// # Errors
/// 500 on store failure. An unknown group is an empty array.
pub async fn list_metadata_by_group(
    State(service): State<Arc<LookupService>>,
    Path(group): Path<String>,
) -> Result<Response> {
    let items = service.list_by_group(&group)?;
    let directive = service.cache_policy().directive_for(&items);
    Ok(with_cache_control(directive, items))
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "healthy" })))
}

// ---- Helpers ----

fn render_lookup(service: &LookupService, outcome: Lookup<Metadata>) -> Result<Response> {
    let directive = service.cache_policy().directive_for(&outcome);
    match outcome {
        Lookup::Found(metadata) => Ok(with_cache_control(directive, metadata)),
        Lookup::NotFound(nf) => Err(ApiError::not_found(nf.into_message())),
    }
}

fn with_cache_control<T: Serialize>(directive: Option<CacheDirective>, body: T) -> Response {
    let mut response = Json(body).into_response();
    if let Some(directive) = directive {
        match HeaderValue::from_str(&directive.to_string()) {
            Ok(value) => {
                response.headers_mut().insert(header::CACHE_CONTROL, value);
            }
            Err(e) => warn!("Dropping Cache-Control {}: {}", directive, e),
        }
    }
    response
}
