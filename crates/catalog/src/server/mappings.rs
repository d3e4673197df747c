//! Mapping editor endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use path_mapping::{MappingId, MappingInput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::server::error::{ApiError, ApiErrorResponse};
use crate::server::ServerState;
use crate::view::{MappingView, ResolutionView};

#[derive(Debug, Serialize, ToSchema)]
pub struct MappingsResponse {
    pub revision: u64,
    pub mappings: Vec<MappingView>,
}

/// Mapping to insert or update. `levels` wins over `displayPath` when both
/// are given.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMappingRequest {
    pub id: Option<String>,
    pub canonical_path: String,
    pub display_path: Option<String>,
    pub levels: Option<Vec<String>>,
}

impl From<UpsertMappingRequest> for MappingInput {
    fn from(request: UpsertMappingRequest) -> Self {
        MappingInput {
            id: request.id.map(MappingId::from),
            canonical_path: request.canonical_path,
            display_path: request.display_path,
            levels: request.levels,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResolveQuery {
    pub path: String,
}

#[utoipa::path(
    get,
    path = "/mappings",
    tag = "mappings",
    responses((status = 200, body = MappingsResponse))
)]
pub(crate) async fn list_mappings(State(state): State<Arc<ServerState>>) -> Json<MappingsResponse> {
    let snapshot = state.catalog.mappings().snapshot();
    Json(MappingsResponse {
        revision: snapshot.revision,
        mappings: snapshot.mappings.iter().map(MappingView::from).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/mappings",
    tag = "mappings",
    request_body = UpsertMappingRequest,
    responses(
        (status = 200, description = "Mapping stored", body = MappingView),
        (status = 400, body = ApiErrorResponse),
        (status = 409, body = ApiErrorResponse),
    ),
    description = "Update the mapping with the given id or canonical path, or insert a new one."
)]
pub(crate) async fn upsert_mapping(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<UpsertMappingRequest>,
) -> Result<Json<MappingView>, ApiError> {
    let input = MappingInput::from(payload);
    let mapping = tokio::task::spawn_blocking(move || state.catalog.mappings().add_or_update(input))
        .await
        .map_err(|error| ApiError::internal(format!("task failed: {error}")))??;
    Ok(Json(mapping.into()))
}

#[utoipa::path(
    delete,
    path = "/mappings/{id}",
    tag = "mappings",
    params(("id" = String, Path, description = "Mapping id")),
    responses(
        (status = 200, description = "The removed mapping", body = MappingView),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub(crate) async fn delete_mapping(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<MappingView>, ApiError> {
    let id = MappingId::from(id);
    let removed = tokio::task::spawn_blocking(move || state.catalog.mappings().delete(&id))
        .await
        .map_err(|error| ApiError::internal(format!("task failed: {error}")))??;
    Ok(Json(removed.into()))
}

#[utoipa::path(
    get,
    path = "/mappings/resolve",
    tag = "mappings",
    params(ResolveQuery),
    responses((status = 200, body = ResolutionView))
)]
pub(crate) async fn resolve_path(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ResolveQuery>,
) -> Json<ResolutionView> {
    let resolution = state.catalog.mappings().resolver().lookup(&query.path);
    Json(ResolutionView::forward(&query.path, resolution))
}

#[utoipa::path(
    get,
    path = "/mappings/reverse",
    tag = "mappings",
    params(ResolveQuery),
    responses((status = 200, body = ResolutionView))
)]
pub(crate) async fn reverse_path(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ResolveQuery>,
) -> Json<ResolutionView> {
    let resolution = state.catalog.mappings().resolver().reverse_lookup(&query.path);
    Json(ResolutionView::reverse(&query.path, resolution))
}
