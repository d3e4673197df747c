//! Document tree endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::server::error::{ApiError, ApiErrorResponse};
use crate::server::ServerState;
use crate::view::{SearchResultView, TreeEntry, TreeNodeView};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TreePathQuery {
    /// `/`-separated display names from a root. Empty addresses the roots.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TreeSearchQuery {
    /// Case-insensitive substring to look for in names and values.
    #[serde(default)]
    pub q: String,
}

#[utoipa::path(
    get,
    path = "/tree",
    tag = "tree",
    responses((status = 200, description = "Current document forest", body = [TreeNodeView]))
)]
pub(crate) async fn get_tree(State(state): State<Arc<ServerState>>) -> Json<Vec<TreeNodeView>> {
    Json(state.catalog.tree())
}

/// Replaces the current document. Any JSON value is accepted; values other
/// than objects and arrays produce an empty forest.
#[utoipa::path(
    put,
    path = "/tree",
    tag = "tree",
    responses((status = 200, description = "Forest built from the document", body = [TreeNodeView])),
    description = "Replace the browsed document with the JSON request body."
)]
pub(crate) async fn load_tree(
    State(state): State<Arc<ServerState>>,
    Json(document): Json<serde_json::Value>,
) -> Json<Vec<TreeNodeView>> {
    let forest = state.catalog.load_document(&document);
    Json(TreeNodeView::forest(&forest))
}

#[utoipa::path(
    get,
    path = "/tree/list",
    tag = "tree",
    params(TreePathQuery),
    responses(
        (status = 200, body = [TreeEntry]),
        (status = 400, description = "Path addresses a file", body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub(crate) async fn list_children(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<TreePathQuery>,
) -> Result<Json<Vec<TreeEntry>>, ApiError> {
    let entries = state.catalog.list(&query.path)?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/tree/node",
    tag = "tree",
    params(TreePathQuery),
    responses(
        (status = 200, body = TreeNodeView),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub(crate) async fn get_node(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<TreePathQuery>,
) -> Result<Json<TreeNodeView>, ApiError> {
    let node = state.catalog.get(&query.path)?;
    Ok(Json(node))
}

#[utoipa::path(
    get,
    path = "/tree/search",
    tag = "tree",
    params(TreeSearchQuery),
    responses((status = 200, body = [SearchResultView]))
)]
pub(crate) async fn search_tree(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<TreeSearchQuery>,
) -> Json<Vec<SearchResultView>> {
    Json(state.catalog.search(&query.q))
}
