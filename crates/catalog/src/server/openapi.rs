use utoipa::OpenApi;

use crate::server::error::{ApiErrorBody, ApiErrorResponse};
use crate::server::mappings::{MappingsResponse, UpsertMappingRequest};
use crate::view::{
    MappingChangeView, MappingView, NodeMetadataView, ResolutionView, SearchResultView, TreeEntry,
    TreeNodeView,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Schema tree browsing and canonical/display path mapping"
    ),
    paths(
        crate::server::health,
        crate::server::tree::get_tree,
        crate::server::tree::load_tree,
        crate::server::tree::list_children,
        crate::server::tree::get_node,
        crate::server::tree::search_tree,
        crate::server::mappings::list_mappings,
        crate::server::mappings::upsert_mapping,
        crate::server::mappings::delete_mapping,
        crate::server::mappings::resolve_path,
        crate::server::mappings::reverse_path,
        crate::server::events::stream_events,
    ),
    components(schemas(
        // Error
        ApiErrorResponse,
        ApiErrorBody,
        // Tree
        TreeNodeView,
        TreeEntry,
        NodeMetadataView,
        SearchResultView,
        // Mappings
        MappingView,
        MappingsResponse,
        UpsertMappingRequest,
        ResolutionView,
        // Events
        MappingChangeView,
    )),
    tags(
        (name = "system", description = "Health"),
        (name = "tree", description = "Document tree browsing and search"),
        (name = "mappings", description = "Canonical to display path mappings"),
        (name = "events", description = "Server-sent events"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/tree",
            "/tree/list",
            "/tree/node",
            "/tree/search",
            "/mappings",
            "/mappings/{id}",
            "/mappings/resolve",
            "/mappings/reverse",
            "/events",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn document_serializes() {
        let json = ApiDoc::openapi().to_pretty_json().expect("serialize spec");
        assert!(json.contains("\"title\": \"Catalog API\""));
        assert!(json.contains("UpsertMappingRequest"));
    }
}
