use axum::routing::{delete, get};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::Catalog;

pub mod error;
pub mod events;
pub mod mappings;
pub mod openapi;
pub mod tree;

/// A running catalog HTTP server.
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    state: Arc<ServerState>,
}

impl Server {
    /// Binds `bind_addr` and starts serving in the background.
    pub async fn start(catalog: Catalog, bind_addr: &str) -> Result<Self, String> {
        let state = Arc::new(ServerState { catalog });
        let app = router(state.clone());
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|error| format!("failed to bind {bind_addr}: {error}"))?;
        let addr = listener
            .local_addr()
            .map_err(|error| error.to_string())?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                tracing::error!("catalog server stopped with error: {error}");
            }
        });
        tracing::info!("catalog server listening on {addr}");

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
            state,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }

    pub fn shutdown(&mut self) -> Result<(), String> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| "failed to send server shutdown signal".to_string())
        } else {
            Ok(())
        }
    }

    /// Signals shutdown and waits for in-flight requests to finish.
    pub async fn stop(mut self) -> Result<(), String> {
        self.shutdown()?;
        if let Some(task) = self.task.take() {
            task.await.map_err(|error| format!("server task failed: {error}"))?;
        }
        Ok(())
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

/// Builds the catalog router over shared state.
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/health", get(health))
        .route("/tree", get(tree::get_tree).put(tree::load_tree))
        .route("/tree/list", get(tree::list_children))
        .route("/tree/node", get(tree::get_node))
        .route("/tree/search", get(tree::search_tree))
        .route(
            "/mappings",
            get(mappings::list_mappings).post(mappings::upsert_mapping),
        )
        .route("/mappings/resolve", get(mappings::resolve_path))
        .route("/mappings/reverse", get(mappings::reverse_path))
        .route("/mappings/:id", delete(mappings::delete_mapping))
        .route("/events", get(events::stream_events))
        .with_state(state)
        .layer(cors)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Server is up", body = String))
)]
pub(crate) async fn health() -> &'static str {
    "ok"
}

pub struct ServerState {
    pub(crate) catalog: Catalog,
}

impl ServerState {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}
