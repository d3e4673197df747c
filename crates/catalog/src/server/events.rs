use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::server::ServerState;
use crate::view::MappingChangeView;

pub const MAPPING_CHANGED_EVENT: &str = "mapping.changed";

#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "Server-sent `mapping.changed` events", content_type = "text/event-stream", body = MappingChangeView),
    )
)]
pub(crate) async fn stream_events(
    State(state): State<Arc<ServerState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.catalog.mappings().subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|message| match message {
        Ok(change) => {
            let payload = MappingChangeView::from(change);
            match Event::default().event(MAPPING_CHANGED_EVENT).json_data(&payload) {
                Ok(event) => Some(Ok(event)),
                Err(error) => {
                    tracing::warn!("failed to encode mapping change: {error}");
                    None
                }
            }
        }
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!("event subscriber lagged, skipped {skipped} mapping changes");
            None
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
