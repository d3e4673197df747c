use serde::Serialize;
use tokio::sync::broadcast;

use crate::mapping::MappingId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Upserted,
    Deleted,
}

/// Published after every successful mapping mutation.
///
/// `display_path` is what `resolve(canonical_path)` returns once the change
/// is visible: the new mapping for upserts, the fallback resolution for
/// deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingChange {
    pub revision: u64,
    pub kind: ChangeKind,
    pub id: MappingId,
    pub canonical_path: String,
    pub display_path: String,
}

#[derive(Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<MappingChange>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MappingChange> {
        self.sender.subscribe()
    }

    /// Publishes to current subscribers, returning how many received it.
    /// Having no subscribers is not an error.
    pub fn publish(&self, change: MappingChange) -> usize {
        self.sender.send(change).unwrap_or(0)
    }
}
