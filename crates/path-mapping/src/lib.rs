//! Canonical to display path mapping.
//!
//! A [`MappingStore`] owns the set of [`PathMapping`] overrides and rebuilds a
//! [`ResolverIndex`] on every change. The [`PathResolver`] it hands out
//! resolves canonical paths by exact match, then by the longest
//! segment-aligned prefix, falling back to the path itself.

pub mod backend;
pub mod error;
pub mod event;
pub mod index;
pub mod levels;
pub mod mapping;
pub mod resolver;
pub mod store;

pub use backend::{
    decode_mappings, encode_mappings, MappingBackend, MappingSnapshot, MemoryBackend,
};
pub use error::{MappingError, Result};
pub use event::{ChangeKind, MappingChange};
pub use index::{MatchKind, Resolution, ResolverIndex};
pub use levels::{join_levels, split_levels, Levels, LEVEL_COUNT};
pub use mapping::{MappingId, MappingInput, PathMapping};
pub use resolver::PathResolver;
pub use store::{MappingStore, DEFAULT_EVENT_CAPACITY};
