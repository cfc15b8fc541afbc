//! Harvester core: pure URL, traversal and text-cleanup logic (no IO).
mod cleanup;
mod normalize;
mod record;
mod traversal;

pub use cleanup::{clean, CleanupRule, CLEANUP_RULES};
pub use normalize::{expected_term, normalize_term, TermRange, TERM_RANGES};
pub use record::{Record, DEFAULT_SOURCE_LABEL};
pub use traversal::{document_url, resolve_href, TraversalState, INDEX_MARKER};
