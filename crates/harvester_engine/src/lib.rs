//! Harvester engine: fetching, decoding, traversal, extraction and the
//! export/publish sinks.
mod decode;
mod export;
mod extract;
mod fetch;
mod harvest;
mod links;
mod persist;
mod progress;
mod publish;
mod traverse;
mod types;

pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use export::{export_records, records_to_jsonl, Clock, ExportError, ExportOptions, ExportSummary};
pub use extract::{Extractor, ParagraphExtractor, MIN_TEXT_CHARS};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_MAX_BYTES};
pub use harvest::{HarvestError, HarvestReport, HarvestSettings, Harvester, DEFAULT_SEED_URL};
pub use links::{find_next_link, NEXT_LINK_LABEL};
pub use persist::{AtomicFileWriter, PersistError};
pub use progress::{NoopProgressSink, ProgressSink};
pub use publish::{HubPublisher, HubSettings, PublishError, PublishReport, Publisher};
pub use traverse::{traverse, StopReason, Traversal};
pub use types::{DocumentOutcome, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput};
