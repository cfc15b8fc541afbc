use engine_logging::{engine_debug, engine_info};
use harvester_core::{Record, DEFAULT_SOURCE_LABEL};
use thiserror::Error;

use crate::traverse::{traverse, StopReason};
use crate::{
    decode_html, DecodeError, DocumentOutcome, EngineEvent, Extractor, FetchError, Fetcher,
    ParagraphExtractor, ProgressSink,
};

/// First table of contents in the Dutch adopted-texts archive.
pub const DEFAULT_SEED_URL: &str =
    "https://www.europarl.europa.eu/doceo/document/TA-5-1999-07-21-TOC_NL.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSettings {
    pub seed_url: String,
    pub source_label: String,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    pub records: Vec<Record>,
    /// How the table-of-contents walk ended.
    pub stop: StopReason,
    pub skipped: usize,
    pub failed: usize,
}

/// Drives traversal, then fetches, extracts and cleans each adopted text in
/// order. A failing document is reported and skipped; it never ends the run.
pub struct Harvester<'a> {
    fetcher: &'a dyn Fetcher,
    extractor: &'a dyn Extractor,
    settings: HarvestSettings,
}

impl<'a> Harvester<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, settings: HarvestSettings) -> Self {
        Self::with_extractor(fetcher, &ParagraphExtractor, settings)
    }

    pub fn with_extractor(
        fetcher: &'a dyn Fetcher,
        extractor: &'a dyn Extractor,
        settings: HarvestSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            settings,
        }
    }

    pub async fn harvest(&self, sink: &dyn ProgressSink) -> HarvestReport {
        let traversal = traverse(self.fetcher, &self.settings.seed_url, sink).await;
        let total = traversal.urls.len();
        engine_info!("Harvesting {} adopted texts", total);
        sink.emit(EngineEvent::HarvestStarted { total });

        let mut report = HarvestReport {
            records: Vec::with_capacity(total),
            stop: traversal.stop,
            skipped: 0,
            failed: 0,
        };

        for (index, url) in traversal.urls.into_iter().enumerate() {
            let outcome = match self.fetch_text(&url).await {
                Ok(Some(text)) => {
                    report
                        .records
                        .push(Record::new(url.as_str(), text, self.settings.source_label.as_str()));
                    DocumentOutcome::Recorded
                }
                Ok(None) => {
                    engine_debug!("No content at {}", url);
                    report.skipped += 1;
                    DocumentOutcome::Skipped
                }
                Err(err) => {
                    engine_debug!("Failed to scrape {}: {}", url, err);
                    report.failed += 1;
                    DocumentOutcome::Failed(err.to_string())
                }
            };
            sink.emit(EngineEvent::DocumentFinished {
                index,
                url,
                outcome,
            });
        }

        engine_info!(
            "Harvest done: {} records, {} skipped, {} failed",
            report.records.len(),
            report.skipped,
            report.failed
        );
        report
    }

    async fn fetch_text(&self, url: &str) -> Result<Option<String>, HarvestError> {
        let page = self.fetcher.fetch(url).await?;
        let decoded = decode_html(&page.bytes, page.metadata.content_type.as_deref())?;
        if decoded.declared_mismatch() {
            engine_debug!(
                "{} declares {:?} but decodes as {}",
                url,
                decoded.declared_label,
                decoded.encoding_label
            );
        }
        Ok(self.extractor.extract(&decoded.html))
    }
}
