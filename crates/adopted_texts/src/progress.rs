use engine_logging::engine_warn;
use harvester_engine::{DocumentOutcome, EngineEvent, ProgressSink, StopReason};
use indicatif::{ProgressBar, ProgressStyle};

/// Renders engine events on a terminal progress bar: a spinner while the
/// table-of-contents chain is walked, then a bar over the adopted texts.
///
/// Log lines emitted from here go out with the bar suspended so they do not
/// tear the bar.
pub struct BarProgressSink {
    bar: ProgressBar,
}

impl BarProgressSink {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new_spinner())
    }

    pub fn with_bar(bar: ProgressBar) -> Self {
        bar.set_message("Collecting adopted text URLs");
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for BarProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarProgressSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::TocVisited { url } => {
                self.bar.tick();
                self.bar.set_message(url);
            }
            EngineEvent::TraversalFinished { pages, stop } => {
                let note = match stop {
                    StopReason::Exhausted => String::new(),
                    StopReason::Cycle { url } => format!(" (link cycle at {url})"),
                    StopReason::NotFound { url } => format!(" (not found: {url})"),
                    StopReason::Failed { url, error } => format!(" (failed at {url}: {error})"),
                };
                self.bar
                    .println(format!("Found {pages} table-of-contents pages{note}"));
            }
            EngineEvent::HarvestStarted { total } => {
                self.bar.set_length(total as u64);
                self.bar.set_position(0);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("Scraping adopted texts [{elapsed_precise}] {bar:40} {pos}/{len} (eta {eta})")
                {
                    self.bar.set_style(style.progress_chars("=> "));
                }
                self.bar.set_message("");
            }
            EngineEvent::DocumentFinished { url, outcome, .. } => {
                if let DocumentOutcome::Failed(message) = outcome {
                    self.bar
                        .suspend(|| engine_warn!("Failed to scrape {}: {}", url, message));
                }
                self.bar.inc(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_finished_document_advances_the_bar() {
        let sink = BarProgressSink::with_bar(ProgressBar::hidden());
        sink.emit(EngineEvent::HarvestStarted { total: 3 });
        sink.emit(EngineEvent::DocumentFinished {
            index: 0,
            url: "https://ep/TA-5-1999-07-21_NL.html".to_string(),
            outcome: DocumentOutcome::Recorded,
        });
        sink.emit(EngineEvent::DocumentFinished {
            index: 1,
            url: "https://ep/TA-5-1999-07-22_NL.html".to_string(),
            outcome: DocumentOutcome::Failed("500 Internal Server Error".to_string()),
        });

        assert_eq!(sink.bar.length(), Some(3));
        assert_eq!(sink.bar.position(), 2);
    }

    #[test]
    fn traversal_summary_leaves_the_spinner_running() {
        let sink = BarProgressSink::with_bar(ProgressBar::hidden());
        sink.emit(EngineEvent::TocVisited {
            url: "https://ep/TA-5-1999-07-21-TOC_NL.html".to_string(),
        });
        sink.emit(EngineEvent::TraversalFinished {
            pages: 1,
            stop: StopReason::Exhausted,
        });
        assert!(!sink.bar.is_finished());
        sink.finish();
        assert!(sink.bar.is_finished());
    }
}
