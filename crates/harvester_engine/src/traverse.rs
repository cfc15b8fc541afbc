use engine_logging::{engine_debug, engine_info, engine_warn};
use harvester_core::{normalize_term, TraversalState};

use crate::links::find_next_link;
use crate::{decode_html, EngineEvent, FetchError, FetchOutput, Fetcher, ProgressSink};

/// Why the walk over the table-of-contents chain ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The last page had no next link.
    Exhausted,
    /// The next link pointed at a page already visited.
    Cycle { url: String },
    /// A page was missing and term normalization could not recover it.
    NotFound { url: String },
    /// Any other fetch failure. Pages collected before it are kept.
    Failed { url: String, error: FetchError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    /// Adopted-text URLs in discovery order.
    pub urls: Vec<String>,
    pub stop: StopReason,
}

/// Walk the "next page" chain from `seed`, collecting one adopted-text URL per
/// table-of-contents page. Never fails; problems end the walk early and are
/// reported through [`Traversal::stop`].
pub async fn traverse(fetcher: &dyn Fetcher, seed: &str, sink: &dyn ProgressSink) -> Traversal {
    let mut state = TraversalState::new(seed);

    let stop = loop {
        let Some(requested) = state.advance() else {
            break match state.current() {
                Some(url) if state.is_cycle() => StopReason::Cycle {
                    url: url.to_string(),
                },
                _ => StopReason::Exhausted,
            };
        };

        let (current, page) = match fetch_with_recovery(fetcher, &requested).await {
            Ok(found) => found,
            Err(stop) => break stop,
        };
        if current != requested {
            state.mark_visited(&current);
        }

        engine_debug!("Visited table of contents {}", current);
        sink.emit(EngineEvent::TocVisited {
            url: current.clone(),
        });
        state.record_page(&current);

        // Only the navigation anchors matter here, so a lossy decode will do.
        let html = decode_html(&page.bytes, page.metadata.content_type.as_deref())
            .map(|decoded| decoded.html)
            .unwrap_or_else(|err| {
                engine_debug!("Lossy decode of {}: {}", current, err);
                String::from_utf8_lossy(&page.bytes).into_owned()
            });
        state.set_next(find_next_link(&html, &current));
    };

    match &stop {
        StopReason::Failed { url, error } => {
            engine_warn!("Traversal stopped at {}: {}", url, error)
        }
        other => engine_info!("Traversal finished: {:?}", other),
    }
    let urls = state.into_documents();
    sink.emit(EngineEvent::TraversalFinished {
        pages: urls.len(),
        stop: stop.clone(),
    });
    Traversal { urls, stop }
}

/// Fetch `url`; on 404 retry once with the term-normalized URL.
async fn fetch_with_recovery(
    fetcher: &dyn Fetcher,
    url: &str,
) -> Result<(String, FetchOutput), StopReason> {
    let err = match fetcher.fetch(url).await {
        Ok(page) => return Ok((url.to_string(), page)),
        Err(err) => err,
    };
    if !err.is_not_found() {
        return Err(StopReason::Failed {
            url: url.to_string(),
            error: err,
        });
    }

    let fixed = normalize_term(url);
    if fixed == url {
        return Err(StopReason::NotFound {
            url: url.to_string(),
        });
    }

    engine_info!("{} not found, retrying as {}", url, fixed);
    match fetcher.fetch(&fixed).await {
        Ok(page) => Ok((fixed, page)),
        Err(err) if err.is_not_found() => Err(StopReason::NotFound { url: fixed }),
        Err(err) => Err(StopReason::Failed {
            url: fixed,
            error: err,
        }),
    }
}
