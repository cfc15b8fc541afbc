use std::collections::HashSet;

use url::Url;

/// Token that distinguishes a table-of-contents page from its adopted text.
pub const INDEX_MARKER: &str = "-TOC";

/// Adopted-text URL for a table-of-contents URL.
pub fn document_url(toc_url: &str) -> String {
    toc_url.replace(INDEX_MARKER, "")
}

/// Resolve an `href` found on `base`. Fragment-only, query-only and
/// `javascript:` references do not point at another page and yield `None`.
pub fn resolve_href(base: &str, href: &str) -> Option<String> {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url.into());
    }
    Url::parse(base)
        .ok()
        .and_then(|base| base.join(trimmed).ok())
        .map(Into::into)
}

/// Bookkeeping for one walk over the linked table-of-contents pages.
#[derive(Debug, Clone, Default)]
pub struct TraversalState {
    visited: HashSet<String>,
    documents: Vec<String>,
    current: Option<String>,
}

impl TraversalState {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            current: Some(seed.into()),
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Claim the current page for fetching. Returns `None` when the walk is
    /// over or the current page was already visited.
    pub fn advance(&mut self) -> Option<String> {
        let current = self.current.take()?;
        if !self.visited.insert(current.clone()) {
            self.current = Some(current);
            return None;
        }
        Some(current)
    }

    /// Whether the walk stopped on a page seen before.
    pub fn is_cycle(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| self.visited.contains(current))
    }

    /// Record a page reached through a recovered URL.
    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    /// Record a successfully fetched table-of-contents page.
    pub fn record_page(&mut self, toc_url: &str) {
        self.documents.push(document_url(toc_url));
    }

    pub fn set_next(&mut self, next: Option<String>) {
        self.current = next;
    }

    pub fn into_documents(self) -> Vec<String> {
        self.documents
    }
}
