use harvester_core::clean;
use scraper::{Html, Selector};

/// Cleaned text must be longer than this many characters to count as content.
pub const MIN_TEXT_CHARS: usize = 50;

pub trait Extractor: Send + Sync {
    /// Cleaned body text of a page, or `None` for stub pages.
    fn extract(&self, html: &str) -> Option<String>;
}

/// Collects every non-blank `<p>` element, one paragraph per line, and runs
/// the result through the cleanup pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParagraphExtractor;

impl ParagraphExtractor {
    pub fn paragraphs(&self, html: &str) -> Vec<String> {
        let doc = Html::parse_document(html);
        let Ok(selector) = Selector::parse("p") else {
            return Vec::new();
        };
        doc.select(&selector)
            .map(|p| {
                p.text()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl Extractor for ParagraphExtractor {
    fn extract(&self, html: &str) -> Option<String> {
        let text = clean(&self.paragraphs(html).join("\n"));
        (text.chars().count() > MIN_TEXT_CHARS).then_some(text)
    }
}
