use harvester_core::resolve_href;
use scraper::{ElementRef, Html, Selector};

/// Navigation label of the archive's "next page" link.
pub const NEXT_LINK_LABEL: &str = "Volgende";

/// Absolute URL of the "next page" link on a table-of-contents page.
///
/// The anchor titled [`NEXT_LINK_LABEL`] wins; otherwise the first anchor
/// whose text mentions the label in any case. An anchor without a usable
/// `href` means there is no next page.
pub fn find_next_link(html: &str, base_url: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let anchors = Selector::parse("a").ok()?;

    let by_title = doc
        .select(&anchors)
        .find(|a| a.value().attr("title") == Some(NEXT_LINK_LABEL));
    let anchor = by_title.or_else(|| doc.select(&anchors).find(mentions_label))?;

    let href = anchor.value().attr("href")?;
    resolve_href(base_url, href)
}

fn mentions_label(anchor: &ElementRef) -> bool {
    let label = NEXT_LINK_LABEL.to_lowercase();
    anchor
        .text()
        .collect::<String>()
        .to_lowercase()
        .contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.europarl.europa.eu/doceo/document/TA-5-1999-07-21-TOC_NL.html";

    #[test]
    fn title_attribute_takes_precedence() {
        let html = r#"<a href="other.html">volgende sessie</a>
            <a title="Volgende" href="TA-5-1999-07-22-TOC_NL.html"><img src="next.png"></a>"#;
        assert_eq!(
            find_next_link(html, BASE).as_deref(),
            Some("https://www.europarl.europa.eu/doceo/document/TA-5-1999-07-22-TOC_NL.html")
        );
    }

    #[test]
    fn falls_back_to_case_insensitive_text() {
        let html = r#"<nav><a href="/prev.html">Vorige</a><a href="/next.html">VOLGENDE &gt;</a></nav>"#;
        assert_eq!(
            find_next_link(html, BASE).as_deref(),
            Some("https://www.europarl.europa.eu/next.html")
        );
    }

    #[test]
    fn anchor_without_href_ends_the_chain() {
        let html = r#"<a title="Volgende">Volgende</a><a href="/x.html">volgende</a>"#;
        assert_eq!(find_next_link(html, BASE), None);
    }

    #[test]
    fn page_without_next_link() {
        assert_eq!(find_next_link("<p>Laatste pagina</p>", BASE), None);
    }
}
