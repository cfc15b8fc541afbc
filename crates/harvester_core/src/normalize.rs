use std::sync::LazyLock;

use regex::Regex;

static TERM_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TA-(\d)-(\d{4})").expect("valid regex"));

/// Inclusive year range that belongs to one parliamentary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermRange {
    pub first_year: u32,
    /// `None` means open-ended.
    pub last_year: Option<u32>,
    pub term: u32,
}

impl TermRange {
    pub fn contains(&self, year: u32) -> bool {
        year >= self.first_year && self.last_year.map_or(true, |last| year <= last)
    }
}

/// Checked in order; a boundary year resolves to the earlier range.
pub const TERM_RANGES: &[TermRange] = &[
    TermRange { first_year: 1999, last_year: Some(2004), term: 5 },
    TermRange { first_year: 2004, last_year: Some(2009), term: 6 },
    TermRange { first_year: 2009, last_year: Some(2014), term: 7 },
    TermRange { first_year: 2014, last_year: Some(2019), term: 8 },
    TermRange { first_year: 2019, last_year: None, term: 9 },
];

/// Term number the archive files `year` under, if the year is covered at all.
pub fn expected_term(year: u32) -> Option<u32> {
    TERM_RANGES
        .iter()
        .find(|range| range.contains(year))
        .map(|range| range.term)
}

/// Rewrite the `TA-<term>-<year>` token of an archive URL so the term matches
/// the year. URLs without the token, with an uncovered year, or with an
/// already consistent term are returned unchanged.
pub fn normalize_term(url: &str) -> String {
    let Some(caps) = TERM_TOKEN_RE.captures(url) else {
        return url.to_string();
    };
    let (Ok(term), Ok(year)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
        return url.to_string();
    };
    match expected_term(year) {
        Some(expected) if expected != term => {
            url.replace(&format!("TA-{term}-"), &format!("TA-{expected}-"))
        }
        _ => url.to_string(),
    }
}
