use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_LABEL: &str = "European Parliament Adopted Texts";

/// One harvested adopted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "URL")]
    pub url: String,
    pub text: String,
    pub source: String,
}

impl Record {
    pub fn new(url: impl Into<String>, text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            source: source.into(),
        }
    }
}
