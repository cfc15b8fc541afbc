use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Charset named by the Content-Type header, if any.
    pub declared_label: Option<String>,
}

impl DecodedHtml {
    /// True when the header named a charset other than the one used.
    pub fn declared_mismatch(&self) -> bool {
        self.declared_label
            .as_deref()
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .is_some_and(|declared| !declared.name().eq_ignore_ascii_case(&self.encoding_label))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode raw bytes into UTF-8 using: BOM -> detected encoding -> Content-Type charset.
///
/// Older archive pages declare ISO-8859-1 while serving UTF-8, so the header
/// only counts when the bytes carry no usable signal of their own.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    let declared_label = content_type.and_then(extract_charset);

    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding, declared_label);
    }

    let mut detector = EncodingDetector::new();
    let has_non_ascii = detector.feed(bytes, true);
    if has_non_ascii {
        let detected = detector.guess(None, true);
        return decode_with(bytes, detected, declared_label);
    }

    // Pure ASCII decodes the same under any ASCII-compatible label.
    let encoding = declared_label
        .as_deref()
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(encoding_rs::UTF_8);
    decode_with(bytes, encoding, declared_label)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.trim().split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\''].as_ref()))
        })
        .find(|value| !value.is_empty())
        .map(|s| s.to_string())
}

fn decode_with(
    bytes: &[u8],
    enc: &'static Encoding,
    declared_label: Option<String>,
) -> Result<DecodedHtml, DecodeError> {
    let (text, used, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: used.name().to_string(),
            message: "decoding error".into(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        declared_label,
    })
}

#[cfg(test)]
mod tests {
    use super::extract_charset;

    #[test]
    fn charset_parameter_is_case_insensitive() {
        assert_eq!(
            extract_charset("text/html; Charset=\"ISO-8859-1\"").as_deref(),
            Some("ISO-8859-1")
        );
        assert_eq!(extract_charset("text/html").as_deref(), None);
        assert_eq!(extract_charset("text/html; charset=").as_deref(), None);
    }
}
