use std::path::{Path, PathBuf};
use std::sync::Arc;

use harvester_core::Record;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::persist::{AtomicFileWriter, PersistError};

/// Produces the timestamp written into the manifest.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct ExportOptions {
    pub records_filename: String,
    pub manifest_filename: Option<String>,
    pub exported_utc: Clock,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            records_filename: "records.jsonl".to_string(),
            manifest_filename: Some("manifest.json".to_string()),
            exported_utc: Arc::new(|| chrono::Utc::now().to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub record_count: usize,
    pub sha256: String,
    pub output_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Records as JSON Lines, one `{"URL", "text", "source"}` object per line.
pub fn records_to_jsonl(records: &[Record]) -> Result<String, serde_json::Error> {
    let mut buffer = String::new();
    for record in records {
        buffer.push_str(&serde_json::to_string(record)?);
        buffer.push('\n');
    }
    Ok(buffer)
}

pub fn export_records(
    output_dir: &Path,
    records: &[Record],
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let body = records_to_jsonl(records)?;
    let sha256 = hex_digest(body.as_bytes());

    let writer = AtomicFileWriter::new(output_dir)?;
    let output_path = writer.write(&options.records_filename, body.as_bytes())?;

    let manifest_path = if let Some(name) = options.manifest_filename.as_deref() {
        let mut sources: Vec<&str> = records.iter().map(|r| r.source.as_str()).collect();
        sources.sort_unstable();
        sources.dedup();
        let manifest = json!({
            "record_count": records.len(),
            "sources": sources,
            "exported_utc": (options.exported_utc)(),
            "sha256": sha256,
            "files": [options.records_filename],
        });
        let path = writer.write(name, serde_json::to_string_pretty(&manifest)?.as_bytes())?;
        Some(path)
    } else {
        None
    };

    Ok(ExportSummary {
        record_count: records.len(),
        sha256,
        output_path,
        manifest_path,
    })
}

fn hex_digest(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jsonl_uses_uppercase_url_key() {
        let records = vec![Record::new("https://a", "tekst", "bron")];
        let body = records_to_jsonl(&records).unwrap();
        assert_eq!(body, "{\"URL\":\"https://a\",\"text\":\"tekst\",\"source\":\"bron\"}\n");
    }

    #[test]
    fn digest_of_empty_input() {
        assert_eq!(
            hex_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
