//! Dataset publishing to the Hugging Face Hub HTTP API.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use engine_logging::{engine_debug, engine_info};
use harvester_core::Record;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::export::records_to_jsonl;

#[derive(Debug, Clone)]
pub struct HubSettings {
    pub endpoint: String,
    pub path_in_repo: String,
    pub commit_summary: String,
    pub private: bool,
    pub request_timeout: Duration,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://huggingface.co".to_string(),
            path_in_repo: "data/train.jsonl".to_string(),
            commit_summary: "Upload adopted texts".to_string(),
            private: false,
            request_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("invalid destination id {0:?}, expected <namespace>/<name>")]
    InvalidDestination(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("{stage} failed with status {status}: {body}")]
    Status {
        stage: &'static str,
        status: u16,
        body: String,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub destination_id: String,
    pub record_count: usize,
    /// False when the dataset repository already existed.
    pub created: bool,
    pub commit_url: Option<String>,
}

#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        records: &[Record],
        destination_id: &str,
        token: &str,
    ) -> Result<PublishReport, PublishError>;
}

/// Creates the dataset repository if needed, then commits the records as a
/// single JSON Lines file, replacing any previous upload at the same path.
#[derive(Debug, Clone)]
pub struct HubPublisher {
    settings: HubSettings,
    client: reqwest::Client,
}

impl HubPublisher {
    pub fn new(settings: HubSettings) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| PublishError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.endpoint.trim_end_matches('/'), path)
    }

    async fn create_repo(&self, destination_id: &str, token: &str) -> Result<bool, PublishError> {
        let (organization, name) = split_destination(destination_id)?;
        let response = self
            .client
            .post(self.url("/api/repos/create"))
            .bearer_auth(token)
            .json(&json!({
                "name": name,
                "organization": organization,
                "type": "dataset",
                "private": self.settings.private,
            }))
            .send()
            .await
            .map_err(|err| PublishError::Network(err.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::CONFLICT => {
                engine_debug!("Dataset {} already exists", destination_id);
                Ok(false)
            }
            status => Err(status_error("create repo", status, response).await),
        }
    }

    async fn commit(
        &self,
        destination_id: &str,
        token: &str,
        payload: &[u8],
    ) -> Result<Option<String>, PublishError> {
        let header = json!({
            "key": "header",
            "value": { "summary": self.settings.commit_summary, "description": "" },
        });
        let file = json!({
            "key": "file",
            "value": {
                "content": BASE64.encode(payload),
                "path": self.settings.path_in_repo,
                "encoding": "base64",
            },
        });
        let body = format!(
            "{}\n{}\n",
            serde_json::to_string(&header)?,
            serde_json::to_string(&file)?
        );

        let response = self
            .client
            .post(self.url(&format!("/api/datasets/{destination_id}/commit/main")))
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(|err| PublishError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error("commit", status, response).await);
        }
        let text = response
            .text()
            .await
            .map_err(|err| PublishError::Network(err.to_string()))?;
        let commit_url = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|value| value.get("commitUrl")?.as_str().map(str::to_string));
        Ok(commit_url)
    }
}

#[async_trait::async_trait]
impl Publisher for HubPublisher {
    async fn publish(
        &self,
        records: &[Record],
        destination_id: &str,
        token: &str,
    ) -> Result<PublishReport, PublishError> {
        let payload = records_to_jsonl(records)?;
        let created = self.create_repo(destination_id, token).await?;
        let commit_url = self.commit(destination_id, token, payload.as_bytes()).await?;
        engine_info!(
            "Published {} records to {}",
            records.len(),
            destination_id
        );
        Ok(PublishReport {
            destination_id: destination_id.to_string(),
            record_count: records.len(),
            created,
            commit_url,
        })
    }
}

fn split_destination(destination_id: &str) -> Result<(&str, &str), PublishError> {
    match destination_id.split_once('/') {
        Some((namespace, name))
            if !namespace.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok((namespace, name))
        }
        _ => Err(PublishError::InvalidDestination(destination_id.to_string())),
    }
}

async fn status_error(
    stage: &'static str,
    status: StatusCode,
    response: reqwest::Response,
) -> PublishError {
    let body = response.text().await.unwrap_or_default();
    PublishError::Status {
        stage,
        status: status.as_u16(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_needs_namespace_and_name() {
        assert_eq!(split_destination("user/data").unwrap(), ("user", "data"));
        assert!(split_destination("data").is_err());
        assert!(split_destination("/data").is_err());
        assert!(split_destination("a/b/c").is_err());
    }
}
