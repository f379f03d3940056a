use crate::config::FirestoreConfig;
use crate::error::CaptionError;
use crate::model::GenerationRecord;
use chrono::Utc;
use log::debug;
use reqwest::Client;
use serde_json::json;

/// Best-effort mirror of generated records into a Firestore collection via
/// the REST API. The local CSV write is primary; callers log mirror errors
/// and move on.
pub struct FirestoreMirror {
    client: Client,
    base_url: String,
    project_id: String,
    collection: String,
    user_id: String,
    api_key: Option<String>,
}

impl FirestoreMirror {
    /// Create a mirror from configuration. Returns an error when the mirror
    /// is enabled without a project id.
    pub fn new(config: &FirestoreConfig) -> Result<Self, CaptionError> {
        let project_id = config.project_id.clone().ok_or_else(|| {
            CaptionError::Builder(
                "firestore.project_id must be set when the mirror is enabled".to_string(),
            )
        })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://firestore.googleapis.com".to_string());

        Ok(FirestoreMirror {
            client: Client::new(),
            base_url,
            project_id,
            collection: config.collection.clone(),
            user_id: config.user_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Write one document for the record, with an auto-generated id.
    pub async fn mirror(&self, record: &GenerationRecord) -> Result<(), CaptionError> {
        let mut url = format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.base_url, self.project_id, self.collection
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("?key={}", key));
        }

        let values: Vec<_> = record
            .keywords
            .iter()
            .map(|keyword| json!({"stringValue": keyword}))
            .collect();

        let body = json!({
            "fields": {
                "user_id": {"stringValue": self.user_id},
                "imagen": {"stringValue": record.image.to_string()},
                "palabras_clave": {"arrayValue": {"values": values}},
                "timestamp": {"timestampValue": Utc::now().to_rfc3339()}
            }
        });

        debug!("Mirroring record to collection {:?}", self.collection);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CaptionError::RemoteMirror(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CaptionError::RemoteMirror(format!(
                "Firestore error ({}): {}",
                status, error_text
            )));
        }

        Ok(())
    }
}
