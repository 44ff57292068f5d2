//! Wit.ai classification provider.
//!
//! Sends `GET {api_url}?v={version}&q={text}` with a bearer token and
//! converts the response into a provider-neutral [`ClassificationResult`].

use crate::provider::ClassificationProvider;
use async_trait::async_trait;
use intent_core::{
    ClassificationResult, EntityCandidate, Error, IntentCandidate, ProviderConfig, Result,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Response body of the message endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WitResponse {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub intents: Vec<WitIntent>,
    #[serde(default)]
    pub entities: HashMap<String, Vec<WitEntity>>,
    #[serde(default)]
    pub traits: HashMap<String, Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WitIntent {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WitEntity {
    pub id: String,
    pub name: String,
    pub role: String,
    pub start: usize,
    pub end: usize,
    pub body: String,
    /// String for free-text entities, number for `wit$number`.
    pub value: Value,
    pub confidence: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl WitEntity {
    /// Resolved value as text. Falls back to the matched body when absent.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Null => self.body.clone(),
            other => other.to_string(),
        }
    }
}

impl From<WitResponse> for ClassificationResult {
    fn from(resp: WitResponse) -> Self {
        let intents = resp
            .intents
            .into_iter()
            .map(|intent| IntentCandidate {
                label: intent.name,
                confidence: intent.confidence,
            })
            .collect();

        let entities = resp
            .entities
            .into_iter()
            .map(|(key, values)| {
                let candidates = values
                    .iter()
                    .map(|entity| EntityCandidate {
                        value: entity.value_text(),
                        confidence: entity.confidence,
                        role: (!entity.role.is_empty()).then(|| entity.role.clone()),
                    })
                    .collect();
                (key, candidates)
            })
            .collect();

        ClassificationResult {
            text: resp.text,
            intents,
            entities,
        }
    }
}

/// HTTP client for the Wit.ai message endpoint.
pub struct WitAiProvider {
    client: Client,
    api_url: String,
    api_version: String,
    token: String,
}

impl WitAiProvider {
    /// Create a provider. Fails when no token can be resolved.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let token = config
            .resolve_token()
            .map_err(|_| Error::config("wit.ai token is required"))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_version: config.api_version.clone(),
            token,
        })
    }

    async fn call(&self, text: &str) -> Result<WitResponse> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("v", self.api_version.as_str()), ("q", text)])
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "wit.ai request rejected");
            return Err(Error::provider(format!(
                "wit.ai returned status {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| Error::malformed(format!("Failed to parse wit.ai response: {e}")))
    }
}

#[async_trait]
impl ClassificationProvider for WitAiProvider {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let resp = self.call(text).await?;
        debug!(
            intents = resp.intents.len(),
            entities = resp.entities.len(),
            "wit.ai response received"
        );
        Ok(resp.into())
    }

    fn name(&self) -> &str {
        "witai"
    }
}
