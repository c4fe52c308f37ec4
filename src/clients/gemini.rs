use anyhow::Context;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::{
    config::Settings,
    error::{AppError, Result},
    models::gemini::{ErrorBody, GenerateRequest, GenerateResponse},
};

pub const UNKNOWN_UPSTREAM_ERROR: &str = "Error desconocido de Gemini.";

/// One `generateContent` call per request; no retries.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("building HTTP client")?;
        Ok(Self::with_http(http, settings))
    }

    pub fn with_http(http: Client, settings: &Settings) -> Self {
        let endpoint = format!("{}/models/{}:generateContent", settings.api_base, settings.model);
        Self { http, endpoint }
    }

    /// Returns the upstream text, or `None` when a successful answer carried
    /// no text (blocked or empty candidate).
    pub async fn generate(&self, key: &SecretString, body: &GenerateRequest) -> Result<Option<String>> {
        debug_log_preview(body);

        let resp = self
            .http
            .post(&self.endpoint)
            .query(&[("key", key.expose_secret())])
            .json(body)
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("sending request to Gemini")?;

        let status = resp.status();
        let bytes = resp.bytes().await.context("reading Gemini response")?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| UNKNOWN_UPSTREAM_ERROR.to_string());
            warn!(status = status.as_u16(), %message, "gemini returned an error");
            return Err(AppError::Upstream { status: status.as_u16(), message });
        }

        let parsed: GenerateResponse =
            serde_json::from_slice(&bytes).context("decoding Gemini response")?;
        Ok(parsed.text())
    }
}

fn debug_log_preview(body: &GenerateRequest) {
    let last = body
        .contents
        .last()
        .and_then(|c| c.parts.first())
        .map(|p| p.text.chars().take(80).collect::<String>())
        .unwrap_or_default();
    debug!(
        contents = body.contents.len(),
        search = !body.tools.is_empty(),
        preview = %last,
        "calling gemini"
    );
}
