use crate::{clients::gemini::GeminiClient, config::Settings, error::Result};

/// Everything a request needs, built once per process and shared read-only.
pub struct AppState {
    pub settings: Settings,
    pub gemini: GeminiClient,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let gemini = GeminiClient::new(&settings)?;
        Ok(Self { settings, gemini })
    }
}
