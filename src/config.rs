use std::time::Duration;

use secrecy::SecretString;

use crate::error::{AppError, Result};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const SYSTEM_PROMPT: &str = "Eres MADE 🛍️, una Asistente de Compras Virtual experta, amable y altamente empática. Tu misión es actuar como una personal shopper digital.
Que sabes: Experta en tecnología 📱, ropa 👟, hogar 🛋️, cocina 🍳, y más.
Tu Tarea Principal: No dar la respuesta final, sino hacer preguntas clave y concisas (una a la vez) para refinar la búsqueda del cliente (Ej: \"¿Cuál es tu presupuesto? 💸\" o \"¿Qué tipo de tela prefieres? 🌿\").
Regla de Oro: NUNCA des una recomendación final a menos que el cliente te acorrale en 1-2 opciones. Siempre usa emojis 🤩 para mantener el tono ligero.";

/// Greeting the widget shows before the first user message. It is UI chrome,
/// not conversation, so it never goes upstream.
pub const GREETING: &str = "¡Hola! Soy Made 🛍️, tu personal shopper virtual. Dime, ¿qué producto estás buscando hoy? Así te puedo ayudar a encontrar la mejor opción.";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<SecretString>,
    pub api_base: String,
    pub model: String,
    pub system_prompt: String,
    pub greeting: String,
    /// Attach the Google Search tool to consultation requests.
    pub consultation_search: bool,
    /// Client-side cutoff for the Gemini call; `None` leaves it to the platform.
    pub upstream_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            greeting: GREETING.to_string(),
            consultation_search: true,
            upstream_timeout: None,
        }
    }
}

impl Settings {
    /// Reads `.env` when present, then the process environment.
    ///
    /// Recognised variables: `GEMINI_API_KEY`, `GEMINI_MODEL`,
    /// `GEMINI_API_BASE`, `GEMINI_TIMEOUT_SECS` and `MADE_ENABLE_SEARCH`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let upstream_timeout = match var("GEMINI_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.parse().map_err(|_| {
                AppError::Internal(anyhow::anyhow!("GEMINI_TIMEOUT_SECS is not a number: {raw}"))
            })?)),
            None => defaults.upstream_timeout,
        };
        let consultation_search = match var("MADE_ENABLE_SEARCH").as_deref() {
            Some("0") | Some("false") | Some("off") => false,
            Some(_) | None => true,
        };

        Ok(Self {
            api_key: var("GEMINI_API_KEY").map(SecretString::new),
            api_base: var("GEMINI_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            model: var("GEMINI_MODEL").unwrap_or(defaults.model),
            consultation_search,
            upstream_timeout,
            ..defaults
        })
    }

    /// The key is checked per request, so a missing one still lets `OPTIONS`
    /// and the method gate answer.
    pub fn api_key(&self) -> Result<&SecretString> {
        self.api_key.as_ref().ok_or(AppError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert!(s.api_key.is_none());
        assert_eq!(s.model, DEFAULT_MODEL);
        assert_eq!(s.api_base, DEFAULT_API_BASE);
        assert!(s.consultation_search);
        assert_eq!(s.upstream_timeout, None);
        assert!(matches!(s.api_key(), Err(AppError::MissingCredential)));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let s = Settings::from_lookup(lookup(&[("GEMINI_API_KEY", "   ")])).unwrap();
        assert!(s.api_key.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let s = Settings::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "abc"),
            ("GEMINI_MODEL", "gemini-2.0-pro"),
            ("GEMINI_API_BASE", "http://localhost:1234/"),
            ("MADE_ENABLE_SEARCH", "false"),
            ("GEMINI_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(s.api_key().unwrap().expose_secret(), "abc");
        assert_eq!(s.model, "gemini-2.0-pro");
        assert_eq!(s.api_base, "http://localhost:1234");
        assert!(!s.consultation_search);
        assert_eq!(s.upstream_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("GEMINI_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
