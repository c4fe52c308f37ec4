use secrecy::SecretString;
use tracing::{info, warn};

use crate::{
    error::{AppError, Result},
    models::{
        conversation::{render_context, ContextSet, Role},
        gemini::{Content, GenerateRequest},
    },
    state::AppState,
};

pub const LABELS: [&str; 4] = ["Bajo", "Medio", "Alto", "Extremo"];
pub const RATING_FALLBACK: &str = "Sin calificación";

pub fn rating_prompt(components: &ContextSet) -> String {
    format!(
        "Eres un experto en hardware. Evalúa el rendimiento general de un equipo con estos componentes: {}. \
         Responde únicamente con una de estas palabras: {}. No añadas explicaciones ni signos de puntuación.",
        render_context(components),
        LABELS.join(", "),
    )
}

/// Last alphabetic token of the answer if it is one of [`LABELS`], otherwise
/// [`RATING_FALLBACK`].
pub fn shape_rating(text: Option<&str>) -> &'static str {
    let Some(text) = text else {
        return RATING_FALLBACK;
    };
    let letters: String = text
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    letters
        .split_whitespace()
        .last()
        .and_then(|token| LABELS.iter().find(|l| l.eq_ignore_ascii_case(token)))
        .copied()
        .unwrap_or(RATING_FALLBACK)
}

pub async fn rate(state: &AppState, key: &SecretString, components: &ContextSet) -> Result<String> {
    if components.is_empty() {
        return Err(AppError::invalid("Faltan los componentes del equipo."));
    }

    let body = GenerateRequest::new(vec![Content::text(Role::User, rating_prompt(components))]);
    let raw = state.gemini.generate(key, &body).await?;
    let label = shape_rating(raw.as_deref());
    if label == RATING_FALLBACK {
        warn!(raw = ?raw, "rating answer did not contain a known label");
    }
    info!(components = components.len(), label, "performance rated");
    Ok(label.to_string())
}
