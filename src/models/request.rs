use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    models::conversation::{ContextSet, Role, Turn},
};

pub const MISSING_HISTORY: &str = "Falta el historial de la conversación.";

/// One entry of `conversation_history` exactly as the widget sends it. Both
/// fields are optional here so a malformed turn is a 400, not a decode failure.
#[derive(Deserialize, Debug, Clone)]
pub struct TurnPayload {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl TryFrom<TurnPayload> for Turn {
    type Error = AppError;

    fn try_from(p: TurnPayload) -> Result<Self> {
        let role = p
            .role
            .ok_or_else(|| AppError::invalid("Falta el rol en un mensaje del historial."))?;
        Ok(Turn { role: Role::try_from(role.as_str())?, text: p.text.unwrap_or_default() })
    }
}

/// Body of `/api/chat`.
#[derive(Deserialize, Debug, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub conversation_history: Option<Vec<TurnPayload>>,
    #[serde(default)]
    pub user_prompt: Option<String>,
}

impl ChatRequest {
    /// The history wins when both fields are sent; a lone `user_prompt` becomes
    /// a one-turn history.
    pub fn into_turns(self) -> Result<Vec<Turn>> {
        turns_from(self.conversation_history, self.user_prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    PerformanceCalc,
    MadeConsultation,
}

impl RequestKind {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "PERFORMANCE_CALC" => Some(RequestKind::PerformanceCalc),
            "MADE_CONSULTATION" => Some(RequestKind::MadeConsultation),
            _ => None,
        }
    }
}

/// Body of `/api/made`. The discriminator stays a raw string so an unknown
/// value is a 400, not a decode failure.
#[derive(Deserialize, Debug, Default)]
pub struct RoutedRequest {
    #[serde(default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub components: ContextSet,
    #[serde(default)]
    pub user_prompt: Option<String>,
    #[serde(default)]
    pub conversation_history: Option<Vec<TurnPayload>>,
}

impl RoutedRequest {
    pub fn kind(&self) -> Result<RequestKind> {
        match self.request_type.as_deref() {
            None => Err(AppError::invalid("Falta el parámetro 'request_type'.")),
            Some(tag) => RequestKind::parse(tag)
                .ok_or_else(|| AppError::invalid(format!("Tipo de solicitud no reconocido: '{tag}'."))),
        }
    }
}

pub fn turns_from(history: Option<Vec<TurnPayload>>, prompt: Option<String>) -> Result<Vec<Turn>> {
    match (history, prompt) {
        (Some(history), _) if !history.is_empty() => {
            history.into_iter().map(Turn::try_from).collect()
        }
        (_, Some(prompt)) if !prompt.trim().is_empty() => Ok(vec![Turn::user(prompt)]),
        _ => Err(AppError::invalid(MISSING_HISTORY)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn history_wins_over_prompt() {
        let req: ChatRequest = serde_json::from_value(json!({
            "user_prompt": "ignored",
            "conversation_history": [{"role": "user", "text": "hola"}]
        }))
        .unwrap();
        assert_eq!(req.into_turns().unwrap(), vec![Turn::user("hola")]);
    }

    #[test]
    fn empty_history_falls_back_to_prompt() {
        let req: ChatRequest = serde_json::from_value(json!({
            "user_prompt": "busco zapatillas",
            "conversation_history": []
        }))
        .unwrap();
        assert_eq!(req.into_turns().unwrap(), vec![Turn::user("busco zapatillas")]);
    }

    #[test]
    fn nothing_to_send_is_invalid() {
        for body in [json!({}), json!({"conversation_history": []}), json!({"user_prompt": "  "})] {
            let req: ChatRequest = serde_json::from_value(body).unwrap();
            assert!(matches!(req.into_turns(), Err(AppError::InvalidInput(m)) if m == MISSING_HISTORY));
        }
    }

    #[test]
    fn unknown_role_is_invalid() {
        let req: ChatRequest = serde_json::from_value(json!({
            "conversation_history": [{"role": "system", "text": "x"}]
        }))
        .unwrap();
        assert!(matches!(req.into_turns(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn turn_without_role_is_invalid() {
        let req: ChatRequest =
            serde_json::from_value(json!({"conversation_history": [{"text": "hi"}]})).unwrap();
        assert!(matches!(req.into_turns(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn null_text_becomes_empty() {
        let req: ChatRequest = serde_json::from_value(json!({
            "conversation_history": [{"role": "user", "text": null}]
        }))
        .unwrap();
        assert_eq!(req.into_turns().unwrap(), vec![Turn::user("")]);
    }

    #[test]
    fn request_kind_discriminator() {
        let req: RoutedRequest =
            serde_json::from_value(json!({"request_type": "PERFORMANCE_CALC"})).unwrap();
        assert_eq!(req.kind().unwrap(), RequestKind::PerformanceCalc);

        let req: RoutedRequest = serde_json::from_value(json!({"request_type": "OTHER"})).unwrap();
        assert!(matches!(req.kind(), Err(AppError::InvalidInput(_))));

        let req: RoutedRequest = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(req.kind(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn components_keep_their_order() {
        let req: RoutedRequest = serde_json::from_value(json!({
            "request_type": "PERFORMANCE_CALC",
            "components": {"RAM": "32GB", "CPU": "i5", "GPU": "RX 7600"}
        }))
        .unwrap();
        let keys: Vec<_> = req.components.keys().map(String::as_str).collect();
        assert_eq!(keys, ["RAM", "CPU", "GPU"]);
    }
}
