use anyhow::Context;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, info, warn};
use vercel_runtime::{Body, Error, Request, Response, StatusCode};

use crate::{
    error::{AppError, Result},
    http::response::{empty_response, error_response, json_response},
    services::{chat, router},
    state::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/api/chat`
    Chat,
    /// `/api/made`
    Made,
}

pub async fn handle(state: &AppState, endpoint: Endpoint, req: Request) -> std::result::Result<Response<Body>, Error> {
    match req.method().as_str() {
        "OPTIONS" => return empty_response(StatusCode::NO_CONTENT),
        "POST" => {}
        other => {
            warn!(?endpoint, method = other, "method not allowed");
            return error_response(&AppError::MethodNotAllowed);
        }
    }

    match process(state, endpoint, req.body()).await {
        Ok(text) => {
            info!(?endpoint, chars = text.chars().count(), "request served");
            json_response(StatusCode::OK, &json!({ "text": text }))
        }
        Err(err) => {
            report(endpoint, &err);
            error_response(&err)
        }
    }
}

async fn process(state: &AppState, endpoint: Endpoint, body: &[u8]) -> Result<String> {
    // Checked before the body so a misconfigured deployment answers the same
    // way for every payload.
    let key: &SecretString = state.settings.api_key()?;

    match endpoint {
        Endpoint::Chat => chat::respond(state, key, decode(body)?).await,
        Endpoint::Made => router::dispatch(state, key, decode(body)?).await,
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.is_empty() {
        return Err(AppError::invalid("Falta el cuerpo de la solicitud."));
    }
    Ok(serde_json::from_slice(body).context("decoding request body")?)
}

fn report(endpoint: Endpoint, err: &AppError) {
    match err {
        AppError::Internal(e) => error!(?endpoint, "error al procesar la solicitud: {e:#}"),
        AppError::MissingCredential => error!(?endpoint, "GEMINI_API_KEY is not configured"),
        AppError::Upstream { status, .. } => warn!(?endpoint, status, "upstream failure passed through"),
        other => warn!(?endpoint, error = %other, "request rejected"),
    }
}
