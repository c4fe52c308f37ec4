use serde_json::json;
use vercel_runtime::{Body, Error, Response, StatusCode};

use crate::{error::AppError, http::cors::add_cors};

pub const INTERNAL_ERROR: &str = "Error interno del servidor (Proxy).";

/// The response for a failed request. Every error leaves through here;
/// internal details stay in the logs.
pub fn error_response(err: &AppError) -> Result<Response<Body>, Error> {
    let (status, message) = match err {
        AppError::MethodNotAllowed => {
            return text_response(StatusCode::METHOD_NOT_ALLOWED, &err.to_string());
        }
        AppError::MissingCredential => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        AppError::Upstream { status, message } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            message.clone(),
        ),
        AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string()),
    };
    json_response(status, &json!({ "error": message }))
}

pub fn json_response<T: serde::Serialize>(status: StatusCode, value: &T) -> Result<Response<Body>, Error> {
    add_cors(
        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(value)?.into())?,
    )
}

pub fn text_response(status: StatusCode, text: &str) -> Result<Response<Body>, Error> {
    add_cors(
        Response::builder()
            .status(status)
            .header("Allow", "POST, OPTIONS")
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(text.to_string().into())?,
    )
}

pub fn empty_response(status: StatusCode) -> Result<Response<Body>, Error> {
    add_cors(Response::builder().status(status).body(Body::Empty)?)
}
