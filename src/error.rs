use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Método no permitido. Usa POST.")]
    MethodNotAllowed,
    #[error("Clave de API no configurada en el servidor.")]
    MissingCredential,
    #[error("{0}")]
    InvalidInput(String),
    /// Non-success answer from Gemini; `status` is mirrored to the caller.
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
