//! Gateway error taxonomy
//!
//! Errors never leave the gateway as `Err`; they are folded into
//! [`ApiResult`](crate::models::ApiResult) messages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Non-2xx answer; `message` is the server's `detail` or a status fallback
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Error de conexión: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    /// The request could not be built or its body serialized
    #[error("Error inesperado: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            GatewayError::Unexpected(e.to_string())
        } else if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::Transport(e)
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Decode(e.to_string())
    }
}

impl GatewayError {
    /// HTTP status when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
