use api_types::account::AccountExists;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

mod input;
mod server;
mod session;
mod transactions;
mod user;

/// The JSON shape an endpoint answers with when it fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Envelope {
    /// `{"success": false, "message": ...}`
    Success,
    /// `{"exist": false, "message": ...}`
    Exist,
    /// `{"error": ...}`
    Error,
}

#[derive(Debug)]
pub struct ServerError {
    status: StatusCode,
    envelope: Envelope,
    message: String,
}

#[derive(Serialize)]
struct Failure {
    success: bool,
    message: String,
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        // A taken username is reported like any other bad input.
        EngineError::ExistingKey(_)
        | EngineError::MissingField(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::Database(_) | EngineError::Credentials(_) | EngineError::Task(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError, fallback: &str) -> String {
    if err.is_internal() {
        tracing::error!("{fallback}: {err}");
        return fallback.to_string();
    }
    err.to_string()
}

impl ServerError {
    pub fn new(status: StatusCode, envelope: Envelope, message: impl Into<String>) -> Self {
        Self {
            status,
            envelope,
            message: message.into(),
        }
    }

    /// Translate an engine error. Internal failures are logged and replaced
    /// by `fallback`; everything else keeps its own message.
    pub fn engine(err: EngineError, envelope: Envelope, fallback: &str) -> Self {
        let status = status_for_engine_error(&err);
        Self::new(status, envelope, message_for_engine_error(err, fallback))
    }

    /// A request whose body or query string could not be decoded.
    pub(crate) fn rejected(envelope: Envelope, rejection: impl std::fmt::Display) -> Self {
        tracing::debug!("rejected request: {rejection}");
        Self::new(StatusCode::BAD_REQUEST, envelope, "Invalid request body")
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let Self {
            status,
            envelope,
            message,
        } = self;

        match envelope {
            Envelope::Success => (
                status,
                Json(Failure {
                    success: false,
                    message,
                }),
            )
                .into_response(),
            Envelope::Exist => (
                status,
                Json(AccountExists {
                    exist: false,
                    message,
                    token: None,
                }),
            )
                .into_response(),
            Envelope::Error => (status, Json(Error { error: message })).into_response(),
        }
    }
}

/// Attach the failing endpoint's envelope and generic message to an engine
/// result.
pub(crate) trait Reply<T> {
    fn or_reply(self, envelope: Envelope, fallback: &str) -> Result<T, ServerError>;
}

impl<T> Reply<T> for Result<T, EngineError> {
    fn or_reply(self, envelope: Envelope, fallback: &str) -> Result<T, ServerError> {
        self.map_err(|err| ServerError::engine(err, envelope, fallback))
    }
}
