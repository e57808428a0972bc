use api_types::session::LoggedOut;
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use crate::{Envelope, Reply, ServerError, server::ServerState};

/// `POST /logout`
///
/// Destroys the session named by the bearer token handed out at login.
/// Unknown tokens are accepted: the session is gone either way. A missing
/// header and one that is not a bearer token get the same answer.
pub async fn logout(
    State(state): State<ServerState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
) -> Result<Json<LoggedOut>, ServerError> {
    let Ok(TypedHeader(auth)) = bearer else {
        return Err(ServerError::new(
            StatusCode::BAD_REQUEST,
            Envelope::Error,
            "Session token is required",
        ));
    };

    let closed = state
        .engine
        .close_session(auth.token())
        .await
        .or_reply(Envelope::Error, "Error logging out")?;
    if !closed {
        tracing::debug!("logout for a session that was not open");
    }

    Ok(Json(LoggedOut {
        message: "Logged out successfully".to_string(),
    }))
}
