//! Registration and login endpoints

use api_types::account::{AccountCheck, AccountCreated, AccountExists, AccountNew};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    extract::rejection::JsonRejection,
    http::{HeaderMap, header},
};
use engine::Login;

use crate::{Envelope, Reply, ServerError, input, server::ServerState};

/// `POST /add-user`
pub async fn add_user(
    State(state): State<ServerState>,
    payload: Result<Json<AccountNew>, JsonRejection>,
) -> Result<Json<AccountCreated>, ServerError> {
    let Json(payload) = payload.map_err(|err| ServerError::rejected(Envelope::Success, err))?;

    state
        .engine
        .register(input::account_new(payload))
        .await
        .or_reply(Envelope::Success, "Server error while signing up")?;

    Ok(Json(AccountCreated {
        success: true,
        message: "User successfully added".to_string(),
    }))
}

/// `POST /check-user`
///
/// Missing credentials are answered with `200` and `exist: false`, unlike
/// registration which answers `400`. Unknown usernames and wrong passwords
/// share one message.
pub async fn check_user(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AccountExists>, ServerError> {
    let payload = credentials(&headers, &body)
        .map_err(|err| ServerError::rejected(Envelope::Exist, err))?;

    let login = state
        .engine
        .login(
            payload.username.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await
        .or_reply(Envelope::Exist, "Server error")?;

    let response = match login {
        Login::Granted { token } => AccountExists {
            exist: true,
            message: "Login successful".to_string(),
            token: Some(token),
        },
        Login::MissingCredentials => AccountExists {
            exist: false,
            message: "Both username and password are required".to_string(),
            token: None,
        },
        Login::Rejected => AccountExists {
            exist: false,
            message: "Invalid username or password".to_string(),
            token: None,
        },
    };

    Ok(Json(response))
}

/// Decode a login body. An empty body or one that is not JSON carries no
/// credentials; only malformed JSON is an error.
fn credentials(headers: &HeaderMap, body: &[u8]) -> Result<AccountCheck, JsonRejection> {
    if body.trim_ascii().is_empty() || !is_json(headers) {
        return Ok(AccountCheck::default());
    }
    let Json(payload) = Json::from_bytes(body)?;
    Ok(payload)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    #[test]
    fn empty_body_carries_no_credentials() {
        let payload = credentials(&json_headers(), b"").unwrap();
        assert_eq!(payload.username, None);
        assert_eq!(payload.password, None);
    }

    #[test]
    fn non_json_body_carries_no_credentials() {
        let payload = credentials(&HeaderMap::new(), b"username=ada&password=x").unwrap();
        assert_eq!(payload.username, None);
    }

    #[test]
    fn json_body_is_decoded() {
        let payload =
            credentials(&json_headers(), br#"{"username": "ada", "password": "engine"}"#)
                .unwrap();
        assert_eq!(payload.username.as_deref(), Some("ada"));
        assert_eq!(payload.password.as_deref(), Some("engine"));
    }

    #[test]
    fn charset_parameter_is_still_json() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(credentials(&headers, b"{not json").is_err());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(credentials(&json_headers(), b"{not json").is_err());
    }
}
