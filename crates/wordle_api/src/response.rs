use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

pub const STATUS_OK: u16 = 200;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_SERVER_ERROR: u16 = 500;

/// A decoded scoring-service body.
///
/// The service signals application errors through a `status` field inside the JSON body,
/// independently of the HTTP status line. Any object carrying a `status` other than 200 is an
/// `Error`; every other body is decoded as `T`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Ok(T),
    Error { status: u16, msg: Option<String> },
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let envelope: Value = serde_json::from_slice(body)?;

        if let Some(status) = error_status(&envelope) {
            return Ok(Self::Error {
                status,
                msg: error_msg(&envelope),
            });
        }

        Ok(Self::Ok(serde_json::from_slice(body)?))
    }

    /// Like [`ApiResponse::from_slice`], but an object must carry `status: 200` to be a payload.
    /// A status-less object (e.g. `{"detail": "Not authenticated"}`) is a 500 error.
    pub fn from_slice_checked(body: &[u8]) -> Result<Self> {
        let envelope: Value = serde_json::from_slice(body)?;

        if envelope.as_object().is_some_and(|object| !object.contains_key("status")) {
            return Ok(Self::Error {
                status: STATUS_SERVER_ERROR,
                msg: error_msg(&envelope),
            });
        }

        Self::from_slice(body)
    }
}

fn error_msg(body: &Value) -> Option<String> {
    body.get("msg").and_then(Value::as_str).map(str::to_string)
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> u16 {
        match self {
            Self::Ok(_) => STATUS_OK,
            Self::Error { status, .. } => *status,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == STATUS_NOT_FOUND
    }

    pub fn msg(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Error { msg, .. } => msg.as_deref(),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(payload) => Some(payload),
            Self::Error { .. } => None,
        }
    }
}

fn error_status(body: &Value) -> Option<u16> {
    let status = body.as_object()?.get("status")?;
    let status = status
        .as_u64()
        .or_else(|| status.as_str().and_then(|s| s.parse().ok()))?;
    let status = u16::try_from(status).ok()?;

    (status != STATUS_OK).then_some(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Blame, PlayerRecord, SubmittedScore};

    #[test]
    fn test_error_envelope() {
        let body = br#"{"status": 409, "msg": "Score already submitted"}"#;
        let response = ApiResponse::<SubmittedScore>::from_slice(body).unwrap();

        assert_eq!(response.status(), 409);
        assert_eq!(response.msg(), Some("Score already submitted"));
        assert!(!response.is_not_found());
    }

    #[test]
    fn test_not_found_without_msg() {
        let response = ApiResponse::<Blame>::from_slice(br#"{"status": "404"}"#).unwrap();

        assert!(response.is_not_found());
        assert_eq!(response.msg(), None);
    }

    #[test]
    fn test_status_200_is_payload() {
        let body = br#"{"status": 200, "msg": "It was the starting word"}"#;
        let response = ApiResponse::<Blame>::from_slice(body).unwrap();

        let blame = response.ok().unwrap();
        assert_eq!(blame.msg.as_deref(), Some("It was the starting word"));
    }

    #[test]
    fn test_array_body_is_payload() {
        let body = br#"[{"player_name": "a", "player_ord": 1.0}, {"player_name": "b"}]"#;
        let response = ApiResponse::<Vec<PlayerRecord>>::from_slice(body).unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.ok().unwrap().len(), 2);
    }

    #[test]
    fn test_checked_statusless_body_is_server_error() {
        let body = br#"{"detail": "Not authenticated"}"#;
        let response = ApiResponse::<SubmittedScore>::from_slice_checked(body).unwrap();

        assert!(matches!(
            response,
            ApiResponse::Error {
                status: 500,
                msg: None
            }
        ));
    }

    #[test]
    fn test_checked_status_200_is_payload() {
        let body = br#"{"status": 200, "player_name": "alice", "puzzle": 1546, "score": 4, "calculated_score": 4, "hard_mode": 0}"#;
        let response = ApiResponse::<SubmittedScore>::from_slice_checked(body).unwrap();

        assert_eq!(response.ok().unwrap().player_name, "alice");
    }

    #[test]
    fn test_checked_keeps_error_status() {
        let body = br#"{"status": 409, "msg": "Score already submitted"}"#;
        let response = ApiResponse::<SubmittedScore>::from_slice_checked(body).unwrap();

        assert_eq!(response.status(), 409);
        assert_eq!(response.msg(), Some("Score already submitted"));
    }

    #[test]
    fn test_non_json_body_is_an_error() {
        assert!(ApiResponse::<Blame>::from_slice(b"<html>Bad Gateway</html>").is_err());
    }
}
