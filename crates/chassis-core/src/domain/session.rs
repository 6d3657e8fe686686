//! Session
//!
//! Bearer token plus the identity returned by the login endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Numeric on most deployments; kept as text
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
}

impl AuthUser {
    /// Lenient read of the login `user` object. A missing or null id
    /// becomes empty; only `username` is required.
    fn from_value(value: &Value) -> Option<Self> {
        let username = value.get("username")?.as_str()?.to_string();
        let id = match value.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        Some(Self { id, username })
    }
}

/// Body of `POST users/authenticate`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
    pub message: Option<String>,
}

impl LoginResponse {
    /// Each part is read on its own so an odd `user` never costs the token.
    /// Bodies that are not JSON objects come back empty.
    pub fn parse(body: &str) -> Self {
        let value = match serde_json::from_str::<Value>(body) {
            Ok(value @ Value::Object(_)) => value,
            Ok(other) => {
                log::warn!("Login response is not an object: {}", other);
                return Self::default();
            }
            Err(e) => {
                log::warn!("Login response is not JSON: {}", e);
                return Self::default();
            }
        };

        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let user = match value.get("user") {
            None | Some(Value::Null) => None,
            Some(raw) => {
                let user = AuthUser::from_value(raw);
                if user.is_none() {
                    log::warn!("Ignoring login user without a username: {}", raw);
                }
                user
            }
        };

        Self {
            token: text("token"),
            user,
            message: text("message"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: Option<AuthUser>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<AuthUser>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("unexpected user id: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_numeric_id() {
        let body = r#"{"token": "abc", "user": {"id": 42, "username": "khwong"}}"#;
        let response = LoginResponse::parse(body);
        let user = response.user.unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.username, "khwong");
        assert_eq!(response.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_login_response_error_body() {
        let response = LoginResponse::parse(r#"{"message": "Username or password is incorrect"}"#);
        assert!(response.token.is_none());
        assert_eq!(response.message.as_deref(), Some("Username or password is incorrect"));
    }

    #[test]
    fn test_login_response_keeps_token_with_odd_user() {
        let response = LoginResponse::parse(r#"{"token":"abc","user":{"id":null,"username":"khwong"}}"#);
        assert_eq!(response.token.as_deref(), Some("abc"));
        let user = response.user.unwrap();
        assert_eq!(user.id, "");
        assert_eq!(user.username, "khwong");

        let response = LoginResponse::parse(r#"{"token":"abc","user":{"id":[1]}}"#);
        assert_eq!(response.token.as_deref(), Some("abc"));
        assert!(response.user.is_none());

        let response = LoginResponse::parse(r#"{"token":"abc","user":"khwong"}"#);
        assert_eq!(response.token.as_deref(), Some("abc"));
        assert!(response.user.is_none());
    }

    #[test]
    fn test_login_response_not_json() {
        assert_eq!(LoginResponse::parse("<html>Bad Gateway</html>"), LoginResponse::default());
        assert_eq!(LoginResponse::parse("[]"), LoginResponse::default());
    }

    #[test]
    fn test_stored_session_user_with_null_id() {
        let user: AuthUser = serde_json::from_str(r#"{"id": null, "username": "khwong"}"#).unwrap();
        assert_eq!(user.id, "");
    }
}
