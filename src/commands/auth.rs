//! Auth Commands
//!
//! Login, registration and logout. Form errors come back per field;
//! everything else as one message.

use chassis_core::domain::validation::{rejection_field_errors, FieldErrors, LoginForm, RegistrationForm};
use chassis_core::domain::{Session, CONNECT_FAILED, LOGIN_FAILED};
use chassis_core::ClientError;

use super::client;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthFailure {
    /// Shown next to the inputs
    Fields(FieldErrors),
    /// Shown as a banner
    Message(String),
}

fn failure_message(err: ClientError, fallback: &str) -> AuthFailure {
    match err {
        ClientError::Transport(e) => {
            log::error!("Auth request failed: {}", e);
            AuthFailure::Message(CONNECT_FAILED.to_string())
        }
        ClientError::Rejected(message) => AuthFailure::Message(message),
        other => {
            log::error!("Auth request failed: {}", other);
            AuthFailure::Message(other.server_message().unwrap_or(fallback).to_string())
        }
    }
}

pub async fn login(form: &LoginForm) -> Result<Session, AuthFailure> {
    form.validate().map_err(AuthFailure::Fields)?;
    client()
        .authenticate(form.username.trim(), &form.password)
        .await
        .map_err(|e| failure_message(e, LOGIN_FAILED))
}

pub async fn register(form: &RegistrationForm) -> Result<(), AuthFailure> {
    let api = client();
    form.validate(&api.config().company_code).map_err(AuthFailure::Fields)?;
    match api.register(&form.to_request()).await {
        Ok(()) => Ok(()),
        Err(ClientError::Rejected(message)) => {
            let errors = rejection_field_errors(&message);
            if errors.is_empty() {
                Err(AuthFailure::Message(message))
            } else {
                Err(AuthFailure::Fields(errors))
            }
        }
        Err(e) => Err(failure_message(e, "Something went wrong")),
    }
}

pub fn logout() -> Result<(), String> {
    client().logout().map_err(|e| e.to_string())
}

/// Session persisted by an earlier visit
pub fn current_session() -> Option<Session> {
    match client().session().session() {
        Ok(session) => session,
        Err(e) => {
            log::warn!("Could not read stored session: {}", e);
            None
        }
    }
}
