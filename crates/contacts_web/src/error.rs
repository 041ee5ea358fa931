//! Mapping of use-case failures to HTTP responses.

use crate::csrf::CsrfError;
use crate::views;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use contacts_core::{ContactServiceError, RepoError};
use log::{error, warn};
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum WebError {
    /// Path id was not an integer.
    InvalidPathId { action: &'static str, raw: String },
    Csrf(CsrfError),
    Service(ContactServiceError),
    LockPoisoned,
}

impl Display for WebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPathId { action, raw } => {
                write!(f, "invalid contact id `{raw}` (action {action})")
            }
            Self::Csrf(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::LockPoisoned => write!(f, "database lock poisoned"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csrf(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::InvalidPathId { .. } | Self::LockPoisoned => None,
        }
    }
}

impl From<ContactServiceError> for WebError {
    fn from(value: ContactServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for WebError {
    fn from(value: RepoError) -> Self {
        Self::Service(ContactServiceError::Persistence(value))
    }
}

impl From<CsrfError> for WebError {
    fn from(value: CsrfError) -> Self {
        Self::Csrf(value)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidPathId { action, raw } => {
                warn!(
                    "event=contact_not_found module=web action={action} reason=invalid_id raw_id={}",
                    raw.escape_debug()
                );
                not_found()
            }
            Self::Service(ContactServiceError::NotFound { .. }) => not_found(),
            Self::Csrf(err) => {
                warn!("event=csrf_rejected module=web status=error reason={err}");
                (StatusCode::BAD_REQUEST, "Bad Request: anti-forgery token").into_response()
            }
            Self::Service(ContactServiceError::Persistence(err)) => {
                error!("event=request_failed module=web status=error error={err}");
                internal_error()
            }
            Self::LockPoisoned => {
                error!("event=request_failed module=web status=error error=db_lock_poisoned");
                internal_error()
            }
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found())).into_response()
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
