//! Per-session anti-forgery tokens.
//!
//! # Responsibility
//! - Issue a random token cookie on form pages and reuse it afterwards.
//! - Verify that every mutating POST echoes the cookie token in its body.
//!
//! # Invariants
//! - Tokens are 32 lowercase hex characters; other cookie values are ignored.
//! - Comparison runs over every byte regardless of where a mismatch occurs.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const CSRF_COOKIE: &str = "contacts_csrf";
pub const CSRF_FIELD: &str = "csrfToken";

const TOKEN_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrfError {
    MissingCookie,
    MissingField,
    Mismatch,
}

impl Display for CsrfError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCookie => write!(f, "anti-forgery cookie missing"),
            Self::MissingField => write!(f, "anti-forgery form field missing"),
            Self::Mismatch => write!(f, "anti-forgery token mismatch"),
        }
    }
}

impl std::error::Error for CsrfError {}

/// Token for the current session, plus whether it was minted just now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    value: String,
    issued: bool,
}

impl CsrfToken {
    /// Reuses the session cookie token, or mints a new one.
    pub fn for_request(headers: &HeaderMap) -> Self {
        match cookie_token(headers) {
            Some(value) => Self {
                value,
                issued: false,
            },
            None => Self {
                value: Uuid::new_v4().simple().to_string(),
                issued: true,
            },
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Adds `Set-Cookie` to `response` when the token was minted now.
    pub fn attach(&self, mut response: Response) -> Response {
        if self.issued {
            let cookie = format!(
                "{CSRF_COOKIE}={}; Path=/; HttpOnly; SameSite=Strict",
                self.value
            );
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

/// Checks the submitted form token against the session cookie.
pub fn verify(headers: &HeaderMap, submitted: &str) -> Result<(), CsrfError> {
    let expected = cookie_token(headers).ok_or(CsrfError::MissingCookie)?;
    let submitted = submitted.trim();
    if submitted.is_empty() {
        return Err(CsrfError::MissingField);
    }
    if constant_time_eq(expected.as_bytes(), submitted.as_bytes()) {
        Ok(())
    } else {
        Err(CsrfError::Mismatch)
    }
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CSRF_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| is_well_formed(value))
        .map(str::to_string)
}

fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN
        && token
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
