//! # Session Identity
//!
//! The browser bridge identifies its user session with the
//! `x-payment-session` header. Requests without one get a fresh UUID, and
//! every response echoes the id back so the bridge can keep using it.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use uuid::Uuid;

pub const SESSION_HEADER: HeaderName = HeaderName::from_static("x-payment-session");

const MAX_SESSION_ID_LEN: usize = 128;

/// Payment session id for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSessionId {
    pub id: String,
    /// True when the request carried no usable id and one was generated
    pub minted: bool,
}

impl PaymentSessionId {
    pub fn as_str(&self) -> &str {
        &self.id
    }

    fn from_header(value: Option<&HeaderValue>) -> Self {
        let supplied = value
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_SESSION_ID_LEN);

        match supplied {
            Some(id) => Self {
                id: id.to_string(),
                minted: false,
            },
            None => Self {
                id: Uuid::new_v4().to_string(),
                minted: true,
            },
        }
    }

    /// Attach the session header to a response.
    pub fn respond(&self, body: impl IntoResponse) -> Response {
        let mut response = body.into_response();
        if let Ok(value) = HeaderValue::from_str(&self.id) {
            response.headers_mut().insert(SESSION_HEADER, value);
        }
        response
    }
}

impl<S> FromRequestParts<S> for PaymentSessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_header(parts.headers.get(&SESSION_HEADER)))
    }
}
