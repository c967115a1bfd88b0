// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Token-gate error type.
///
/// Every variant maps to a 401 with a stable `code` clients can branch on.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token supplied in the `Authorization` header.
    NoToken,
    /// Token is structurally valid but past its embedded expiry.
    TokenExpired,
    /// Token is malformed or its signature does not verify.
    InvalidToken,
    /// Token could not be decoded for any other reason.
    VerificationFailed,
}

#[derive(Serialize)]
struct AuthErrorBody {
    success: bool,
    error: String,
    code: &'static str,
}

impl AuthError {
    /// Get the stable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NoToken => "NO_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::VerificationFailed => "TOKEN_VERIFICATION_FAILED",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NoToken
            | AuthError::TokenExpired
            | AuthError::InvalidToken
            | AuthError::VerificationFailed => StatusCode::UNAUTHORIZED,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NoToken => write!(f, "Access denied. No token provided."),
            AuthError::TokenExpired => write!(f, "Token has expired. Please login again."),
            AuthError::InvalidToken => write!(f, "Invalid token."),
            AuthError::VerificationFailed => write!(f, "Token verification failed."),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            success: false,
            error: self.to_string(),
            code: self.error_code(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn no_token_returns_401_with_code() {
        let response = AuthError::NoToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "NO_TOKEN");
    }

    #[test]
    fn every_variant_is_unauthorized() {
        for error in [
            AuthError::NoToken,
            AuthError::TokenExpired,
            AuthError::InvalidToken,
            AuthError::VerificationFailed,
        ] {
            assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn expired_and_invalid_are_distinct_codes() {
        assert_ne!(
            AuthError::TokenExpired.error_code(),
            AuthError::InvalidToken.error_code()
        );
    }
}
