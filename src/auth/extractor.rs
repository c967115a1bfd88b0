// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! Axum extractors gating protected routes.
//!
//! Use the `Auth` extractor in handlers to require a valid bearer token:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AuthError, IdentityClaims};
use crate::state::AppState;

/// The identity attached to an authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Normalized email from the token claims.
    pub email: String,
    /// Login timestamp from the token claims, RFC 3339.
    #[serde(rename = "loginAt")]
    pub login_at: String,
}

impl From<IdentityClaims> for AuthenticatedUser {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            email: claims.email,
            login_at: claims.login_at,
        }
    }
}

/// Mandatory authentication extractor.
///
/// Rejects the request with a 401 (`NO_TOKEN`, `TOKEN_EXPIRED`,
/// `INVALID_TOKEN` or `TOKEN_VERIFICATION_FAILED`) unless a valid bearer
/// token is presented. On success the decoded identity is available to the
/// handler and cached in the request extensions.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // An upstream layer may already have attached the identity
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let token = bearer_token(parts).ok_or(AuthError::NoToken)?;

        let claims = state.tokens.verify(&token)?;
        let user = AuthenticatedUser::from(claims);

        parts.extensions.insert(user.clone());
        Ok(Auth(user))
    }
}

/// Optional authentication extractor.
///
/// A missing or invalid token yields `None` instead of rejecting; the
/// request proceeds either way. For endpoints where authentication augments
/// but does not gate behavior.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(user)) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// A header without a token after the scheme counts as no token supplied.
fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::Request;
    use chrono::Utc;

    fn request_parts(auth_header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = auth_header {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_no_token() {
        let state = AppState::for_tests();
        let mut parts = request_parts(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::NoToken)));
    }

    #[tokio::test]
    async fn bare_scheme_is_no_token() {
        let state = AppState::for_tests();
        let mut parts = request_parts(Some("Bearer "));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::NoToken)));
    }

    #[tokio::test]
    async fn valid_token_attaches_identity() {
        let state = AppState::for_tests();
        let issued = state.tokens.issue("bob@zoftwarehub.com", Utc::now()).unwrap();
        let mut parts = request_parts(Some(&format!("Bearer {}", issued.token)));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.email, "bob@zoftwarehub.com");

        // Identity is cached for downstream extractors
        assert_eq!(parts.extensions.get::<AuthenticatedUser>(), Some(&user));
    }

    #[tokio::test]
    async fn forged_token_is_invalid() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let state = AppState::for_tests();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(
            br#"{"email":"bob@zoftwarehub.com","loginAt":"2026-01-01T00:00:00Z","iat":0,"exp":9999999999}"#,
        );
        let token = format!("{header}.{claims}.forged_signature");
        let mut parts = request_parts(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn extractor_prefers_extensions() {
        let state = AppState::for_tests();
        let mut parts = request_parts(None);

        let user = AuthenticatedUser {
            email: "preattached@zoftwarehub.com".to_string(),
            login_at: "2026-01-01T00:00:00+00:00".to_string(),
        };
        parts.extensions.insert(user.clone());

        let Auth(extracted) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(extracted, user);
    }

    #[tokio::test]
    async fn optional_auth_returns_none_without_token() {
        let state = AppState::for_tests();
        let mut parts = request_parts(None);

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn optional_auth_returns_none_on_invalid_token() {
        let state = AppState::for_tests();
        let mut parts = request_parts(Some("Bearer definitely-not-a-jwt"));

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn optional_auth_returns_identity_with_valid_token() {
        let state = AppState::for_tests();
        let issued = state.tokens.issue("bob@zoftwarehub.com", Utc::now()).unwrap();
        let mut parts = request_parts(Some(&format!("Bearer {}", issued.token)));

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.unwrap().email, "bob@zoftwarehub.com");
    }
}
