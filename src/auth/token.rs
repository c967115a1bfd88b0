// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! Bearer token issuance and verification.
//!
//! Tokens are self-contained HS256 JWTs signed with the shared secret from
//! [`AuthSettings`]. The server keeps no session state: validity is decided
//! purely by signature and embedded expiry at verification time.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::config::{AuthSettings, TokenLifetime};

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// The identity claim embedded in a token.
///
/// Immutable once signed; reconstructed by decoding, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Normalized (lower-cased, trimmed) email of the authenticated user.
    pub email: String,
    /// Login timestamp, RFC 3339.
    #[serde(rename = "loginAt")]
    pub login_at: String,
    /// Issued-at timestamp.
    pub iat: i64,
    /// Expiration timestamp. The source of truth for token validity.
    pub exp: i64,
}

/// A freshly signed token plus its advisory expiry metadata.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub token: String,
    /// The configured lifetime string, e.g. `24h`.
    pub expires_in: String,
    /// Absolute expiry computed from the same lifetime.
    ///
    /// Display-only; the `exp` claim inside the token is authoritative.
    pub expires_at: DateTime<Utc>,
}

/// Token issuance seam used by the login flow.
///
/// Verification stays on the concrete [`TokenService`]; issuance goes
/// through this trait.
pub trait TokenIssuer: Send + Sync {
    fn issue(
        &self,
        email: &str,
        login_at: DateTime<Utc>,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error>;
}

/// Issues and verifies bearer tokens against the shared signing secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: TokenLifetime,
}

impl TokenService {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
            lifetime: settings.token_lifetime,
        }
    }

    /// Sign a token for a validated identity.
    ///
    /// `login_at` drives both the `iat`/`loginAt` claims and the expiry:
    /// `exp = login_at + lifetime`.
    pub fn issue(
        &self,
        email: &str,
        login_at: DateTime<Utc>,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let expires_at = self.lifetime.expires_at(login_at);

        let claims = IdentityClaims {
            email: email.to_string(),
            login_at: login_at.to_rfc3339(),
            iat: login_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            token,
            expires_in: self.lifetime.to_string(),
            expires_at,
        })
    }

    /// Decode and verify a token, distinguishing expiry from malformation.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        let token_data = decode::<IdentityClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::Base64(_)
                | jsonwebtoken::errors::ErrorKind::Json(_)
                | jsonwebtoken::errors::ErrorKind::Utf8(_) => AuthError::InvalidToken,
                _ => AuthError::VerificationFailed,
            })?;

        Ok(token_data.claims)
    }
}

impl TokenIssuer for TokenService {
    fn issue(
        &self,
        email: &str,
        login_at: DateTime<Utc>,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        TokenService::issue(self, email, login_at)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthSettings;
    use chrono::Duration;

    fn service() -> TokenService {
        TokenService::new(&AuthSettings::for_tests())
    }

    #[test]
    fn issued_token_verifies_and_returns_same_email() {
        let service = service();
        let login_at = Utc::now();

        let issued = service.issue("a@x.com", login_at).unwrap();
        let claims = service.verify(&issued.token).unwrap();

        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.login_at, login_at.to_rfc3339());
    }

    #[test]
    fn advisory_expiry_matches_signed_exp() {
        let service = service();
        let issued = service.issue("a@x.com", Utc::now()).unwrap();
        let claims = service.verify(&issued.token).unwrap();

        assert_eq!(issued.expires_at.timestamp(), claims.exp);
        assert_eq!(issued.expires_in, "24h");
    }

    #[test]
    fn expired_token_fails_with_token_expired() {
        let service = service();

        // Sign claims whose expiry is well past the clock-skew leeway.
        let now = Utc::now();
        let claims = IdentityClaims {
            email: "a@x.com".to_string(),
            login_at: (now - Duration::hours(48)).to_rfc3339(),
            iat: (now - Duration::hours(48)).timestamp(),
            exp: (now - Duration::hours(24)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(service.verify(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn garbage_token_fails_with_invalid_token() {
        assert_eq!(
            service().verify("not-a-jwt"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn wrong_secret_fails_with_invalid_token() {
        let mut other_settings = AuthSettings::for_tests();
        other_settings.jwt_secret = "a-different-secret".to_string();
        let other = TokenService::new(&other_settings);

        let issued = other.issue("a@x.com", Utc::now()).unwrap();
        assert_eq!(service().verify(&issued.token), Err(AuthError::InvalidToken));
    }
}
