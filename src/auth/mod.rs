// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! # Authentication Module
//!
//! Shared-secret login for the internal admin API.
//!
//! ## Auth Flow
//!
//! 1. Client posts `email` + `password` to `/auth/login`
//! 2. [`credentials::CredentialValidator`] checks the corporate email domain,
//!    the optional explicit allow-list, and the shared admin password
//! 3. [`token::TokenService`] signs an HS256 JWT carrying the normalized
//!    email and the login timestamp
//! 4. Protected routes take the [`Auth`] extractor, which verifies the
//!    `Authorization: Bearer <token>` header and attaches the identity
//!
//! ## Security
//!
//! - Credential failures are answered with one generic message; the precise
//!   rejection reason goes only to the audit trail
//! - Tokens are stateless: validity is signature + embedded expiry, with no
//!   server-side session store and no revocation before natural expiry
//! - Token verification distinguishes expired, malformed, and
//!   otherwise-undecodable tokens with stable error codes

pub mod credentials;
pub mod error;
pub mod extractor;
pub mod token;

pub use credentials::{normalize_email, CredentialRejection, CredentialValidator};
pub use error::AuthError;
pub use extractor::{Auth, AuthenticatedUser, OptionalAuth};
pub use token::{IdentityClaims, IssuedToken, TokenIssuer, TokenService};
