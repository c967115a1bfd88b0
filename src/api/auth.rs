// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! Login flow and token introspection endpoints.
//!
//! The login handler walks a fixed pipeline: input presence check →
//! credential validation → token issuance → audit → response. Every
//! terminal branch, success or failure, records exactly one audit entry
//! before responding; audit failures never change the response.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::USER_AGENT, HeaderMap},
    Json,
};
use chrono::Utc;

use crate::{
    audit::{record_login, AuditRecord},
    auth::Auth,
    error::ApiError,
    models::{
        LoginData, LoginRequest, LoginResponse, MeResponse, UserEnvelope, VerifyData,
        VerifyResponse,
    },
    state::AppState,
};

/// First client address from `X-Forwarded-For`, if present.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal login failure")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let ip = client_ip(&headers);
    let agent = user_agent(&headers);

    // A body that does not deserialize (wrong types, invalid JSON) is an
    // incomplete login attempt like any other: audited, stable envelope
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed login body");
            record_login(
                state.audit.as_ref(),
                AuditRecord::new(None, false)
                    .with_reason("MISSING_CREDENTIALS")
                    .with_ip(ip)
                    .with_user_agent(agent),
            );
            return Err(ApiError::bad_request("Email and password are required")
                .with_code("MISSING_CREDENTIALS"));
        }
    };

    let email = body.email.as_deref().unwrap_or("");
    let password = body.password.as_deref().unwrap_or("");

    // Input presence check; bypasses the credential and token stages
    if email.trim().is_empty() || password.is_empty() {
        record_login(
            state.audit.as_ref(),
            AuditRecord::new(body.email.as_deref(), false)
                .with_reason("MISSING_CREDENTIALS")
                .with_ip(ip)
                .with_user_agent(agent),
        );
        return Err(ApiError::bad_request("Email and password are required")
            .with_code("MISSING_CREDENTIALS"));
    }

    let email = match state.validator.validate_credentials(email, password).await {
        Ok(normalized) => normalized,
        Err(rejection) => {
            tracing::warn!(email = %email, reason = %rejection, "Login rejected");

            // The precise reason stays in the audit trail; the caller gets
            // one generic message to prevent email enumeration
            record_login(
                state.audit.as_ref(),
                AuditRecord::new(Some(email), false)
                    .with_reason(rejection.to_string())
                    .with_ip(ip)
                    .with_user_agent(agent),
            );
            return Err(
                ApiError::unauthorized("Invalid email or password").with_code("INVALID_CREDENTIALS")
            );
        }
    };

    let login_at = Utc::now();
    let issued = match state.issuer.issue(&email, login_at) {
        Ok(issued) => issued,
        Err(e) => {
            tracing::error!(error = %e, "Token issuance failed");
            record_login(
                state.audit.as_ref(),
                AuditRecord::new(Some(&email), false)
                    .with_reason("LOGIN_ERROR")
                    .with_ip(ip)
                    .with_user_agent(agent),
            );
            return Err(
                ApiError::internal("An error occurred during login").with_code("LOGIN_ERROR")
            );
        }
    };

    record_login(
        state.audit.as_ref(),
        AuditRecord::new(Some(&email), true)
            .with_ip(ip)
            .with_user_agent(agent),
    );
    tracing::info!(email = %email, "Login successful");

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        data: LoginData {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            expires_at: issued.expires_at,
            user: UserEnvelope { email },
        },
    }))
}

/// The gate already verified the token; echo the attached identity.
#[utoipa::path(
    get,
    path = "/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Missing, expired or invalid token")
    )
)]
pub async fn verify(Auth(user): Auth) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        success: true,
        message: "Token is valid".to_string(),
        data: VerifyData {
            user,
            is_valid: true,
        },
    })
}

/// Current authenticated identity from the token.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Authenticated user info", body = MeResponse),
        (status = 401, description = "Missing, expired or invalid token")
    )
)]
pub async fn me(Auth(user): Auth) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        data: user,
    })
}
