// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! # API Data Models
//!
//! Request and response bodies for the gateway API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation. Wire field names are camelCase to match the existing
//! admin frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedUser;

// =============================================================================
// Auth Models
// =============================================================================

/// Login request body.
///
/// Fields are optional so that an incomplete body surfaces as a structured
/// `MISSING_CREDENTIALS` failure rather than a deserialization error.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub data: LoginData,
}

/// Token payload of a successful login.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    /// The signed bearer token.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Configured token lifetime, e.g. `24h`.
    pub expires_in: String,
    /// Advisory absolute expiry; the expiry inside the token is
    /// authoritative.
    pub expires_at: DateTime<Utc>,
    pub user: UserEnvelope,
}

/// Minimal user object echoed to the caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub email: String,
}

/// Response for `GET /auth/verify`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
    pub data: VerifyData,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyData {
    pub user: AuthenticatedUser,
    pub is_valid: bool,
}

/// Response for `GET /auth/me`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MeResponse {
    pub success: bool,
    pub data: AuthenticatedUser,
}

// =============================================================================
// Product Catalog Models
// =============================================================================

/// A product catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,
    /// URL-friendly product slug. Not unique; one product may ship several
    /// catalog variants under the same slug.
    pub slug: String,
    pub name: String,
    pub company: String,
    pub short_description: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub category: Option<String>,
    /// Enrichment progress of the catalog entry, 0-100.
    pub completion_percentage: u8,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when inserting a catalog entry.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub slug: String,
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub completion_percentage: u8,
}

/// Flattened card view for list pages.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub company: String,
    pub short_description: Option<String>,
    pub logo_url: Option<String>,
    pub category: Option<String>,
    pub completion_percentage: u8,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductSummary {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            slug: p.slug,
            name: p.name,
            company: p.company,
            short_description: p.short_description,
            logo_url: p.logo_url,
            category: p.category,
            completion_percentage: p.completion_percentage,
            created_at: p.created_at,
        }
    }
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// A page of results plus its pagination metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Single-item success envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemResponse<T> {
    pub success: bool,
    pub data: T,
}
