// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! Admin API Gateway
//!
//! Internal administrative API: authenticates a small, domain-restricted set
//! of users with a shared admin secret, issues JWT bearer tokens, gates the
//! product catalog read API, and records every login attempt for audit.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential validation, token service, request gate
//! - `audit` - Append-only login audit trail
//! - `catalog` - Product catalog store (redb)

pub mod api;
pub mod audit;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
