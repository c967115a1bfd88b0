// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

use std::sync::Arc;

use crate::audit::AuditSink;
use crate::auth::{CredentialValidator, TokenIssuer, TokenService};
use crate::catalog::ProductCatalog;
use crate::config::AuthSettings;

/// Shared application state.
///
/// Everything here is read-only after startup; requests share it without
/// locking. The audit sink performs independent append operations that need
/// no cross-request coordination.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<AuthSettings>,
    pub validator: CredentialValidator,
    /// Verifies bearer tokens at the gate.
    pub tokens: TokenService,
    /// Signs tokens for the login flow.
    pub issuer: Arc<dyn TokenIssuer>,
    pub audit: Arc<dyn AuditSink>,
    pub catalog: Arc<ProductCatalog>,
}

impl AppState {
    pub fn new(
        settings: AuthSettings,
        audit: Arc<dyn AuditSink>,
        catalog: Arc<ProductCatalog>,
    ) -> Self {
        let settings = Arc::new(settings);
        let tokens = TokenService::new(&settings);
        Self {
            validator: CredentialValidator::new(settings.clone()),
            issuer: Arc::new(tokens.clone()),
            tokens,
            settings,
            audit,
            catalog,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over fixed settings, an in-memory audit sink, and an in-memory
    /// catalog.
    pub fn for_tests() -> Self {
        Self::new(
            AuthSettings::for_tests(),
            Arc::new(crate::audit::testing::MemoryAuditLog::new()),
            Arc::new(ProductCatalog::in_memory().unwrap()),
        )
    }

    /// Swap in a specific audit sink (e.g. a shared or failing one).
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Swap in a specific token issuer (e.g. a failing one).
    pub fn with_issuer(mut self, issuer: Arc<dyn TokenIssuer>) -> Self {
        self.issuer = issuer;
        self
    }
}
