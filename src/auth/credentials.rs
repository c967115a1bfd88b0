// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! Credential validation policy.
//!
//! Login is domain-restricted and shared-secret: an email must carry the
//! corporate domain suffix (and, if configured, match the explicit
//! allow-list), and the password must equal the shared admin password.
//! The checks run in order and the first failure wins.

use std::sync::Arc;

use crate::config::AuthSettings;

/// Lower-case and trim an email before any comparison or storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Why a credential check failed.
///
/// The `Display` text is the internal diagnostic recorded in the audit
/// trail. It is never sent to the caller; the HTTP response collapses all
/// variants into one generic message so the password stage cannot be used
/// to probe which check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialRejection {
    /// Email field empty.
    MissingEmail,
    /// Email does not end with the allow-listed domain suffix.
    DomainNotAllowed { domain: String },
    /// An explicit allow-list is configured and the email is not on it.
    NotWhitelisted,
    /// Password does not match the shared admin password.
    WrongPassword,
}

impl std::fmt::Display for CredentialRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialRejection::MissingEmail => write!(f, "Email is required"),
            CredentialRejection::DomainNotAllowed { domain } => {
                write!(f, "Only {domain} emails are allowed")
            }
            CredentialRejection::NotWhitelisted => {
                write!(f, "This email is not authorized to access the system")
            }
            CredentialRejection::WrongPassword => write!(f, "Invalid credentials"),
        }
    }
}

impl std::error::Error for CredentialRejection {}

/// Pure decision function over the login inputs and the immutable settings.
///
/// No side effects; cheap to clone (shares the settings).
#[derive(Clone)]
pub struct CredentialValidator {
    settings: Arc<AuthSettings>,
}

impl CredentialValidator {
    pub fn new(settings: Arc<AuthSettings>) -> Self {
        Self { settings }
    }

    /// Check the email against the domain policy and the optional explicit
    /// allow-list. Returns the normalized email on success.
    pub fn validate_email(&self, email: &str) -> Result<String, CredentialRejection> {
        if email.trim().is_empty() {
            return Err(CredentialRejection::MissingEmail);
        }

        let normalized = normalize_email(email);

        // Enforce the corporate email domain
        if !normalized.ends_with(&self.settings.allowed_email_domain.to_lowercase()) {
            return Err(CredentialRejection::DomainNotAllowed {
                domain: self.settings.allowed_email_domain.clone(),
            });
        }

        // Fine-grained access control on top of the domain check
        if !self.settings.whitelisted_emails.is_empty() {
            let whitelisted = self
                .settings
                .whitelisted_emails
                .iter()
                .any(|entry| entry.to_lowercase() == normalized);

            if !whitelisted {
                return Err(CredentialRejection::NotWhitelisted);
            }
        }

        Ok(normalized)
    }

    /// Full credential check: email policy, then an exact case-sensitive
    /// comparison against the shared admin password.
    ///
    /// Async so the allow-list can later be backed by external state without
    /// changing every call site.
    pub async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, CredentialRejection> {
        let normalized = self.validate_email(email)?;

        if password != self.settings.admin_password {
            return Err(CredentialRejection::WrongPassword);
        }

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthSettings;

    fn validator() -> CredentialValidator {
        CredentialValidator::new(Arc::new(AuthSettings::for_tests()))
    }

    fn validator_with_whitelist(entries: &[&str]) -> CredentialValidator {
        let mut settings = AuthSettings::for_tests();
        settings.whitelisted_emails = entries.iter().map(|e| e.to_string()).collect();
        CredentialValidator::new(Arc::new(settings))
    }

    #[test]
    fn empty_email_is_rejected() {
        assert_eq!(
            validator().validate_email("   "),
            Err(CredentialRejection::MissingEmail)
        );
    }

    #[test]
    fn foreign_domain_is_rejected_with_domain_message() {
        let rejection = validator().validate_email("bob@gmail.com").unwrap_err();
        assert!(matches!(
            rejection,
            CredentialRejection::DomainNotAllowed { .. }
        ));
        assert_eq!(
            rejection.to_string(),
            "Only @zoftwarehub.com emails are allowed"
        );
    }

    #[test]
    fn email_is_normalized_before_checks() {
        let normalized = validator()
            .validate_email("  Bob@ZoftwareHub.COM ")
            .unwrap();
        assert_eq!(normalized, "bob@zoftwarehub.com");
    }

    #[test]
    fn whitelist_restricts_beyond_domain() {
        let validator = validator_with_whitelist(&["Admin@zoftwarehub.com"]);

        // On the list (case-insensitive match)
        assert!(validator.validate_email("admin@zoftwarehub.com").is_ok());

        // Correct domain but not on the list
        assert_eq!(
            validator.validate_email("bob@zoftwarehub.com"),
            Err(CredentialRejection::NotWhitelisted)
        );
    }

    #[tokio::test]
    async fn wrong_domain_fails_regardless_of_password() {
        let rejection = validator()
            .validate_credentials("bob@gmail.com", "admin123")
            .await
            .unwrap_err();
        assert!(matches!(
            rejection,
            CredentialRejection::DomainNotAllowed { .. }
        ));
    }

    #[tokio::test]
    async fn wrong_password_fails_with_generic_message() {
        let rejection = validator()
            .validate_credentials("bob@zoftwarehub.com", "hunter2")
            .await
            .unwrap_err();
        assert_eq!(rejection, CredentialRejection::WrongPassword);
        assert_eq!(rejection.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn password_check_is_case_sensitive() {
        let rejection = validator()
            .validate_credentials("bob@zoftwarehub.com", "Admin123")
            .await
            .unwrap_err();
        assert_eq!(rejection, CredentialRejection::WrongPassword);
    }

    #[tokio::test]
    async fn valid_credentials_return_normalized_email() {
        let normalized = validator()
            .validate_credentials("Bob@Zoftwarehub.com", "admin123")
            .await
            .unwrap();
        assert_eq!(normalized, "bob@zoftwarehub.com");
    }
}
