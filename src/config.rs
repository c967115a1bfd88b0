// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! # Runtime Configuration
//!
//! All configuration is read from the environment once at startup and held
//! immutably for the lifetime of the process. Components receive the settings
//! explicitly through [`crate::state::AppState`] rather than reading ambient
//! globals, so tests can run with distinct configurations in parallel.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HS256 signing secret for bearer tokens | dev fallback |
//! | `JWT_EXPIRES_IN` | Token lifetime, magnitude + unit (`m`/`h`/`d`) | `24h` |
//! | `ALLOWED_EMAIL_DOMAIN` | Required email suffix for login | `@zoftwarehub.com` |
//! | `WHITELISTED_EMAILS` | Optional comma-separated explicit allow-list | empty |
//! | `ADMIN_PASSWORD` | Shared admin password | `admin123` |
//! | `DATA_DIR` | Root directory for audit log and catalog db | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;

use chrono::{DateTime, Duration, Utc};

/// Environment variable name for the data directory path.
///
/// The audit log files and the product catalog database live here.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Fallback signing secret for local development only.
const DEV_JWT_SECRET: &str = "your-super-secret-jwt-key-change-in-production";

/// Unit suffix of a token lifetime string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeUnit {
    Minutes,
    Hours,
    Days,
}

/// Token lifetime expressed as a magnitude plus a unit suffix, e.g. `24h`.
///
/// Parsed once at startup. The same value drives both the signed `exp` claim
/// and the advisory absolute expiry echoed in the login response, so the two
/// cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetime {
    magnitude: i64,
    unit: LifetimeUnit,
}

impl TokenLifetime {
    /// Parse a lifetime string such as `24h`, `7d` or `30m`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        let (digits, unit) = match s.char_indices().last() {
            Some((idx, 'm')) => (&s[..idx], LifetimeUnit::Minutes),
            Some((idx, 'h')) => (&s[..idx], LifetimeUnit::Hours),
            Some((idx, 'd')) => (&s[..idx], LifetimeUnit::Days),
            _ => return Err(ConfigError::InvalidLifetime(s.to_string())),
        };

        let magnitude: i64 = digits
            .parse()
            .map_err(|_| ConfigError::InvalidLifetime(s.to_string()))?;

        if magnitude <= 0 {
            return Err(ConfigError::InvalidLifetime(s.to_string()));
        }

        Ok(Self { magnitude, unit })
    }

    /// The lifetime as a chrono duration.
    pub fn as_duration(&self) -> Duration {
        match self.unit {
            LifetimeUnit::Minutes => Duration::minutes(self.magnitude),
            LifetimeUnit::Hours => Duration::hours(self.magnitude),
            LifetimeUnit::Days => Duration::days(self.magnitude),
        }
    }

    /// Absolute expiry reached by adding this lifetime to `from`.
    pub fn expires_at(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        from + self.as_duration()
    }
}

impl std::fmt::Display for TokenLifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self.unit {
            LifetimeUnit::Minutes => 'm',
            LifetimeUnit::Hours => 'h',
            LifetimeUnit::Days => 'd',
        };
        write!(f, "{}{unit}", self.magnitude)
    }
}

/// Configuration errors surfaced during startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid token lifetime {0:?} (expected magnitude + unit, e.g. \"24h\")")]
    InvalidLifetime(String),
}

/// Authentication settings: signing secret, token lifetime, and the login
/// allow-list policy. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Symmetric HS256 signing secret.
    pub jwt_secret: String,
    /// Lifetime of issued tokens.
    pub token_lifetime: TokenLifetime,
    /// Required email suffix, e.g. `@zoftwarehub.com`.
    pub allowed_email_domain: String,
    /// Optional explicit allow-list on top of the domain check.
    /// Empty means the domain check alone decides.
    pub whitelisted_emails: Vec<String>,
    /// The shared admin password.
    pub admin_password: String,
}

impl AuthSettings {
    /// Load authentication settings from the environment.
    ///
    /// # Panics
    /// Panics on a malformed `JWT_EXPIRES_IN`; misconfiguration at startup is
    /// a programming/deployment error, not a request failure.
    pub fn from_env() -> Self {
        let lifetime_raw = env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| "24h".to_string());
        let token_lifetime =
            TokenLifetime::parse(&lifetime_raw).expect("Invalid JWT_EXPIRES_IN value");

        let whitelisted_emails = env::var("WHITELISTED_EMAILS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            token_lifetime,
            allowed_email_domain: env::var("ALLOWED_EMAIL_DOMAIN")
                .unwrap_or_else(|_| "@zoftwarehub.com".to_string()),
            whitelisted_emails,
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
        }
    }
}

#[cfg(test)]
impl AuthSettings {
    /// Fixed settings for tests; no environment reads.
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: "test-secret".to_string(),
            token_lifetime: TokenLifetime::parse("24h").unwrap(),
            allowed_email_domain: "@zoftwarehub.com".to_string(),
            whitelisted_emails: Vec::new(),
            admin_password: "admin123".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_hours() {
        let lifetime = TokenLifetime::parse("24h").unwrap();
        assert_eq!(lifetime.as_duration(), Duration::hours(24));
        assert_eq!(lifetime.to_string(), "24h");
    }

    #[test]
    fn parse_days_and_minutes() {
        assert_eq!(
            TokenLifetime::parse("7d").unwrap().as_duration(),
            Duration::days(7)
        );
        assert_eq!(
            TokenLifetime::parse("30m").unwrap().as_duration(),
            Duration::minutes(30)
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(TokenLifetime::parse("24").is_err());
        assert!(TokenLifetime::parse("h").is_err());
        assert!(TokenLifetime::parse("soon").is_err());
        assert!(TokenLifetime::parse("-1h").is_err());
        assert!(TokenLifetime::parse("0d").is_err());
    }

    #[test]
    fn expires_at_adds_lifetime() {
        let issued = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let lifetime = TokenLifetime::parse("24h").unwrap();
        assert_eq!(
            lifetime.expires_at(issued),
            Utc.with_ymd_and_hms(2026, 1, 16, 12, 0, 0).unwrap()
        );
    }
}
