//! Application Configuration
//!
//! Configuration for the Blog application layer.

use std::fmt;
use std::time::Duration;

use platform::crypto::{from_base64, try_random_bytes};
use thiserror::Error;

use crate::domain::value_object::page::MAX_PAGE_SIZE;

pub const ENV_TOKEN_SECRET: &str = "BLOG_TOKEN_SECRET";
pub const ENV_TOKEN_TTL_SECS: &str = "BLOG_TOKEN_TTL_SECS";
pub const ENV_MAX_PAGE_SIZE: &str = "BLOG_MAX_PAGE_SIZE";

/// Longest accepted token lifetime (30 days)
pub const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 3600;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BLOG_TOKEN_SECRET must be set in production")]
    MissingSecret,

    #[error("{0} must be base64 encoding exactly 32 bytes")]
    InvalidSecret(&'static str),

    #[error("{var} has invalid value `{value}`")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Secure random source unavailable: {0}")]
    RandomUnavailable(String),
}

/// Blog application configuration
#[derive(Clone)]
pub struct BlogConfig {
    /// Token signing key for HMAC-SHA256 (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime (2 hours)
    pub token_ttl: Duration,
    /// Upper bound applied to requested page sizes, at most `MAX_PAGE_SIZE`
    pub max_page_size: u32,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(2 * 3600), // 2 hours
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl fmt::Debug for BlogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlogConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("max_page_size", &self.max_page_size)
            .finish()
    }
}

impl BlogConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Result<Self, ConfigError> {
        Ok(Self {
            token_secret: random_secret()?,
            ..Default::default()
        })
    }

    /// Create config for development (long-lived tokens)
    pub fn development() -> Result<Self, ConfigError> {
        Ok(Self {
            token_ttl: Duration::from_secs(24 * 3600),
            ..Self::with_random_secret()?
        })
    }

    /// Load from the process environment, after reading `.env` if present
    ///
    /// In debug builds a missing secret falls back to a random one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token_secret = match lookup(ENV_TOKEN_SECRET) {
            Some(encoded) => decode_secret(&encoded)?,
            None if cfg!(debug_assertions) => {
                tracing::warn!("{ENV_TOKEN_SECRET} not set, using a random secret");
                random_secret()?
            }
            None => return Err(ConfigError::MissingSecret),
        };

        let defaults = Self::default();

        let token_ttl = match lookup(ENV_TOKEN_TTL_SECS) {
            Some(raw) => {
                let secs = parse_positive(ENV_TOKEN_TTL_SECS, &raw)?;
                if secs > MAX_TOKEN_TTL_SECS {
                    return Err(ConfigError::InvalidNumber {
                        var: ENV_TOKEN_TTL_SECS,
                        value: raw,
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.token_ttl,
        };

        let max_page_size = match lookup(ENV_MAX_PAGE_SIZE) {
            Some(raw) => {
                let size = parse_positive(ENV_MAX_PAGE_SIZE, &raw)?;
                u32::try_from(size)
                    .ok()
                    .filter(|size| *size <= MAX_PAGE_SIZE)
                    .ok_or(ConfigError::InvalidNumber {
                        var: ENV_MAX_PAGE_SIZE,
                        value: raw,
                    })?
            }
            None => defaults.max_page_size,
        };

        Ok(Self {
            token_secret,
            token_ttl,
            max_page_size,
        })
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

fn random_secret() -> Result<[u8; 32], ConfigError> {
    let bytes = try_random_bytes(32).map_err(|e| ConfigError::RandomUnavailable(e.to_string()))?;
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&bytes);
    Ok(secret)
}

fn decode_secret(encoded: &str) -> Result<[u8; 32], ConfigError> {
    from_base64(encoded.trim())
        .ok()
        .and_then(|bytes| <[u8; 32]>::try_from(bytes.as_slice()).ok())
        .ok_or(ConfigError::InvalidSecret(ENV_TOKEN_SECRET))
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            var,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use platform::crypto::to_base64;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BlogConfig::default();
        assert_eq!(config.token_ttl_secs(), 7200);
        assert_eq!(config.max_page_size, 100);
    }

    #[test]
    fn test_random_secret() {
        let a = BlogConfig::with_random_secret().unwrap();
        let b = BlogConfig::with_random_secret().unwrap();
        assert_ne!(a.token_secret, b.token_secret);
        assert_eq!(BlogConfig::development().unwrap().token_ttl_secs(), 86_400);
    }

    #[test]
    fn test_from_lookup() {
        let secret = to_base64(&[7u8; 32]);
        let config = BlogConfig::from_lookup(lookup(&[
            (ENV_TOKEN_SECRET, secret.as_str()),
            (ENV_TOKEN_TTL_SECS, "60"),
            (ENV_MAX_PAGE_SIZE, "20"),
        ]))
        .unwrap();

        assert_eq!(config.token_secret, [7u8; 32]);
        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert_eq!(config.max_page_size, 20);
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let short = to_base64(&[7u8; 16]);
        assert!(matches!(
            BlogConfig::from_lookup(lookup(&[(ENV_TOKEN_SECRET, short.as_str())])),
            Err(ConfigError::InvalidSecret(_))
        ));

        let secret = to_base64(&[7u8; 32]);
        assert!(matches!(
            BlogConfig::from_lookup(lookup(&[
                (ENV_TOKEN_SECRET, secret.as_str()),
                (ENV_MAX_PAGE_SIZE, "500"),
            ])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            BlogConfig::from_lookup(lookup(&[
                (ENV_TOKEN_SECRET, secret.as_str()),
                (ENV_TOKEN_TTL_SECS, "soon"),
            ])),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_token_ttl_is_bounded() {
        let secret = to_base64(&[7u8; 32]);
        let ttl = |raw: &str| {
            BlogConfig::from_lookup(lookup(&[
                (ENV_TOKEN_SECRET, secret.as_str()),
                (ENV_TOKEN_TTL_SECS, raw),
            ]))
        };

        let max = MAX_TOKEN_TTL_SECS.to_string();
        assert_eq!(ttl(&max).unwrap().token_ttl.as_secs(), MAX_TOKEN_TTL_SECS);

        let over = (MAX_TOKEN_TTL_SECS + 1).to_string();
        let huge = i64::MAX.to_string();
        for raw in [over.as_str(), huge.as_str(), "18446744073709551615"] {
            assert!(
                matches!(ttl(raw), Err(ConfigError::InvalidNumber { .. })),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_ttl_secs_saturates() {
        let config = BlogConfig {
            token_ttl: Duration::from_secs(u64::MAX),
            ..BlogConfig::default()
        };
        assert_eq!(config.token_ttl_secs(), i64::MAX);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = BlogConfig::default();
        assert!(format!("{config:?}").contains("REDACTED"));
    }
}
