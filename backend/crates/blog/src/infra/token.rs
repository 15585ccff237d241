//! HMAC-signed access tokens
//!
//! ```text
//! base64url(json claims) "." base64url(HMAC-SHA256(secret, first segment))
//! ```
//!
//! Claims are `{ "sub": <user uuid>, "role": "User" | "Admin", "exp": <unix seconds> }`.

use std::time::Duration;

use chrono::Utc;
use kernel::id::UserId;
use platform::crypto::{constant_time_eq, from_base64_url, hmac_sha256, to_base64_url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::BlogConfig;
use crate::application::principal::Principal;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::value_object::UserRole;
use crate::error::{BlogError, BlogResult};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: UserRole,
    exp: i64,
}

/// Token service signing with the configured secret
pub struct HmacTokenService {
    secret: [u8; 32],
    ttl: Duration,
}

impl HmacTokenService {
    pub fn new(config: &BlogConfig) -> Self {
        Self {
            secret: config.token_secret,
            ttl: config.token_ttl,
        }
    }

    fn sign(&self, payload: &str) -> String {
        to_base64_url(&hmac_sha256(&self.secret, payload.as_bytes()))
    }

    fn encode(&self, claims: &Claims) -> BlogResult<String> {
        let json = serde_json::to_vec(claims)
            .map_err(|e| BlogError::Internal(format!("Token encoding failed: {e}")))?;
        let payload = to_base64_url(&json);
        let signature = self.sign(&payload);
        Ok(format!("{payload}.{signature}"))
    }
}

impl TokenService for HmacTokenService {
    fn issue(&self, user: &User) -> BlogResult<String> {
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| Utc::now().timestamp().checked_add(ttl))
            .ok_or_else(|| BlogError::Internal("Token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: user.id.into_uuid(),
            role: user.role,
            exp,
        };
        self.encode(&claims)
    }

    fn authenticate(&self, token: &str) -> BlogResult<Principal> {
        let (payload, signature) = token.split_once('.').ok_or(BlogError::InvalidToken)?;

        let signature = from_base64_url(signature).map_err(|_| BlogError::InvalidToken)?;
        let expected = hmac_sha256(&self.secret, payload.as_bytes());
        if !constant_time_eq(&expected, &signature) {
            return Err(BlogError::InvalidToken);
        }

        let json = from_base64_url(payload).map_err(|_| BlogError::InvalidToken)?;
        let claims: Claims = serde_json::from_slice(&json).map_err(|_| BlogError::InvalidToken)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(BlogError::InvalidToken);
        }

        Ok(Principal::new(UserId::from_uuid(claims.sub), claims.role))
    }
}
