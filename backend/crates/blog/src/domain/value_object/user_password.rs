//! User Password Value Object
//!
//! Domain wrapper around `platform::password`.
//!
//! - [`RawPassword`] is caller input that passed the strength rules (or
//!   the reduced login rules). Zeroized on drop.
//! - [`UserPassword`] is the stored credential. It can only be produced by
//!   hashing a [`RawPassword`] or by parsing a stored value, so plaintext
//!   and hash are never confused.
//!
//! Hashing and verification run on tokio's blocking pool.

use std::fmt;

use kernel::error::app_error::AppResult;
use kernel::validation::TextRule;
use once_cell::sync::Lazy;
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, Pbkdf2Hasher, is_hashed_form,
};
use regex::Regex;

use crate::error::{BlogError, BlogResult};

pub const PASSWORD: TextRule = TextRule::new("Password", "Password", 8, 50);

static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit regex"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid uppercase regex"));
static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("valid lowercase regex"));
static SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\W_]").expect("valid symbol regex"));

/// Complexity rules, checked in this order after the length rules
static COMPLEXITY: [(&Lazy<Regex>, &str, &str); 4] = [
    (&DIGIT, "MissingDigit", "Password must contain at least one number."),
    (&UPPERCASE, "MissingUppercase", "Password must contain at least one uppercase letter."),
    (&LOWERCASE, "MissingLowercase", "Password must contain at least one lowercase letter."),
    (&SYMBOL, "MissingSymbol", "Password must contain at least one special character."),
];

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Registration and password change rules
    ///
    /// 8 to 50 characters with at least one digit, one uppercase letter,
    /// one lowercase letter and one symbol.
    pub fn new(raw: &str) -> AppResult<Self> {
        let value = PASSWORD.check(raw)?;

        for (pattern, rule, message) in COMPLEXITY.iter() {
            if !pattern.is_match(value) {
                return Err(PASSWORD.violation(rule, *message));
            }
        }

        if is_hashed_form(value) {
            return Err(PASSWORD.violation(
                "ReservedPrefix",
                "Password cannot start with a reserved prefix.",
            ));
        }

        Self::wrap(value)
    }

    /// Login rules: presence and length only, with an opaque message
    pub fn for_login(raw: &str) -> AppResult<Self> {
        match PASSWORD.check(raw) {
            Ok(value) => Self::wrap(value),
            Err(e) if e.code() == "Password.Empty" => Err(e),
            Err(_) => Err(PASSWORD.violation("Invalid", "Password invalid.")),
        }
    }

    fn wrap(value: &str) -> AppResult<Self> {
        ClearTextPassword::new(value)
            .map(Self)
            .map_err(|_| PASSWORD.empty())
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

/// Result of checking a candidate against a stored credential
#[derive(Debug)]
pub enum Verification {
    Mismatch,
    Match,
    /// Matched a credential derived with an outdated iteration count; the
    /// replacement should be persisted.
    Rehashed(UserPassword),
}

impl Verification {
    pub fn is_match(&self) -> bool {
        !matches!(self, Verification::Mismatch)
    }
}

impl UserPassword {
    /// Hash a new password with a fresh salt
    pub async fn hash(raw: RawPassword) -> BlogResult<Self> {
        let hasher = Pbkdf2Hasher::default();
        tokio::task::spawn_blocking(move || hasher.hash(raw.inner()))
            .await
            .map_err(|e| BlogError::Internal(format!("Hashing task failed: {e}")))?
            .map(Self)
            .map_err(BlogError::from)
    }

    /// Parse a stored credential; an unparsable value is corruption
    pub fn from_stored(stored: impl Into<String>) -> BlogResult<Self> {
        HashedPassword::from_stored(stored)
            .map(Self)
            .map_err(BlogError::from)
    }

    /// Stand-in compared against when no user matched, so the miss costs
    /// a full derivation.
    pub fn decoy() -> Self {
        Self(HashedPassword::decoy())
    }

    /// Verify `candidate` and upgrade the hash when its iteration count is
    /// below the current default.
    pub async fn verify(&self, candidate: RawPassword) -> BlogResult<Verification> {
        let stored = self.0.clone();
        let hasher = Pbkdf2Hasher::default();

        tokio::task::spawn_blocking(move || {
            if !stored.verify(candidate.inner()) {
                return Ok(Verification::Mismatch);
            }
            if hasher.needs_rehash(&stored) {
                return hasher
                    .hash(candidate.inner())
                    .map(|upgraded| Verification::Rehashed(UserPassword(upgraded)));
            }
            Ok(Verification::Match)
        })
        .await
        .map_err(|e| BlogError::Internal(format!("Verification task failed: {e}")))?
        .map_err(BlogError::from)
    }

    pub fn iterations(&self) -> u32 {
        self.0.iterations()
    }

    /// Text form for storage
    pub fn as_stored(&self) -> &str {
        self.0.as_stored()
    }
}

impl From<PasswordHashError> for BlogError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::Malformed(reason) => BlogError::CorruptedCredential(reason),
            other => BlogError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::to_base64;

    #[test]
    fn test_complexity_order() {
        let code = |raw: &str| RawPassword::new(raw).unwrap_err().code().to_string();
        assert_eq!(code(""), "Password.Empty");
        assert_eq!(code("Ab1!"), "Password.TooShort");
        assert_eq!(code(&format!("Ab1!{}", "x".repeat(47))), "Password.TooLong");
        assert_eq!(code("Password!"), "Password.MissingDigit");
        assert_eq!(code("password1!"), "Password.MissingUppercase");
        assert_eq!(code("PASSWORD1!"), "Password.MissingLowercase");
        assert_eq!(code("Password1"), "Password.MissingSymbol");
        assert!(RawPassword::new("Str0ng!Pass").is_ok());
    }

    #[test]
    fn test_underscore_counts_as_symbol() {
        assert!(RawPassword::new("Str0ng_Pass").is_ok());
    }

    #[test]
    fn test_reserved_prefix() {
        let err = RawPassword::new("PBKDF2$Str0ng!Pass").unwrap_err();
        assert_eq!(err.code(), "Password.ReservedPrefix");
    }

    #[test]
    fn test_for_login() {
        assert_eq!(RawPassword::for_login(" ").unwrap_err().code(), "Password.Empty");
        assert_eq!(RawPassword::for_login("short").unwrap_err().code(), "Password.Invalid");
        // Complexity is not re-checked at login
        assert!(RawPassword::for_login("lowercaseonly").is_ok());
    }

    #[test]
    fn test_debug_redacted() {
        let raw = RawPassword::new("Str0ng!Pass").unwrap();
        assert!(!format!("{raw:?}").contains("Str0ng"));
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hashed = UserPassword::hash(RawPassword::new("Str0ng!Pass").unwrap())
            .await
            .unwrap();
        assert!(hashed.as_stored().starts_with("PBKDF2$100000$"));

        let ok = hashed
            .verify(RawPassword::for_login("Str0ng!Pass").unwrap())
            .await
            .unwrap();
        assert!(matches!(ok, Verification::Match));

        let wrong = hashed
            .verify(RawPassword::for_login("str0ng!pass").unwrap())
            .await
            .unwrap();
        assert!(!wrong.is_match());
    }

    #[tokio::test]
    async fn test_outdated_hash_is_upgraded() {
        let salt = [3u8; 16];
        let mut key = [0u8; 32];
        pbkdf2::pbkdf2_hmac::<sha2::Sha256>(b"Str0ng!Pass", &salt, 1_000, &mut key);
        let stored = format!("PBKDF2$1000${}${}", to_base64(&salt), to_base64(&key));

        let old = UserPassword::from_stored(stored).unwrap();
        assert_eq!(old.iterations(), 1_000);

        let result = old
            .verify(RawPassword::for_login("Str0ng!Pass").unwrap())
            .await
            .unwrap();
        let Verification::Rehashed(upgraded) = result else {
            panic!("expected rehash, got {result:?}");
        };
        assert_eq!(upgraded.iterations(), 100_000);
    }

    #[test]
    fn test_corrupted_stored_value() {
        let err = UserPassword::from_stored("Str0ng!Pass").unwrap_err();
        assert!(matches!(err, BlogError::CorruptedCredential(_)));
    }
}
