//! Password Hashing and Verification
//!
//! Salted PBKDF2-HMAC-SHA256 credentials in a self-describing text form:
//!
//! ```text
//! PBKDF2$<iterations>$<base64(salt)>$<base64(derived key)>
//! ```
//!
//! ## Security Features
//! - 16-byte salt from the OS CSPRNG, so equal passwords never share a hash
//! - Iteration count stored with each hash; old hashes stay verifiable
//!   after [`PBKDF2_ITERATIONS`] is raised, and [`Pbkdf2Hasher::needs_rehash`]
//!   flags them for upgrade
//! - Constant-time key comparison
//! - Plaintext zeroized on drop and redacted from `Debug`
//! - A stored value that does not parse is a data-integrity error, never a
//!   plain "wrong password"
//!
//! Hashing is deliberately slow and CPU-bound. Async callers should run it
//! on a blocking pool; it cannot be interrupted once started.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{constant_time_eq, from_base64, to_base64, try_random_bytes};

// ============================================================================
// Constants
// ============================================================================

/// Algorithm tag, first segment of every stored credential
pub const ALGORITHM_TAG: &str = "PBKDF2";

/// Iteration count for new hashes. Never lower this without a migration.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Highest iteration count accepted when hashing or parsing; anything
/// larger in a stored credential is treated as corruption.
pub const MAX_PBKDF2_ITERATIONS: u32 = 10_000_000;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes
pub const KEY_LEN: usize = 32;

const SEPARATOR: char = '$';

// ============================================================================
// Error Types
// ============================================================================

/// Why a stored credential could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("missing PBKDF2 tag")]
    UnknownAlgorithm,

    #[error("expected 4 '$'-separated segments")]
    SegmentCount,

    #[error("iteration count is not a decimal integer between 1 and 10000000")]
    InvalidIterations,

    #[error("salt is not valid base64")]
    InvalidSalt,

    #[error("salt is shorter than 16 bytes")]
    SaltTooShort,

    #[error("derived key is not valid base64")]
    InvalidKey,

    #[error("derived key is shorter than 32 bytes")]
    KeyTooShort,
}

/// Password hashing/verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// Plaintext was empty; raised before any hashing work
    #[error("Password cannot be empty")]
    EmptyPassword,

    /// Requested iteration count is below the floor
    #[error("Iteration count {requested} is below the minimum of {minimum}")]
    IterationsTooLow { requested: u32, minimum: u32 },

    /// Requested iteration count is above the ceiling
    #[error("Iteration count {requested} is above the maximum of {maximum}")]
    IterationsTooHigh { requested: u32, maximum: u32 },

    /// OS random source failed
    #[error("Secure random source unavailable: {0}")]
    RandomUnavailable(String),

    /// Stored credential does not match the expected format
    #[error("Stored credential is malformed: {0}")]
    Malformed(MalformedReason),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Only emptiness is checked here; strength rules belong to the caller.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordHashError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(PasswordHashError::EmptyPassword);
        }
        Ok(Self(raw))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// PBKDF2-HMAC-SHA256 hasher
///
/// Stateless apart from its iteration count; share it freely across
/// threads.
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, Pbkdf2Hasher};
///
/// let hasher = Pbkdf2Hasher::default();
/// let password = ClearTextPassword::new("Str0ng!Pass").unwrap();
/// let hashed = hasher.hash(&password).unwrap();
///
/// assert!(hashed.verify(&password));
/// assert!(hashed.as_stored().starts_with("PBKDF2$100000$"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Hasher {
    iterations: u32,
}

impl Default for Pbkdf2Hasher {
    fn default() -> Self {
        Self {
            iterations: PBKDF2_ITERATIONS,
        }
    }
}

impl Pbkdf2Hasher {
    /// Hasher with a higher iteration count than the default
    pub fn with_iterations(iterations: u32) -> Result<Self, PasswordHashError> {
        if iterations < PBKDF2_ITERATIONS {
            return Err(PasswordHashError::IterationsTooLow {
                requested: iterations,
                minimum: PBKDF2_ITERATIONS,
            });
        }
        if iterations > MAX_PBKDF2_ITERATIONS {
            return Err(PasswordHashError::IterationsTooHigh {
                requested: iterations,
                maximum: MAX_PBKDF2_ITERATIONS,
            });
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive a new credential with a fresh random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let salt = try_random_bytes(SALT_LEN)
            .map_err(|e| PasswordHashError::RandomUnavailable(e.to_string()))?;

        let key = derive_key(password.as_bytes(), &salt, self.iterations, KEY_LEN);

        let stored = format!(
            "{ALGORITHM_TAG}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            self.iterations,
            to_base64(&salt),
            to_base64(&key),
        );

        Ok(HashedPassword {
            stored,
            iterations: self.iterations,
            salt,
            key: key.to_vec(),
        })
    }

    /// True when `hashed` was derived with fewer iterations than this hasher
    pub fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        hashed.iterations < self.iterations
    }
}

fn derive_key(password: &[u8], salt: &[u8], iterations: u32, len: usize) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; len]);
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    key
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Parsed stored credential
///
/// Holding one of these proves the stored text is well-formed, so
/// [`HashedPassword::verify`] cannot fail for format reasons.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    stored: String,
    iterations: u32,
    salt: Vec<u8>,
    key: Vec<u8>,
}

impl HashedPassword {
    /// Parse a stored credential (e.g. from the database)
    pub fn from_stored(stored: impl Into<String>) -> Result<Self, PasswordHashError> {
        let stored = stored.into();
        let malformed = PasswordHashError::Malformed;

        let mut parts = stored.split(SEPARATOR);
        if parts.next() != Some(ALGORITHM_TAG) {
            return Err(malformed(MalformedReason::UnknownAlgorithm));
        }

        let (Some(iterations), Some(salt), Some(key), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed(MalformedReason::SegmentCount));
        };

        let iterations = parse_iterations(iterations)
            .ok_or(malformed(MalformedReason::InvalidIterations))?;

        let salt = from_base64(salt).map_err(|_| malformed(MalformedReason::InvalidSalt))?;
        if salt.len() < SALT_LEN {
            return Err(malformed(MalformedReason::SaltTooShort));
        }

        let key = from_base64(key).map_err(|_| malformed(MalformedReason::InvalidKey))?;
        if key.len() < KEY_LEN {
            return Err(malformed(MalformedReason::KeyTooShort));
        }

        Ok(Self {
            stored,
            iterations,
            salt,
            key,
        })
    }

    /// Well-formed credential with an all-zero salt and key.
    ///
    /// Verifying against it costs the same as verifying a real credential
    /// at [`PBKDF2_ITERATIONS`], so a lookup miss can still pay for a full
    /// derivation.
    pub fn decoy() -> Self {
        let salt = vec![0u8; SALT_LEN];
        let key = vec![0u8; KEY_LEN];
        Self {
            stored: format!(
                "{ALGORITHM_TAG}{SEPARATOR}{PBKDF2_ITERATIONS}{SEPARATOR}{}{SEPARATOR}{}",
                to_base64(&salt),
                to_base64(&key),
            ),
            iterations: PBKDF2_ITERATIONS,
            salt,
            key,
        }
    }

    /// Text form for storage
    pub fn as_stored(&self) -> &str {
        &self.stored
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Re-derive with the stored salt and iteration count and compare in
    /// constant time.
    pub fn verify(&self, candidate: &ClearTextPassword) -> bool {
        let derived = derive_key(candidate.as_bytes(), &self.salt, self.iterations, self.key.len());
        constant_time_eq(&derived, &self.key)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("iterations", &self.iterations)
            .field("hash", &"[HASH]")
            .finish()
    }
}

fn parse_iterations(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>()
        .ok()
        .filter(|&n| (1..=MAX_PBKDF2_ITERATIONS).contains(&n))
}

// ============================================================================
// Text-level API
// ============================================================================

/// Whether `value` carries the hash tag, i.e. is a stored credential
/// rather than a plaintext awaiting validation.
pub fn is_hashed_form(value: &str) -> bool {
    value
        .strip_prefix(ALGORITHM_TAG)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// Hash `plaintext` with the default hasher and return the stored form
pub fn hash(plaintext: &str) -> Result<String, PasswordHashError> {
    let password = ClearTextPassword::new(plaintext)?;
    let hashed = Pbkdf2Hasher::default().hash(&password)?;
    Ok(hashed.stored)
}

/// Verify `candidate` against a stored credential
///
/// - `Ok(true)` / `Ok(false)` - well-formed credential, password matched or not
/// - `Err(Malformed)` - the stored text is corrupt
pub fn verify(stored: &str, candidate: &str) -> Result<bool, PasswordHashError> {
    let hashed = HashedPassword::from_stored(stored)?;
    match ClearTextPassword::new(candidate) {
        Ok(candidate) => Ok(hashed.verify(&candidate)),
        // Nothing hashes to the empty string's absence of input
        Err(PasswordHashError::EmptyPassword) => Ok(false),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_SALT: &str = "AAAAAAAAAAAAAAAAAAAAAA==";
    const VALID_KEY: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    fn malformed(stored: &str) -> MalformedReason {
        match HashedPassword::from_stored(stored) {
            Err(PasswordHashError::Malformed(reason)) => reason,
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_pbkdf2_rfc7914_vector() {
        let key = derive_key(b"passwd", b"salt", 1, 32);
        let expected =
            hex::decode("55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc")
                .unwrap();
        assert_eq!(key.to_vec(), expected);
    }

    #[test]
    fn test_hash_and_verify() {
        let stored = hash("Str0ng!Pass").unwrap();
        assert!(verify(&stored, "Str0ng!Pass").unwrap());
        assert!(!verify(&stored, "str0ng!pass").unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash("Str0ng!Pass").unwrap();
        let second = hash("Str0ng!Pass").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_stored_format() {
        let stored = hash("Str0ng!Pass").unwrap();
        let parts: Vec<&str> = stored.split('$').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "PBKDF2");
        assert_eq!(parts[1], "100000");
        assert_eq!(from_base64(parts[2]).unwrap().len(), SALT_LEN);
        assert_eq!(from_base64(parts[3]).unwrap().len(), KEY_LEN);
        assert!(is_hashed_form(&stored));
    }

    #[test]
    fn test_empty_plaintext_rejected() {
        assert_eq!(hash(""), Err(PasswordHashError::EmptyPassword));
        assert!(ClearTextPassword::new("").is_err());
    }

    #[test]
    fn test_iteration_floor() {
        assert!(matches!(
            Pbkdf2Hasher::with_iterations(PBKDF2_ITERATIONS - 1),
            Err(PasswordHashError::IterationsTooLow { .. })
        ));
        assert_eq!(
            Pbkdf2Hasher::with_iterations(200_000).unwrap().iterations(),
            200_000
        );
    }

    #[test]
    fn test_iteration_ceiling() {
        assert!(matches!(
            Pbkdf2Hasher::with_iterations(MAX_PBKDF2_ITERATIONS + 1),
            Err(PasswordHashError::IterationsTooHigh { .. })
        ));
        assert!(Pbkdf2Hasher::with_iterations(MAX_PBKDF2_ITERATIONS).is_ok());
    }

    #[test]
    fn test_historical_iteration_count_still_verifies() {
        let password = ClearTextPassword::new("Str0ng!Pass").unwrap();
        let salt = [7u8; SALT_LEN];
        let key = derive_key(password.as_bytes(), &salt, 1_000, KEY_LEN);
        let stored = format!("PBKDF2$1000${}${}", to_base64(&salt), to_base64(&key));

        let hashed = HashedPassword::from_stored(stored).unwrap();
        assert!(hashed.verify(&password));
        assert!(Pbkdf2Hasher::default().needs_rehash(&hashed));
    }

    #[test]
    fn test_needs_rehash_current() {
        let hasher = Pbkdf2Hasher::default();
        let hashed = hasher
            .hash(&ClearTextPassword::new("Str0ng!Pass").unwrap())
            .unwrap();
        assert!(!hasher.needs_rehash(&hashed));
    }

    #[test]
    fn test_malformed_is_not_a_wrong_password() {
        let result = verify("plaintext-password", "plaintext-password");
        assert_eq!(
            result,
            Err(PasswordHashError::Malformed(MalformedReason::UnknownAlgorithm))
        );
    }

    #[test]
    fn test_malformed_reasons() {
        assert_eq!(
            malformed(&format!("BCRYPT$100000${VALID_SALT}${VALID_KEY}")),
            MalformedReason::UnknownAlgorithm
        );
        assert_eq!(
            malformed(&format!("PBKDF2$100000${VALID_SALT}")),
            MalformedReason::SegmentCount
        );
        assert_eq!(
            malformed(&format!("PBKDF2$100000${VALID_SALT}${VALID_KEY}$extra")),
            MalformedReason::SegmentCount
        );
        assert_eq!(
            malformed(&format!("PBKDF2$abc${VALID_SALT}${VALID_KEY}")),
            MalformedReason::InvalidIterations
        );
        assert_eq!(
            malformed(&format!("PBKDF2$0${VALID_SALT}${VALID_KEY}")),
            MalformedReason::InvalidIterations
        );
        assert_eq!(
            malformed(&format!("PBKDF2$+5${VALID_SALT}${VALID_KEY}")),
            MalformedReason::InvalidIterations
        );
        assert_eq!(
            malformed(&format!("PBKDF2$4294967295${VALID_SALT}${VALID_KEY}")),
            MalformedReason::InvalidIterations
        );
        assert_eq!(
            malformed(&format!("PBKDF2$10000001${VALID_SALT}${VALID_KEY}")),
            MalformedReason::InvalidIterations
        );
        assert_eq!(
            malformed(&format!("PBKDF2$100000$not*base64${VALID_KEY}")),
            MalformedReason::InvalidSalt
        );
        assert_eq!(
            malformed(&format!("PBKDF2$100000$AAAA${VALID_KEY}")),
            MalformedReason::SaltTooShort
        );
        assert_eq!(
            malformed(&format!("PBKDF2$100000${VALID_SALT}$%%%")),
            MalformedReason::InvalidKey
        );
        assert_eq!(
            malformed(&format!("PBKDF2$100000${VALID_SALT}$AAAA")),
            MalformedReason::KeyTooShort
        );
    }

    #[test]
    fn test_decoy_is_well_formed_and_never_matches() {
        let decoy = HashedPassword::decoy();
        assert_eq!(
            decoy.as_stored(),
            format!("PBKDF2$100000${VALID_SALT}${VALID_KEY}")
        );
        assert_eq!(HashedPassword::from_stored(decoy.as_stored()).unwrap(), decoy);
        assert!(!verify(decoy.as_stored(), "Str0ng!Pass").unwrap());
    }

    #[test]
    fn test_empty_candidate_is_false() {
        let stored = hash("Str0ng!Pass").unwrap();
        assert!(!verify(&stored, "").unwrap());
    }

    #[test]
    fn test_is_hashed_form() {
        assert!(is_hashed_form("PBKDF2$1$a$b"));
        assert!(!is_hashed_form("PBKDF2"));
        assert!(!is_hashed_form("PBKDF2x$1"));
        assert!(!is_hashed_form("Str0ng!Pass"));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret").unwrap();
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = Pbkdf2Hasher::default().hash(&password).unwrap();
        let debug_output = format!("{:?}", hashed);
        assert!(!debug_output.contains(hashed.as_stored()));
    }

    #[test]
    #[ignore = "timing-sensitive; run manually on a quiet machine"]
    fn test_verify_timing_does_not_depend_on_mismatch_position() {
        use std::time::Instant;

        let password = ClearTextPassword::new("Str0ng!Pass").unwrap();
        let hashed = Pbkdf2Hasher::default().hash(&password).unwrap();

        let mut early = hashed.clone();
        early.key[0] ^= 0xff;
        let mut late = hashed.clone();
        late.key[KEY_LEN - 1] ^= 0xff;

        let time = |h: &HashedPassword| {
            let start = Instant::now();
            for _ in 0..5 {
                assert!(!h.verify(&password));
            }
            start.elapsed().as_secs_f64()
        };

        let (early_secs, late_secs) = (time(&early), time(&late));
        let ratio = early_secs.max(late_secs) / early_secs.min(late_secs);
        assert!(ratio < 1.5, "ratio {ratio}");
    }
}
