//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG, Base64, HMAC-SHA256, constant-time compare)
//! - Password hashing (salted PBKDF2-HMAC-SHA256, self-describing stored form)
//! - Tracing subscriber bootstrap

pub mod crypto;
pub mod password;
pub mod telemetry;
