//! Access token port

use crate::application::principal::Principal;
use crate::domain::entity::user::User;
use crate::error::BlogResult;

/// Issues access tokens at login and turns presented tokens back into a
/// [`Principal`].
pub trait TokenService: Send + Sync {
    fn issue(&self, user: &User) -> BlogResult<String>;

    /// Fails with `BlogError::InvalidToken` for tampered, malformed or
    /// expired tokens.
    fn authenticate(&self, token: &str) -> BlogResult<Principal>;
}
