//! Authenticated caller
//!
//! Every authorisation decision reads the role claim carried here. No
//! other source of identity is consulted.

use kernel::id::UserId;

use crate::domain::value_object::UserRole;
use crate::error::{BlogError, BlogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Principal {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn require_admin(&self) -> BlogResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(BlogError::Forbidden)
        }
    }

    /// Owner of the resource, or an admin
    pub fn require_owner_or_admin(&self, owner: &UserId) -> BlogResult<()> {
        if self.user_id == *owner || self.is_admin() {
            Ok(())
        } else {
            Err(BlogError::Forbidden)
        }
    }
}
