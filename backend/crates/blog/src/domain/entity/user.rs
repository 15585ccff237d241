//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    Email, FirstName, LastName, UserPassword, UserRole, Username,
};

/// User entity
///
/// The credential is replaced wholesale on password change, never edited.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: FirstName,
    pub last_name: LastName,
    /// Unique, case-sensitive
    pub username: Username,
    /// Unique, ASCII case-insensitive
    pub email: Email,
    pub password: UserPassword,
    pub role: UserRole,
    /// Inactive users cannot log in
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields replaced by an update
pub struct Profile {
    pub first_name: FirstName,
    pub last_name: LastName,
    pub username: Username,
    pub email: Email,
}

impl User {
    /// Create a new active user with the default role
    pub fn new(profile: Profile, password: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            username: profile.username,
            email: profile.email,
            password,
            role: UserRole::default(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.username = profile.username;
        self.email = profile.email;
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }
}
