//! Login User Use Case
//!
//! Verifies credentials and issues an access token.
//!
//! An unknown username, a wrong password and an inactive account all
//! produce the same `User.InvalidCredentials` error, and an unknown
//! username is still verified against a decoy credential so it costs a
//! full key derivation. A stored credential that fails to parse is
//! reported as corruption instead.

use std::sync::Arc;

use kernel::error::error_list::{Combine, Outcome};
use kernel::validation::{FieldRule, Handler, Request};

use crate::application::dto::LoggedUser;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, UserPassword, Username, Verification};
use crate::error::BlogError;

/// Login input
pub struct LoginUser {
    pub username: String,
    pub password: String,
}

impl Request for LoginUser {
    type Response = LoggedUser;
    const NAME: &'static str = "LoginUser";
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule::new("Username", |r: &Self| Username::for_login(&r.username).map(drop)),
        FieldRule::new("Password", |r: &Self| RawPassword::for_login(&r.password).map(drop)),
    ];
}

/// Login handler
pub struct LoginUserHandler<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
}

impl<U: UserRepository, T: TokenService> LoginUserHandler<U, T> {
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self { users, tokens }
    }
}

impl<U, T> Handler<LoginUser> for LoginUserHandler<U, T>
where
    U: UserRepository + Send + Sync,
    T: TokenService,
{
    async fn handle(&self, request: LoginUser) -> Outcome<LoggedUser> {
        let (username, password) = (
            Username::for_login(&request.username),
            RawPassword::for_login(&request.password),
        )
            .combine()?;

        let found = self.users.find_by_username(&username).await?;

        let credential = found
            .as_ref()
            .map_or_else(UserPassword::decoy, |user| user.password.clone());
        let verification = credential.verify(password).await?;

        let mut user = match found {
            Some(user) if user.active && verification.is_match() => user,
            _ => return Err(BlogError::InvalidCredentials.into()),
        };

        if let Verification::Rehashed(upgraded) = verification {
            user.set_password(upgraded);
            self.users.update(&user).await?;
            tracing::info!(user_id = %user.id, "Credential upgraded to current iteration count");
        }

        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoggedUser {
            id: user.id,
            full_name: user.full_name(),
            username: user.username.to_string(),
            email: user.email.to_string(),
            role: user.role,
            token,
        })
    }
}
