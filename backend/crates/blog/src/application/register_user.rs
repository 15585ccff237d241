//! Register User Use Case
//!
//! Creates a new account with the `User` role.

use std::sync::Arc;

use kernel::error::error_list::{Combine, Outcome};
use kernel::id::UserId;
use kernel::validation::{FieldRule, Handler, Request};

use crate::application::ensure_unique;
use crate::domain::entity::user::{Profile, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    Email, FirstName, LastName, RawPassword, UserPassword, Username,
};

/// Register user input
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Request for RegisterUser {
    type Response = UserId;
    const NAME: &'static str = "RegisterUser";
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule::new("FirstName", |r: &Self| FirstName::parse(&r.first_name).map(drop)),
        FieldRule::new("LastName", |r: &Self| LastName::parse(&r.last_name).map(drop)),
        FieldRule::new("Username", |r: &Self| Username::parse(&r.username).map(drop)),
        FieldRule::new("Email", |r: &Self| Email::parse(&r.email).map(drop)),
        FieldRule::new("Password", |r: &Self| RawPassword::new(&r.password).map(drop)),
    ];
}

/// Register user handler
pub struct RegisterUserHandler<U> {
    users: Arc<U>,
}

impl<U: UserRepository> RegisterUserHandler<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> Handler<RegisterUser> for RegisterUserHandler<U>
where
    U: UserRepository + Send + Sync,
{
    async fn handle(&self, request: RegisterUser) -> Outcome<UserId> {
        let (first_name, last_name, username, email, password) = (
            FirstName::parse(&request.first_name),
            LastName::parse(&request.last_name),
            Username::parse(&request.username),
            Email::parse(&request.email),
            RawPassword::new(&request.password),
        )
            .combine()?;

        ensure_unique(&*self.users, &username, &email, None).await?;

        let password = UserPassword::hash(password).await?;
        let user = User::new(
            Profile {
                first_name,
                last_name,
                username,
                email,
            },
            password,
        );

        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user.id)
    }
}
