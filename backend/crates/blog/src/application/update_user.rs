//! Update User Use Case
//!
//! Replaces the profile and the credential of an existing user. Users may
//! update themselves; changing a role or the active flag needs an admin.

use std::sync::Arc;

use kernel::error::error_list::{Combine, Outcome};
use kernel::id::UserId;
use kernel::validation::{FieldRule, Handler, Request, require_id};
use uuid::Uuid;

use crate::application::ensure_unique;
use crate::application::principal::Principal;
use crate::domain::entity::user::Profile;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    Email, FirstName, LastName, RawPassword, UserPassword, UserRole, Username,
};
use crate::error::BlogError;

pub struct UpdateUser {
    pub principal: Principal,
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub active: bool,
}

impl Request for UpdateUser {
    type Response = UserId;
    const NAME: &'static str = "UpdateUser";
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule::new("UserId", |r: &Self| require_id("UserId", "User id", &r.id).map(drop)),
        FieldRule::new("FirstName", |r: &Self| FirstName::parse(&r.first_name).map(drop)),
        FieldRule::new("LastName", |r: &Self| LastName::parse(&r.last_name).map(drop)),
        FieldRule::new("Username", |r: &Self| Username::parse(&r.username).map(drop)),
        FieldRule::new("Email", |r: &Self| Email::parse(&r.email).map(drop)),
        FieldRule::new("Password", |r: &Self| RawPassword::new(&r.password).map(drop)),
        FieldRule::new("Role", |r: &Self| UserRole::parse(&r.role).map(drop)),
    ];
}

pub struct UpdateUserHandler<U> {
    users: Arc<U>,
}

impl<U: UserRepository> UpdateUserHandler<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> Handler<UpdateUser> for UpdateUserHandler<U>
where
    U: UserRepository + Send + Sync,
{
    async fn handle(&self, request: UpdateUser) -> Outcome<UserId> {
        let id = UserId::from_uuid(request.id);
        let principal = request.principal;
        principal.require_owner_or_admin(&id)?;

        let (first_name, last_name, username, email, password, role) = (
            FirstName::parse(&request.first_name),
            LastName::parse(&request.last_name),
            Username::parse(&request.username),
            Email::parse(&request.email),
            RawPassword::new(&request.password),
            UserRole::parse(&request.role),
        )
            .combine()?;

        let mut user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or(BlogError::UserNotFound)?;

        if role != user.role || request.active != user.active {
            principal.require_admin()?;
        }

        ensure_unique(&*self.users, &username, &email, Some(id)).await?;

        let password = UserPassword::hash(password).await?;

        user.set_profile(Profile {
            first_name,
            last_name,
            username,
            email,
        });
        user.set_password(password);
        user.set_role(role);
        user.set_active(request.active);

        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, updated_by = %principal.user_id, "User updated");

        Ok(user.id)
    }
}
