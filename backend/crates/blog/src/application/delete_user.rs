//! Delete User Use Case
//!
//! Removes a user together with their articles and comments.

use std::sync::Arc;

use kernel::error::error_list::Outcome;
use kernel::id::UserId;
use kernel::validation::{FieldRule, Handler, Request, require_id};
use uuid::Uuid;

use crate::application::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::error::BlogError;

pub struct DeleteUser {
    pub principal: Principal,
    pub id: Uuid,
}

impl Request for DeleteUser {
    type Response = ();
    const NAME: &'static str = "DeleteUser";
    const RULES: &'static [FieldRule<Self>] =
        &[FieldRule::new("UserId", |r: &Self| require_id("UserId", "User id", &r.id).map(drop))];
}

pub struct DeleteUserHandler<U> {
    users: Arc<U>,
}

impl<U: UserRepository> DeleteUserHandler<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> Handler<DeleteUser> for DeleteUserHandler<U>
where
    U: UserRepository + Send + Sync,
{
    async fn handle(&self, request: DeleteUser) -> Outcome<()> {
        let id = UserId::from_uuid(request.id);
        request.principal.require_owner_or_admin(&id)?;

        if !self.users.delete(&id).await? {
            return Err(BlogError::UserNotFound.into());
        }

        tracing::info!(user_id = %id, deleted_by = %request.principal.user_id, "User deleted");
        Ok(())
    }
}
