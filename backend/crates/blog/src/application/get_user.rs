//! Get User By Id Query

use std::sync::Arc;

use kernel::error::error_list::Outcome;
use kernel::id::UserId;
use kernel::validation::{FieldRule, Handler, Request, require_id};
use uuid::Uuid;

use crate::application::dto::UserView;
use crate::application::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::error::BlogError;

/// Readable by the user themself or an admin
pub struct GetUserById {
    pub principal: Principal,
    pub id: Uuid,
}

impl Request for GetUserById {
    type Response = UserView;
    const NAME: &'static str = "GetUserById";
    const RULES: &'static [FieldRule<Self>] =
        &[FieldRule::new("UserId", |r: &Self| require_id("UserId", "User id", &r.id).map(drop))];
}

pub struct GetUserHandler<U> {
    users: Arc<U>,
}

impl<U: UserRepository> GetUserHandler<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> Handler<GetUserById> for GetUserHandler<U>
where
    U: UserRepository + Send + Sync,
{
    async fn handle(&self, request: GetUserById) -> Outcome<UserView> {
        let id = UserId::from_uuid(request.id);
        request.principal.require_owner_or_admin(&id)?;

        let user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or(BlogError::UserNotFound)?;

        Ok(UserView::from(&user))
    }
}
