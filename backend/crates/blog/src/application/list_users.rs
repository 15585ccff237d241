//! List Users Query (admin only)

use std::sync::Arc;

use kernel::error::error_list::Outcome;
use kernel::validation::{FieldRule, Handler, Request};

use crate::application::dto::UserView;
use crate::application::principal::Principal;
use crate::domain::repository::UserRepository;

pub struct ListUsers {
    pub principal: Principal,
}

impl Request for ListUsers {
    type Response = Vec<UserView>;
    const NAME: &'static str = "ListUsers";
    const RULES: &'static [FieldRule<Self>] = &[];
}

pub struct ListUsersHandler<U> {
    users: Arc<U>,
}

impl<U: UserRepository> ListUsersHandler<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> Handler<ListUsers> for ListUsersHandler<U>
where
    U: UserRepository + Send + Sync,
{
    async fn handle(&self, request: ListUsers) -> Outcome<Vec<UserView>> {
        request.principal.require_admin()?;
        let users = self.users.list().await?;
        Ok(users.iter().map(UserView::from).collect())
    }
}
