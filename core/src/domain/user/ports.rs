use std::future::Future;
use uuid::Uuid;

use crate::domain::{common::entities::app_errors::CoreError, user::entities::User};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already taken.
    fn create_user(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn get_by_email(
        &self,
        email: String,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    fn get_by_id(&self, user_id: Uuid)
    -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    /// Writes name, email and password hash. Fails with `Conflict` when the
    /// new email belongs to another account.
    fn update_user(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Removes the account and everything it owns.
    fn delete_user(&self, user_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}
