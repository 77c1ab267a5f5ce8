use std::future::Future;

use crate::domain::{
    authentication::{
        entities::AuthSession,
        value_objects::{
            ChangePasswordInput, Identity, LoginInput, RegisterInput, UpdateProfileInput,
        },
    },
    common::entities::app_errors::CoreError,
    user::entities::User,
};

#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    fn register(
        &self,
        input: RegisterInput,
    ) -> impl Future<Output = Result<AuthSession, CoreError>> + Send;

    fn login(&self, input: LoginInput)
    -> impl Future<Output = Result<AuthSession, CoreError>> + Send;

    /// Consumes a refresh token and issues a new token pair.
    fn refresh(
        &self,
        refresh_token: String,
    ) -> impl Future<Output = Result<AuthSession, CoreError>> + Send;

    fn logout(&self, identity: Identity) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Resolves a bearer access token into an identity.
    fn authorize(&self, token: String)
    -> impl Future<Output = Result<Identity, CoreError>> + Send;

    fn get_me(&self, identity: Identity) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn update_me(
        &self,
        identity: Identity,
        input: UpdateProfileInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Requires the current password and signs out every session.
    fn change_password(
        &self,
        identity: Identity,
        input: ChangePasswordInput,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Deletes the account with its family profile and all saved data.
    fn delete_me(&self, identity: Identity) -> impl Future<Output = Result<(), CoreError>> + Send;
}
