use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    jwt::entities::{Jwt, JwtClaim, RefreshToken},
};

/// Signs and verifies bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    fn sign(&self, claim: JwtClaim) -> impl Future<Output = Result<Jwt, CoreError>> + Send;

    fn verify(&self, token: String) -> impl Future<Output = Result<JwtClaim, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RefreshTokenRepository: Send + Sync {
    fn create(
        &self,
        refresh_token: RefreshToken,
    ) -> impl Future<Output = Result<RefreshToken, CoreError>> + Send;

    fn get_by_jti(
        &self,
        jti: Uuid,
    ) -> impl Future<Output = Result<Option<RefreshToken>, CoreError>> + Send;

    /// Marks a live token revoked. Returns false when it was already revoked,
    /// so two concurrent refreshes cannot both consume the same token.
    fn consume(&self, jti: Uuid) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn revoke_all_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
