use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, sea_query::Expr,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        jwt::{entities::RefreshToken, ports::RefreshTokenRepository},
    },
    entity::refresh_tokens::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresRefreshTokenRepository {
    pub db: DatabaseConnection,
}

impl PostgresRefreshTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, CoreError> {
        let active_model = ActiveModel {
            id: Set(token.id),
            user_id: Set(token.user_id),
            expires_at: Set(token.expires_at.fixed_offset()),
            revoked: Set(token.revoked),
            created_at: Set(token.created_at.fixed_offset()),
        };

        let created = Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to store refresh token: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(created.into())
    }

    async fn get_by_jti(&self, jti: Uuid) -> Result<Option<RefreshToken>, CoreError> {
        let token = Entity::find_by_id(jti).one(&self.db).await.map_err(|e| {
            error!("Failed to get refresh token: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(token.map(RefreshToken::from))
    }

    async fn consume(&self, jti: Uuid) -> Result<bool, CoreError> {
        let result = Entity::update_many()
            .col_expr(Column::Revoked, Expr::value(true))
            .filter(Column::Id.eq(jti))
            .filter(Column::Revoked.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to revoke refresh token: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(result.rows_affected == 1)
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<(), CoreError> {
        Entity::update_many()
            .col_expr(Column::Revoked, Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Revoked.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to revoke refresh tokens: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
