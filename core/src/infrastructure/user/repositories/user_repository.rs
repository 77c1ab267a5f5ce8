use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
    SqlErr, TransactionTrait,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        user::{entities::User, ports::UserRepository},
    },
    entity::{
        family_members, meal_plans, pantry_items, planned_meals, refresh_tokens, saved_recipes,
        shopping_items, shopping_lists,
        users::{ActiveModel, Column, Entity},
    },
};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn active_model(user: User) -> ActiveModel {
    ActiveModel {
        id: Set(user.id),
        email: Set(user.email),
        name: Set(user.name),
        password_hash: Set(user.password_hash),
        created_at: Set(user.created_at.fixed_offset()),
        updated_at: Set(user.updated_at.fixed_offset()),
    }
}

/// The email column is unique, so a concurrent registration surfaces as a
/// constraint violation rather than in the service's pre-check.
fn classify_write_error(sql_err: Option<SqlErr>, action: &str) -> CoreError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            warn!("Failed to {}: email already taken ({})", action, detail);
            CoreError::Conflict("an account with this email already exists".to_string())
        }
        _ => CoreError::InternalServerError,
    }
}

fn map_write_error(e: DbErr, action: &str) -> CoreError {
    let mapped = classify_write_error(e.sql_err(), action);
    if mapped == CoreError::InternalServerError {
        error!("Failed to {}: {}", action, e);
    }
    mapped
}

fn map_delete_error(e: DbErr) -> CoreError {
    error!("Failed to delete user data: {}", e);
    CoreError::InternalServerError
}

impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: User) -> Result<User, CoreError> {
        let created = Entity::insert(active_model(user))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| map_write_error(e, "create user"))?;

        Ok(created.into())
    }

    async fn get_by_email(&self, email: String) -> Result<Option<User>, CoreError> {
        let user = Entity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get user by email: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(user.map(User::from))
    }

    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, CoreError> {
        let user = Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get user: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(user.map(User::from))
    }

    async fn update_user(&self, user: User) -> Result<User, CoreError> {
        let updated = Entity::update(active_model(user))
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::NotFound,
                e => map_write_error(e, "update user"),
            })?;

        Ok(updated.into())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to open transaction: {}", e);
            CoreError::InternalServerError
        })?;

        let plan_ids: Vec<Uuid> = meal_plans::Entity::find()
            .select_only()
            .column(meal_plans::Column::Id)
            .filter(meal_plans::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(map_delete_error)?;
        planned_meals::Entity::delete_many()
            .filter(planned_meals::Column::PlanId.is_in(plan_ids))
            .exec(&txn)
            .await
            .map_err(map_delete_error)?;
        meal_plans::Entity::delete_many()
            .filter(meal_plans::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(map_delete_error)?;

        let list_ids: Vec<Uuid> = shopping_lists::Entity::find()
            .select_only()
            .column(shopping_lists::Column::Id)
            .filter(shopping_lists::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(map_delete_error)?;
        shopping_items::Entity::delete_many()
            .filter(shopping_items::Column::ListId.is_in(list_ids))
            .exec(&txn)
            .await
            .map_err(map_delete_error)?;
        shopping_lists::Entity::delete_many()
            .filter(shopping_lists::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(map_delete_error)?;

        saved_recipes::Entity::delete_many()
            .filter(saved_recipes::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(map_delete_error)?;
        pantry_items::Entity::delete_many()
            .filter(pantry_items::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(map_delete_error)?;
        family_members::Entity::delete_many()
            .filter(family_members::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(map_delete_error)?;
        refresh_tokens::Entity::delete_many()
            .filter(refresh_tokens::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(map_delete_error)?;

        let deleted = Entity::delete_by_id(user_id)
            .exec(&txn)
            .await
            .map_err(map_delete_error)?;
        if deleted.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }

        txn.commit().await.map_err(|e| {
            error!("Failed to commit user deletion: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_is_a_conflict() {
        let err = classify_write_error(
            Some(SqlErr::UniqueConstraintViolation(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            )),
            "create user",
        );

        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn test_other_write_errors_are_internal() {
        assert_eq!(
            classify_write_error(None, "create user"),
            CoreError::InternalServerError
        );
        assert_eq!(
            map_write_error(DbErr::Custom("connection reset".to_string()), "update user"),
            CoreError::InternalServerError
        );
    }
}
