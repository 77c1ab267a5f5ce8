use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        family::{entities::FamilyMember, ports::FamilyMemberRepository},
    },
    entity::family_members::{ActiveModel, Column, Entity},
    infrastructure::{db::json::to_json, family::mappers::role_to_column},
};

#[derive(Debug, Clone)]
pub struct PostgresFamilyMemberRepository {
    pub db: DatabaseConnection,
}

impl PostgresFamilyMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn active_model(member: &FamilyMember) -> Result<ActiveModel, CoreError> {
        Ok(ActiveModel {
            id: Set(member.id),
            user_id: Set(member.user_id),
            name: Set(member.name.clone()),
            avatar: Set(member.avatar.clone()),
            role: Set(role_to_column(member.role)?),
            conditions: Set(to_json(&member.conditions, "conditions")?),
            custom_restrictions: Set(to_json(&member.custom_restrictions, "custom_restrictions")?),
            created_at: Set(member.created_at.fixed_offset()),
            updated_at: Set(member.updated_at.fixed_offset()),
        })
    }
}

impl FamilyMemberRepository for PostgresFamilyMemberRepository {
    async fn create_member(&self, member: FamilyMember) -> Result<FamilyMember, CoreError> {
        let created = Entity::insert(Self::active_model(&member)?)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create family member: {}", e);
                CoreError::InternalServerError
            })?;

        FamilyMember::try_from(created)
    }

    async fn update_member(&self, member: FamilyMember) -> Result<FamilyMember, CoreError> {
        let updated = Entity::update(Self::active_model(&member)?)
            .filter(Column::UserId.eq(member.user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to update family member: {}", e);
                CoreError::InternalServerError
            })?;

        FamilyMember::try_from(updated)
    }

    async fn delete_member(&self, member_id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_many()
            .filter(Column::Id.eq(member_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete family member: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn get_member(
        &self,
        member_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<FamilyMember>, CoreError> {
        let member = Entity::find()
            .filter(Column::Id.eq(member_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get family member: {}", e);
                CoreError::InternalServerError
            })?;

        member.map(FamilyMember::try_from).transpose()
    }

    async fn get_members_by_user(&self, user_id: Uuid) -> Result<Vec<FamilyMember>, CoreError> {
        let members = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list family members: {}", e);
                CoreError::InternalServerError
            })?;

        members.into_iter().map(FamilyMember::try_from).collect()
    }

    async fn replace_members(
        &self,
        user_id: Uuid,
        members: Vec<FamilyMember>,
    ) -> Result<Vec<FamilyMember>, CoreError> {
        let models = members
            .iter()
            .map(Self::active_model)
            .collect::<Result<Vec<_>, _>>()?;

        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to open transaction: {}", e);
            CoreError::InternalServerError
        })?;

        Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!("Failed to clear family members: {}", e);
                CoreError::InternalServerError
            })?;

        if !models.is_empty() {
            Entity::insert_many(models).exec(&txn).await.map_err(|e| {
                error!("Failed to insert family members: {}", e);
                CoreError::InternalServerError
            })?;
        }

        txn.commit().await.map_err(|e| {
            error!("Failed to commit family profile: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(members)
    }
}
