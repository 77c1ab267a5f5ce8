use chrono::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    barcode::ports::ProductCatalog,
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    family::{
        entities::{FamilyMember, FamilyMemberConfig, FamilyProfile},
        ports::{FamilyMemberRepository, FamilyService},
        value_objects::{CreateMemberInput, UpdateMemberInput},
    },
    health::ports::HealthCheckRepository,
    jwt::ports::{RefreshTokenRepository, TokenCodec},
    llm::ports::{LLMClient, RateLimiter},
    meal_plan::ports::MealPlanRepository,
    pantry::ports::PantryRepository,
    saved_recipe::ports::SavedRecipeRepository,
    shopping::ports::ShoppingListRepository,
    user::ports::UserRepository,
};

pub const MAX_HOUSEHOLD_SIZE: usize = 20;

/// Loads the caller's household; shared by every AI-backed feature.
pub(crate) async fn load_profile<F>(repository: &F, user_id: Uuid) -> Result<FamilyProfile, CoreError>
where
    F: FamilyMemberRepository,
{
    let members = repository.get_members_by_user(user_id).await?;
    Ok(FamilyProfile::new(members))
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> FamilyService
    for Service<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL>
where
    U: UserRepository,
    RT: RefreshTokenRepository,
    H: HasherRepository,
    TK: TokenCodec,
    F: FamilyMemberRepository,
    SR: SavedRecipeRepository,
    SH: ShoppingListRepository,
    MP: MealPlanRepository,
    P: PantryRepository,
    PC: ProductCatalog,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    RL: RateLimiter,
{
    async fn get_profile(&self, identity: Identity) -> Result<FamilyProfile, CoreError> {
        load_profile(&self.family_member_repository, identity.id()).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn add_member(
        &self,
        identity: Identity,
        input: CreateMemberInput,
    ) -> Result<FamilyMember, CoreError> {
        let member = FamilyMember::new(FamilyMemberConfig {
            user_id: identity.id(),
            name: input.name.trim().to_string(),
            avatar: input.avatar,
            role: input.role,
            conditions: input.conditions,
            custom_restrictions: input.custom_restrictions,
        })?;

        let member = self.family_member_repository.create_member(member).await?;
        info!(member_id = %member.id, "Family member added");

        Ok(member)
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), member_id = %input.member_id))]
    async fn update_member(
        &self,
        identity: Identity,
        input: UpdateMemberInput,
    ) -> Result<FamilyMember, CoreError> {
        let mut member = self
            .family_member_repository
            .get_member(input.member_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        member.replace(
            input.name.trim().to_string(),
            input.avatar,
            input.role,
            input.conditions,
            input.custom_restrictions,
        )?;

        self.family_member_repository.update_member(member).await
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), member_id = %member_id))]
    async fn delete_member(&self, identity: Identity, member_id: Uuid) -> Result<(), CoreError> {
        self.family_member_repository
            .get_member(member_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        self.family_member_repository
            .delete_member(member_id, identity.id())
            .await
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), members = members.len()))]
    async fn replace_profile(
        &self,
        identity: Identity,
        members: Vec<CreateMemberInput>,
    ) -> Result<FamilyProfile, CoreError> {
        if members.len() > MAX_HOUSEHOLD_SIZE {
            return Err(CoreError::ValidationError(format!(
                "a family profile holds at most {} members",
                MAX_HOUSEHOLD_SIZE
            )));
        }

        let mut built = Vec::with_capacity(members.len());
        for (position, input) in members.into_iter().enumerate() {
            let mut member = FamilyMember::new(FamilyMemberConfig {
                user_id: identity.id(),
                name: input.name.trim().to_string(),
                avatar: input.avatar,
                role: input.role,
                conditions: input.conditions,
                custom_restrictions: input.custom_restrictions,
            })?;
            // Members are listed by creation time; keep the submitted order.
            member.created_at += Duration::microseconds(position as i64);
            member.updated_at = member.created_at;
            built.push(member);
        }

        let members = self
            .family_member_repository
            .replace_members(identity.id(), built)
            .await?;
        info!(members = members.len(), "Family profile replaced");

        Ok(FamilyProfile::new(members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::services::tests::Stores,
        family::entities::{ConditionType, HealthCondition, MemberRole},
        llm::invoker::tests::ScriptedClient,
    };

    fn caller() -> Identity {
        Identity::new(Uuid::new_v4(), "ana@example.com".to_string())
    }

    fn input(name: &str, conditions: Vec<ConditionType>) -> CreateMemberInput {
        CreateMemberInput {
            name: name.to_string(),
            avatar: "🙂".to_string(),
            role: MemberRole::Adult,
            conditions: conditions
                .into_iter()
                .map(|condition_type| HealthCondition {
                    condition_type,
                    enabled: true,
                    notes: None,
                })
                .collect(),
            custom_restrictions: vec![],
        }
    }

    #[tokio::test]
    async fn test_members_of_other_users_are_not_found() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let owner = caller();
        let intruder = caller();
        let member = service
            .add_member(owner.clone(), input("Mom", vec![ConditionType::Diabetes]))
            .await
            .unwrap();

        let update = service
            .update_member(
                intruder.clone(),
                UpdateMemberInput {
                    member_id: member.id,
                    name: "Renamed".to_string(),
                    avatar: "🙂".to_string(),
                    role: MemberRole::Adult,
                    conditions: vec![],
                    custom_restrictions: vec![],
                },
            )
            .await;
        let delete = service.delete_member(intruder, member.id).await;

        assert_eq!(update, Err(CoreError::NotFound));
        assert_eq!(delete, Err(CoreError::NotFound));
        assert_eq!(service.get_profile(owner).await.unwrap().members, vec![member]);
    }

    #[tokio::test]
    async fn test_duplicate_condition_is_invalid() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());

        let result = service
            .add_member(
                caller(),
                input("Dad", vec![ConditionType::Celiac, ConditionType::Celiac]),
            )
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
        assert!(stores.family.members.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_profile_swaps_the_household_in_order() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let owner = caller();
        service
            .add_member(owner.clone(), input("Old", vec![]))
            .await
            .unwrap();

        let profile = service
            .replace_profile(
                owner.clone(),
                vec![
                    input("Mom", vec![ConditionType::Hypertension]),
                    input("Mia", vec![]),
                    input("Leo", vec![ConditionType::PeanutAllergy]),
                ],
            )
            .await
            .unwrap();

        let names: Vec<String> = service
            .get_profile(owner)
            .await
            .unwrap()
            .members
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(profile.members.len(), 3);
        assert_eq!(names, vec!["Mom", "Mia", "Leo"]);
    }

    #[tokio::test]
    async fn test_invalid_replacement_keeps_existing_profile() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let owner = caller();
        let kept = service
            .add_member(owner.clone(), input("Mom", vec![]))
            .await
            .unwrap();

        let result = service
            .replace_profile(
                owner.clone(),
                vec![
                    input("Dad", vec![]),
                    input("Mia", vec![ConditionType::Diabetes, ConditionType::Diabetes]),
                ],
            )
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
        assert_eq!(service.get_profile(owner).await.unwrap().members, vec![kept]);
    }
}
