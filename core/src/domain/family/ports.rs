use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    family::{
        entities::{FamilyMember, FamilyProfile},
        value_objects::{CreateMemberInput, UpdateMemberInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait FamilyMemberRepository: Send + Sync {
    fn create_member(
        &self,
        member: FamilyMember,
    ) -> impl Future<Output = Result<FamilyMember, CoreError>> + Send;

    fn update_member(
        &self,
        member: FamilyMember,
    ) -> impl Future<Output = Result<FamilyMember, CoreError>> + Send;

    fn delete_member(
        &self,
        member_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_member(
        &self,
        member_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<FamilyMember>, CoreError>> + Send;

    /// Members in creation order.
    fn get_members_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<FamilyMember>, CoreError>> + Send;

    /// Atomically swaps every member of `user_id` for `members`.
    fn replace_members(
        &self,
        user_id: Uuid,
        members: Vec<FamilyMember>,
    ) -> impl Future<Output = Result<Vec<FamilyMember>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait FamilyService: Send + Sync {
    fn get_profile(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<FamilyProfile, CoreError>> + Send;

    fn add_member(
        &self,
        identity: Identity,
        input: CreateMemberInput,
    ) -> impl Future<Output = Result<FamilyMember, CoreError>> + Send;

    fn update_member(
        &self,
        identity: Identity,
        input: UpdateMemberInput,
    ) -> impl Future<Output = Result<FamilyMember, CoreError>> + Send;

    fn delete_member(
        &self,
        identity: Identity,
        member_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Replaces the whole household. Nothing is written when any member is invalid.
    fn replace_profile(
        &self,
        identity: Identity,
        members: Vec<CreateMemberInput>,
    ) -> impl Future<Output = Result<FamilyProfile, CoreError>> + Send;
}
