use uuid::Uuid;

use crate::domain::family::entities::{HealthCondition, MemberRole};

pub struct CreateMemberInput {
    pub name: String,
    pub avatar: String,
    pub role: MemberRole,
    pub conditions: Vec<HealthCondition>,
    pub custom_restrictions: Vec<String>,
}

pub struct UpdateMemberInput {
    pub member_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub role: MemberRole,
    pub conditions: Vec<HealthCondition>,
    pub custom_restrictions: Vec<String>,
}
