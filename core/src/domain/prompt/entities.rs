use serde::Serialize;
use uuid::Uuid;

use crate::domain::family::entities::{FamilyMember, MemberRole};

pub const NO_RESTRICTIONS: &str = "no restrictions";

/// Instruction text plus the structured-output schema handed to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptDocument {
    pub text: String,
    pub response_schema: serde_json::Value,
    pub temperature: f32,
}

/// The slice of a family member that is rendered into a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberContext {
    pub id: Uuid,
    pub name: String,
    pub role: MemberRole,
    pub conditions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_restrictions: Vec<String>,
}

impl From<&FamilyMember> for MemberContext {
    fn from(member: &FamilyMember) -> Self {
        let mut conditions: Vec<String> = member
            .enabled_conditions()
            .into_iter()
            .map(|c| match c.notes.as_deref().map(str::trim) {
                Some(notes) if !notes.is_empty() => {
                    format!("{} ({})", c.condition_type.label(), notes)
                }
                _ => c.condition_type.label().to_string(),
            })
            .collect();

        if conditions.is_empty() {
            conditions.push(NO_RESTRICTIONS.to_string());
        }

        Self {
            id: member.id,
            name: member.name.clone(),
            role: member.role,
            conditions,
            custom_restrictions: member
                .custom_restrictions
                .iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }
}
