use std::fmt::Write as _;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    family::entities::{ConditionType, FamilyMember, FamilyProfile, MemberRole},
    prompt::{
        entities::{MemberContext, PromptDocument},
        schema::{
            ingredient_extraction_schema, ingredient_report_schema, label_scan_schema,
            recipe_analysis_schema, recipe_suggestions_schema,
        },
    },
};

const ANALYSIS_TEMPERATURE: f32 = 0.3;
const SUGGESTION_TEMPERATURE: f32 = 0.7;

const ROLE_CONTEXT: &str = "You are a professional nutritionist and dietary expert specializing in family meal planning. \
Analyze food against specific health conditions and dietary restrictions, flag safety concerns clearly, \
consider age-appropriate modifications and offer practical substitutions that keep flavor and nutrition.";

const BABY_GUIDELINE: &str = "Babies (under 2 years): no honey, whole nuts, raw eggs, high-sodium foods or choking hazards; limit sugar";

const JSON_ONLY: &str = "Respond with a single JSON document matching the response schema. Do not wrap it in markdown.";

/// A dish submitted for shopping-list extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSource {
    pub dish_name: String,
    pub recipe_text: String,
}

/// Resolves the members a request is about, in profile order.
///
/// `None` selects the whole profile. Every requested id must exist in the profile.
pub fn select_members<'a>(
    profile: &'a FamilyProfile,
    member_ids: Option<&[Uuid]>,
) -> Result<Vec<&'a FamilyMember>, CoreError> {
    let selected: Vec<&FamilyMember> = match member_ids {
        None => profile.members.iter().collect(),
        Some(ids) => {
            if let Some(unknown) = ids.iter().find(|id| profile.find(**id).is_none()) {
                return Err(CoreError::ValidationError(format!(
                    "family member {} does not exist in this profile",
                    unknown
                )));
            }
            profile
                .members
                .iter()
                .filter(|m| ids.contains(&m.id))
                .collect()
        }
    };

    if selected.is_empty() {
        return Err(CoreError::ValidationError(
            "at least one family member is required".to_string(),
        ));
    }

    Ok(selected)
}

fn render_members(members: &[&FamilyMember]) -> Result<String, CoreError> {
    let contexts: Vec<MemberContext> = members.iter().map(|m| MemberContext::from(*m)).collect();
    serde_json::to_string_pretty(&contexts).map_err(|e| {
        tracing::error!("Failed to render family members: {}", e);
        CoreError::InternalServerError
    })
}

/// Guidelines for the conditions present among `members`, in canonical order.
fn render_guidelines(members: &[&FamilyMember]) -> String {
    let mut guidelines = String::new();

    if members.iter().any(|m| m.role == MemberRole::Baby) {
        let _ = writeln!(guidelines, "- {}", BABY_GUIDELINE);
    }

    for condition in ConditionType::ALL {
        let present = members.iter().any(|m| {
            m.enabled_conditions()
                .iter()
                .any(|c| c.condition_type == condition)
        });
        if present {
            let _ = writeln!(
                guidelines,
                "- {}: {}",
                condition.label(),
                condition.guideline()
            );
        }
    }

    if guidelines.is_empty() {
        guidelines.push_str("- No medical restrictions apply to this household.\n");
    }

    guidelines
}

fn preamble(members: &[&FamilyMember]) -> String {
    format!(
        "{}\n\nSAFETY GUIDELINES:\n{}",
        ROLE_CONTEXT,
        render_guidelines(members)
    )
}

fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}

fn require_items(items: &[String], field: &str) -> Result<Vec<String>, CoreError> {
    let cleaned: Vec<String> = items
        .iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    if cleaned.is_empty() {
        return Err(CoreError::ValidationError(format!(
            "{} must contain at least one entry",
            field
        )));
    }
    Ok(cleaned)
}

pub fn build_recipe_analysis_prompt(
    recipe_text: &str,
    members: &[&FamilyMember],
) -> Result<PromptDocument, CoreError> {
    let recipe_text = require_text(recipe_text, "recipe text")?;
    let rendered = render_members(members)?;

    let text = format!(
        "{preamble}\n\
Analyze the following recipe for each family member listed below.\n\n\
RECIPE:\n{recipe_text}\n\n\
FAMILY MEMBERS:\n{rendered}\n\n\
Return exactly one entry in member_verdicts for every family member above, using the member's id as member_id. \
Do not add entries for anyone else.\n\
verdict must be one of: safe, needs_adaptation, not_recommended. \
A needs_adaptation verdict must include at least one modification, substitution or preparation change.\n\
overall_safety must be one of: safe, caution, unsafe.\n\
{JSON_ONLY}",
        preamble = preamble(members),
    );

    Ok(PromptDocument {
        text,
        response_schema: recipe_analysis_schema(),
        temperature: ANALYSIS_TEMPERATURE,
    })
}

pub fn build_label_scan_prompt(members: &[&FamilyMember]) -> Result<PromptDocument, CoreError> {
    let rendered = render_members(members)?;

    let text = format!(
        "{preamble}\n\
Read the ingredient label in the attached image. Extract every ingredient you can read and check each one \
against the dietary needs of the family members below.\n\n\
FAMILY MEMBERS:\n{rendered}\n\n\
Use the product name if it is visible, otherwise \"Unknown Product\". \
affected_members must only contain names of the family members above. \
severity must be one of: low, medium, high. overall_safety must be one of: safe, caution, unsafe.\n\
{JSON_ONLY}",
        preamble = preamble(members),
    );

    Ok(PromptDocument {
        text,
        response_schema: label_scan_schema(),
        temperature: ANALYSIS_TEMPERATURE,
    })
}

pub fn build_ingredient_list_prompt(
    ingredients: &[String],
    members: &[&FamilyMember],
) -> Result<PromptDocument, CoreError> {
    let ingredients = require_items(ingredients, "ingredient list")?;
    let rendered = render_members(members)?;

    let text = format!(
        "{preamble}\n\
Check this ingredient list against the dietary needs of the family members below.\n\n\
INGREDIENTS:\n{ingredients}\n\n\
FAMILY MEMBERS:\n{rendered}\n\n\
affected_members must only contain names of the family members above. \
severity must be one of: low, medium, high. overall_safety must be one of: safe, caution, unsafe.\n\
{JSON_ONLY}",
        preamble = preamble(members),
        ingredients = ingredients.join(", "),
    );

    Ok(PromptDocument {
        text,
        response_schema: ingredient_report_schema(),
        temperature: ANALYSIS_TEMPERATURE,
    })
}

pub fn build_recipe_suggestion_prompt(
    pantry: &[String],
    members: &[&FamilyMember],
) -> Result<PromptDocument, CoreError> {
    let pantry = require_items(pantry, "pantry")?;
    let rendered = render_members(members)?;

    let text = format!(
        "{preamble}\n\
Based on the available ingredients, suggest 3 to 5 recipes that suit this family.\n\n\
AVAILABLE INGREDIENTS:\n{pantry}\n\n\
FAMILY MEMBERS:\n{rendered}\n\n\
difficulty must be one of: easy, medium, hard. family_friendly_score is an integer from 1 to 5.\n\
{JSON_ONLY}",
        preamble = preamble(members),
        pantry = pantry.join(", "),
    );

    Ok(PromptDocument {
        text,
        response_schema: recipe_suggestions_schema(),
        temperature: SUGGESTION_TEMPERATURE,
    })
}

pub fn build_ingredient_extraction_prompt(
    recipes: &[RecipeSource],
) -> Result<PromptDocument, CoreError> {
    if recipes.is_empty() {
        return Err(CoreError::ValidationError(
            "at least one recipe is required".to_string(),
        ));
    }

    let mut rendered = String::new();
    for recipe in recipes {
        let recipe_text = require_text(&recipe.recipe_text, "recipe text")?;
        let _ = write!(
            rendered,
            "\n--- {} ---\n{}\n",
            recipe.dish_name.trim(),
            recipe_text
        );
    }

    let text = format!(
        "Extract a consolidated shopping list from the recipes below. Combine duplicate ingredients \
and sum their quantities where possible.\n\
RECIPES:{rendered}\n\
category must be one of: produce, dairy, meat, seafood, pantry, bakery, frozen, beverages, other.\n\
{JSON_ONLY}"
    );

    Ok(PromptDocument {
        text,
        response_schema: ingredient_extraction_schema(),
        temperature: ANALYSIS_TEMPERATURE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::family::entities::{FamilyMemberConfig, HealthCondition};

    fn member(name: &str, role: MemberRole, conditions: Vec<ConditionType>) -> FamilyMember {
        FamilyMember::new(FamilyMemberConfig {
            user_id: Uuid::nil(),
            name: name.to_string(),
            avatar: "🙂".to_string(),
            role,
            conditions: conditions
                .into_iter()
                .map(|condition_type| HealthCondition {
                    condition_type,
                    enabled: true,
                    notes: None,
                })
                .collect(),
            custom_restrictions: vec![],
        })
        .unwrap()
    }

    #[test]
    fn test_recipe_prompt_is_deterministic() {
        let dad = member("Dad", MemberRole::Adult, vec![ConditionType::Diabetes]);
        let baby = member("Leo", MemberRole::Baby, vec![]);
        let members = vec![&dad, &baby];

        let first = build_recipe_analysis_prompt("Pancakes with honey", &members).unwrap();
        let second = build_recipe_analysis_prompt("Pancakes with honey", &members).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_member_without_conditions_renders_no_restrictions() {
        let mom = member("Mom", MemberRole::Adult, vec![]);

        let prompt = build_recipe_analysis_prompt("plain rice", &[&mom]).unwrap();

        assert!(prompt.text.contains("no restrictions"));
        assert!(prompt.text.contains(&mom.id.to_string()));
    }

    #[test]
    fn test_guidelines_only_cover_present_conditions() {
        let kid = member("Mia", MemberRole::Child, vec![ConditionType::PeanutAllergy]);

        let prompt = build_recipe_analysis_prompt("peanut butter toast", &[&kid]).unwrap();

        assert!(prompt.text.contains("Peanut Allergy: absolutely no peanuts"));
        assert!(!prompt.text.contains("Hypertension:"));
        assert!(!prompt.text.contains("Babies"));
    }

    #[test]
    fn test_disabled_conditions_are_not_rendered() {
        let mut dad = member("Dad", MemberRole::Adult, vec![ConditionType::Hypertension]);
        dad.conditions[0].enabled = false;

        let prompt = build_recipe_analysis_prompt("salted fish", &[&dad]).unwrap();

        assert!(!prompt.text.contains("Hypertension"));
        assert!(prompt.text.contains("no restrictions"));
    }

    #[test]
    fn test_blank_recipe_is_rejected() {
        let mom = member("Mom", MemberRole::Adult, vec![]);

        let result = build_recipe_analysis_prompt("   ", &[&mom]);

        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_select_members_rejects_unknown_id() {
        let profile = FamilyProfile::new(vec![member("Mom", MemberRole::Adult, vec![])]);

        let result = select_members(&profile, Some(&[Uuid::new_v4()]));

        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_select_members_keeps_profile_order() {
        let mom = member("Mom", MemberRole::Adult, vec![]);
        let dad = member("Dad", MemberRole::Adult, vec![]);
        let kid = member("Mia", MemberRole::Child, vec![]);
        let profile = FamilyProfile::new(vec![mom.clone(), dad.clone(), kid.clone()]);

        let selected = select_members(&profile, Some(&[kid.id, mom.id])).unwrap();

        let names: Vec<&str> = selected.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Mom", "Mia"]);
    }

    #[test]
    fn test_empty_profile_is_rejected() {
        let profile = FamilyProfile::default();

        assert!(matches!(
            select_members(&profile, None),
            Err(CoreError::ValidationError(_))
        ));
        assert!(select_members(&profile, Some(&[])).is_err());
    }

    #[test]
    fn test_suggestions_use_higher_temperature() {
        let mom = member("Mom", MemberRole::Adult, vec![]);

        let prompt =
            build_recipe_suggestion_prompt(&["rice".to_string(), "eggs".to_string()], &[&mom])
                .unwrap();

        assert!(prompt.text.contains("rice, eggs"));
        assert_eq!(prompt.temperature, SUGGESTION_TEMPERATURE);
    }

    #[test]
    fn test_extraction_requires_recipes() {
        assert!(build_ingredient_extraction_prompt(&[]).is_err());

        let prompt = build_ingredient_extraction_prompt(&[RecipeSource {
            dish_name: "Omelette".to_string(),
            recipe_text: "3 eggs, butter".to_string(),
        }])
        .unwrap();
        assert!(prompt.text.contains("--- Omelette ---"));
    }
}
