use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    family::entities::FamilyMember,
    llm::{
        entities::RawModelOutput,
        payload::{decode, parse_value},
    },
    recipe_analysis::entities::{
        Adaptation, MemberVerdict, OverallSafety, RecipeAnalysis, Verdict,
    },
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeAnalysisDocument {
    dish_name: String,
    base_description: String,
    overall_safety: OverallSafety,
    member_verdicts: Vec<MemberVerdictDocument>,
    #[serde(default)]
    general_tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemberVerdictDocument {
    member_id: String,
    #[allow(dead_code)]
    member_name: String,
    verdict: Verdict,
    #[serde(default)]
    reasons: Vec<String>,
    #[serde(default)]
    concerns: Vec<String>,
    #[serde(default)]
    adaptations: Option<Adaptation>,
    #[serde(default)]
    nutritional_notes: Option<String>,
}

impl MemberVerdictDocument {
    fn into_verdict(self, member: &FamilyMember) -> Result<MemberVerdict, CoreError> {
        if self.verdict == Verdict::NeedsAdaptation
            && self.adaptations.as_ref().is_none_or(Adaptation::is_empty)
        {
            return Err(CoreError::MalformedResponse(format!(
                "verdict for {} needs adaptation but lists none",
                member.name
            )));
        }

        Ok(MemberVerdict {
            member_id: member.id,
            member_name: member.name.clone(),
            verdict: self.verdict,
            reasons: self.reasons,
            concerns: self.concerns,
            adaptations: self.adaptations,
            nutritional_notes: self.nutritional_notes,
        })
    }
}

/// Turns raw model output into a [`RecipeAnalysis`] covering exactly `members`.
///
/// Fails with `MalformedResponse` when the text is not a schema-conforming
/// document and with `IncompleteVerdict` when the verdict set does not match
/// the analysed members one-to-one.
pub fn validate_recipe_analysis(
    raw: &RawModelOutput,
    members: &[&FamilyMember],
) -> Result<RecipeAnalysis, CoreError> {
    let value = parse_value(raw)?;

    let object = value.as_object().ok_or_else(|| {
        CoreError::MalformedResponse("expected a JSON object at the top level".to_string())
    })?;
    if !object.contains_key("member_verdicts") {
        warn!("Model response has no member_verdicts");
        return Err(CoreError::IncompleteVerdict(
            "response contains no member verdicts".to_string(),
        ));
    }

    let document: RecipeAnalysisDocument = decode(value)?;
    let member_verdicts = match_verdicts(document.member_verdicts, members)?;

    Ok(RecipeAnalysis {
        dish_name: document.dish_name,
        base_description: document.base_description,
        overall_safety: document.overall_safety,
        member_verdicts,
        general_tips: document.general_tips,
    })
}

/// Pairs verdicts with members by id and returns them in member order.
fn match_verdicts(
    documents: Vec<MemberVerdictDocument>,
    members: &[&FamilyMember],
) -> Result<Vec<MemberVerdict>, CoreError> {
    let mut by_id: HashMap<Uuid, MemberVerdictDocument> = HashMap::with_capacity(documents.len());

    for document in documents {
        let member_id = Uuid::parse_str(document.member_id.trim())
            .ok()
            .filter(|id| members.iter().any(|m| m.id == *id))
            .ok_or_else(|| {
                warn!(member_id = %document.member_id, "Verdict for unknown member");
                CoreError::IncompleteVerdict(format!(
                    "verdict references unknown member {}",
                    document.member_id
                ))
            })?;

        if by_id.insert(member_id, document).is_some() {
            warn!(%member_id, "Duplicate verdict");
            return Err(CoreError::IncompleteVerdict(format!(
                "more than one verdict for member {}",
                member_id
            )));
        }
    }

    members
        .iter()
        .map(|member| {
            by_id
                .remove(&member.id)
                .ok_or_else(|| {
                    warn!(member_id = %member.id, "Missing verdict");
                    CoreError::IncompleteVerdict(format!("no verdict for {}", member.name))
                })
                .and_then(|document| document.into_verdict(member))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::family::entities::{FamilyMemberConfig, MemberRole};

    fn member(name: &str) -> FamilyMember {
        FamilyMember::new(FamilyMemberConfig {
            user_id: Uuid::nil(),
            name: name.to_string(),
            avatar: "🙂".to_string(),
            role: MemberRole::Adult,
            conditions: vec![],
            custom_restrictions: vec![],
        })
        .unwrap()
    }

    fn verdict(member: &FamilyMember, verdict: &str) -> serde_json::Value {
        json!({
            "member_id": member.id.to_string(),
            "member_name": member.name,
            "verdict": verdict,
            "reasons": ["fine"],
            "concerns": []
        })
    }

    fn document(verdicts: Vec<serde_json::Value>) -> RawModelOutput {
        RawModelOutput::new(
            json!({
                "dish_name": "Rice",
                "base_description": "Steamed rice",
                "overall_safety": "safe",
                "member_verdicts": verdicts,
                "general_tips": []
            })
            .to_string(),
        )
    }

    #[test]
    fn test_verdicts_are_returned_in_member_order() {
        let mom = member("Mom");
        let dad = member("Dad");

        let analysis = validate_recipe_analysis(
            &document(vec![verdict(&dad, "safe"), verdict(&mom, "safe")]),
            &[&mom, &dad],
        )
        .unwrap();

        let ids: Vec<Uuid> = analysis.member_verdicts.iter().map(|v| v.member_id).collect();
        assert_eq!(ids, vec![mom.id, dad.id]);
    }

    #[test]
    fn test_member_name_comes_from_profile() {
        let mom = member("Mom");
        let mut entry = verdict(&mom, "safe");
        entry["member_name"] = json!("Someone else");

        let analysis = validate_recipe_analysis(&document(vec![entry]), &[&mom]).unwrap();

        assert_eq!(analysis.member_verdicts[0].member_name, "Mom");
    }

    #[test]
    fn test_missing_verdict_is_incomplete() {
        let mom = member("Mom");
        let dad = member("Dad");

        let result = validate_recipe_analysis(&document(vec![verdict(&mom, "safe")]), &[&mom, &dad]);

        assert!(matches!(result, Err(CoreError::IncompleteVerdict(_))));
    }

    #[test]
    fn test_duplicate_verdict_is_incomplete() {
        let mom = member("Mom");

        let result = validate_recipe_analysis(
            &document(vec![verdict(&mom, "safe"), verdict(&mom, "not_recommended")]),
            &[&mom],
        );

        assert!(matches!(result, Err(CoreError::IncompleteVerdict(_))));
    }

    #[test]
    fn test_non_uuid_member_id_is_incomplete() {
        let mom = member("Mom");
        let mut entry = verdict(&mom, "safe");
        entry["member_id"] = json!("mom");

        let result = validate_recipe_analysis(&document(vec![entry]), &[&mom]);

        assert!(matches!(result, Err(CoreError::IncompleteVerdict(_))));
    }

    #[test]
    fn test_missing_member_verdicts_field_is_incomplete() {
        let mom = member("Mom");
        let raw = RawModelOutput::new(
            json!({
                "dish_name": "Rice",
                "base_description": "Steamed rice",
                "overall_safety": "safe"
            })
            .to_string(),
        );

        let result = validate_recipe_analysis(&raw, &[&mom]);

        assert!(matches!(result, Err(CoreError::IncompleteVerdict(_))));
    }

    #[test]
    fn test_out_of_enum_verdict_is_malformed() {
        let mom = member("Mom");

        let result = validate_recipe_analysis(&document(vec![verdict(&mom, "probably_ok")]), &[&mom]);

        assert!(matches!(result, Err(CoreError::MalformedResponse(_))));
    }

    #[test]
    fn test_out_of_enum_overall_safety_is_malformed() {
        let mom = member("Mom");
        let raw = RawModelOutput::new(
            json!({
                "dish_name": "Rice",
                "base_description": "Steamed rice",
                "overall_safety": "mostly_safe",
                "member_verdicts": [verdict(&mom, "safe")]
            })
            .to_string(),
        );

        assert!(matches!(
            validate_recipe_analysis(&raw, &[&mom]),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let mom = member("Mom");
        let mut entry = verdict(&mom, "safe");
        entry["confidence"] = json!(0.9);

        let result = validate_recipe_analysis(&document(vec![entry]), &[&mom]);

        assert!(matches!(result, Err(CoreError::MalformedResponse(_))));
    }

    #[test]
    fn test_needs_adaptation_requires_adaptations() {
        let mom = member("Mom");
        let mut entry = verdict(&mom, "needs_adaptation");

        assert!(matches!(
            validate_recipe_analysis(&document(vec![entry.clone()]), &[&mom]),
            Err(CoreError::MalformedResponse(_))
        ));

        entry["adaptations"] = json!({ "modifications": [], "substitutions": [] });
        assert!(matches!(
            validate_recipe_analysis(&document(vec![entry.clone()]), &[&mom]),
            Err(CoreError::MalformedResponse(_))
        ));

        entry["adaptations"] = json!({
            "substitutions": [{
                "original": "salt",
                "replacement": "herbs",
                "reason": "sodium"
            }]
        });
        let analysis = validate_recipe_analysis(&document(vec![entry]), &[&mom]).unwrap();
        assert_eq!(analysis.member_verdicts[0].verdict, Verdict::NeedsAdaptation);
    }

    #[test]
    fn test_fenced_response_is_accepted() {
        let mom = member("Mom");
        let body = document(vec![verdict(&mom, "safe")]);
        let raw = RawModelOutput::new(format!("Sure!\n```json\n{}\n```", body.as_str()));

        assert!(validate_recipe_analysis(&raw, &[&mom]).is_ok());
    }

    #[test]
    fn test_draft_and_correction_blocks_are_rejected() {
        let mom = member("Mom");
        let draft = document(vec![verdict(&mom, "safe")]);
        let correction = document(vec![verdict(&mom, "not_recommended")]);
        let raw = RawModelOutput::new(format!(
            "Draft:\n```json\n{}\n```\nCorrection, the final answer is:\n```json\n{}\n```",
            draft.as_str(),
            correction.as_str()
        ));

        assert!(matches!(
            validate_recipe_analysis(&raw, &[&mom]),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let mom = member("Mom");
        let raw = document(vec![verdict(&mom, "safe"), verdict(&mom, "safe")]);

        assert_eq!(
            validate_recipe_analysis(&raw, &[&mom]),
            validate_recipe_analysis(&raw, &[&mom])
        );
    }
}
