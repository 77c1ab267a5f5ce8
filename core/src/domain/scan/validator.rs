use serde::Deserialize;
use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError,
    family::entities::FamilyMember,
    llm::{entities::RawModelOutput, payload::parse_document},
    recipe_analysis::entities::OverallSafety,
    scan::entities::{IngredientConcern, IngredientSafetyReport, ScanResult},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IngredientReportDocument {
    overall_safety: OverallSafety,
    concerns: Vec<IngredientConcern>,
    #[serde(default)]
    safe_for_all: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LabelScanDocument {
    product_name: String,
    extracted_ingredients: Vec<String>,
    overall_safety: OverallSafety,
    concerns: Vec<IngredientConcern>,
    #[serde(default)]
    safe_for_all: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

/// Rewrites affected member names to their profile spelling. A name that
/// matches nobody in the analysed household fails the whole report.
fn resolve_concerns(
    concerns: Vec<IngredientConcern>,
    members: &[&FamilyMember],
) -> Result<Vec<IngredientConcern>, CoreError> {
    concerns
        .into_iter()
        .map(|mut concern| {
            concern.affected_members = concern
                .affected_members
                .iter()
                .map(|name| {
                    members
                        .iter()
                        .find(|m| m.name.trim().eq_ignore_ascii_case(name.trim()))
                        .map(|m| m.name.clone())
                        .ok_or_else(|| {
                            warn!(member = %name, "Concern names an unknown member");
                            CoreError::IncompleteVerdict(format!(
                                "concern for {} names unknown member {}",
                                concern.ingredient, name
                            ))
                        })
                })
                .collect::<Result<Vec<String>, CoreError>>()?;
            Ok(concern)
        })
        .collect()
}

fn build_report(
    overall_safety: OverallSafety,
    concerns: Vec<IngredientConcern>,
    safe_for_all: Vec<String>,
    recommendations: Vec<String>,
    members: &[&FamilyMember],
) -> Result<IngredientSafetyReport, CoreError> {
    let concerns = resolve_concerns(concerns, members)?;

    if overall_safety == OverallSafety::Safe && !concerns.is_empty() {
        warn!("Report claims safe but lists concerns");
        return Err(CoreError::MalformedResponse(
            "overall_safety is safe but concerns were listed".to_string(),
        ));
    }

    Ok(IngredientSafetyReport {
        overall_safety,
        concerns,
        safe_for_all,
        recommendations,
    })
}

pub fn validate_ingredient_report(
    raw: &RawModelOutput,
    members: &[&FamilyMember],
) -> Result<IngredientSafetyReport, CoreError> {
    let document: IngredientReportDocument = parse_document(raw)?;

    build_report(
        document.overall_safety,
        document.concerns,
        document.safe_for_all,
        document.recommendations,
        members,
    )
}

pub fn validate_label_scan(
    raw: &RawModelOutput,
    members: &[&FamilyMember],
) -> Result<ScanResult, CoreError> {
    let document: LabelScanDocument = parse_document(raw)?;

    let product_name = match document.product_name.trim() {
        "" => "Unknown Product".to_string(),
        name => name.to_string(),
    };

    Ok(ScanResult {
        product_name,
        extracted_ingredients: document.extracted_ingredients,
        report: build_report(
            document.overall_safety,
            document.concerns,
            document.safe_for_all,
            document.recommendations,
            members,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::domain::family::entities::{FamilyMemberConfig, MemberRole};
    use crate::domain::scan::entities::Severity;

    fn member(name: &str) -> FamilyMember {
        FamilyMember::new(FamilyMemberConfig {
            user_id: Uuid::nil(),
            name: name.to_string(),
            avatar: "🙂".to_string(),
            role: MemberRole::Child,
            conditions: vec![],
            custom_restrictions: vec![],
        })
        .unwrap()
    }

    fn report(affected: Vec<&str>) -> RawModelOutput {
        RawModelOutput::new(
            json!({
                "overall_safety": "unsafe",
                "concerns": [{
                    "ingredient": "peanut oil",
                    "affected_members": affected,
                    "reason": "peanut allergy",
                    "severity": "high"
                }],
                "safe_for_all": ["salt"],
                "recommendations": ["avoid"]
            })
            .to_string(),
        )
    }

    #[test]
    fn test_member_names_are_normalized_to_profile() {
        let mia = member("Mia");

        let parsed = validate_ingredient_report(&report(vec!["mia "]), &[&mia]).unwrap();

        assert_eq!(parsed.concerns[0].affected_members, vec!["Mia".to_string()]);
        assert_eq!(parsed.concerns[0].severity, Severity::High);
    }

    #[test]
    fn test_unknown_member_name_is_incomplete() {
        let mia = member("Mia");

        assert!(matches!(
            validate_ingredient_report(&report(vec!["Grandpa"]), &[&mia]),
            Err(CoreError::IncompleteVerdict(_))
        ));
    }

    #[test]
    fn test_label_scan_defaults_product_name() {
        let mia = member("Mia");
        let raw = RawModelOutput::new(
            json!({
                "product_name": "  ",
                "extracted_ingredients": ["sugar", "cocoa"],
                "overall_safety": "safe",
                "concerns": [],
                "safe_for_all": ["sugar", "cocoa"],
                "recommendations": []
            })
            .to_string(),
        );

        let scan = validate_label_scan(&raw, &[&mia]).unwrap();

        assert_eq!(scan.product_name, "Unknown Product");
        assert_eq!(scan.extracted_ingredients.len(), 2);
    }

    #[test]
    fn test_safe_report_with_concerns_is_malformed() {
        let mia = member("Mia");
        let raw = RawModelOutput::new(
            json!({
                "overall_safety": "safe",
                "concerns": [{
                    "ingredient": "peanut oil",
                    "affected_members": ["Mia"],
                    "reason": "peanut allergy",
                    "severity": "high"
                }],
                "safe_for_all": [],
                "recommendations": []
            })
            .to_string(),
        );

        assert!(matches!(
            validate_ingredient_report(&raw, &[&mia]),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_bad_severity_is_malformed() {
        let mia = member("Mia");
        let raw = RawModelOutput::new(
            json!({
                "overall_safety": "caution",
                "concerns": [{
                    "ingredient": "salt",
                    "affected_members": ["Mia"],
                    "reason": "sodium",
                    "severity": "extreme"
                }]
            })
            .to_string(),
        );

        assert!(matches!(
            validate_ingredient_report(&raw, &[&mia]),
            Err(CoreError::MalformedResponse(_))
        ));
    }
}
