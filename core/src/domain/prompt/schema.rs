use serde_json::json;

fn string_array() -> serde_json::Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

/// Returns the JSON schema for recipe analysis responses
pub fn recipe_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "dish_name": { "type": "string" },
            "base_description": { "type": "string" },
            "overall_safety": {
                "type": "string",
                "enum": ["safe", "caution", "unsafe"]
            },
            "member_verdicts": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "member_id": { "type": "string" },
                        "member_name": { "type": "string" },
                        "verdict": {
                            "type": "string",
                            "enum": ["safe", "needs_adaptation", "not_recommended"]
                        },
                        "reasons": string_array(),
                        "concerns": string_array(),
                        "adaptations": {
                            "type": "object",
                            "nullable": true,
                            "properties": {
                                "modifications": string_array(),
                                "substitutions": {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "original": { "type": "string" },
                                            "replacement": { "type": "string" },
                                            "reason": { "type": "string" }
                                        },
                                        "required": ["original", "replacement", "reason"]
                                    }
                                },
                                "preparation_changes": string_array()
                            }
                        },
                        "nutritional_notes": { "type": "string", "nullable": true }
                    },
                    "required": ["member_id", "member_name", "verdict", "reasons", "concerns"]
                }
            },
            "general_tips": string_array()
        },
        "required": ["dish_name", "base_description", "overall_safety", "member_verdicts"]
    })
}

fn ingredient_report_properties() -> serde_json::Map<String, serde_json::Value> {
    let schema = json!({
        "overall_safety": {
            "type": "string",
            "enum": ["safe", "caution", "unsafe"]
        },
        "concerns": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "ingredient": { "type": "string" },
                    "affected_members": string_array(),
                    "reason": { "type": "string" },
                    "severity": {
                        "type": "string",
                        "enum": ["low", "medium", "high"]
                    }
                },
                "required": ["ingredient", "affected_members", "reason", "severity"]
            }
        },
        "safe_for_all": string_array(),
        "recommendations": string_array()
    });

    match schema {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

/// Returns the JSON schema for ingredient list safety reports
pub fn ingredient_report_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": ingredient_report_properties(),
        "required": ["overall_safety", "concerns", "safe_for_all", "recommendations"]
    })
}

/// Returns the JSON schema for ingredient label scans
pub fn label_scan_schema() -> serde_json::Value {
    let mut properties = ingredient_report_properties();
    properties.insert("product_name".to_string(), json!({ "type": "string" }));
    properties.insert("extracted_ingredients".to_string(), string_array());

    json!({
        "type": "object",
        "properties": properties,
        "required": [
            "product_name", "extracted_ingredients",
            "overall_safety", "concerns", "safe_for_all", "recommendations"
        ]
    })
}

/// Returns the JSON schema for pantry recipe suggestions
pub fn recipe_suggestions_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "suggestions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "difficulty": {
                            "type": "string",
                            "enum": ["easy", "medium", "hard"]
                        },
                        "prep_time": { "type": "string" },
                        "matching_ingredients": string_array(),
                        "additional_ingredients": string_array(),
                        "safety_notes": { "type": "string" },
                        "family_friendly_score": { "type": "integer" }
                    },
                    "required": [
                        "name", "description", "difficulty", "prep_time",
                        "matching_ingredients", "additional_ingredients",
                        "safety_notes", "family_friendly_score"
                    ]
                }
            },
            "tips": string_array()
        },
        "required": ["suggestions"]
    })
}

/// Returns the JSON schema for ingredient extraction from recipes
pub fn ingredient_extraction_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "ingredient": { "type": "string" },
                        "quantity": { "type": "string" },
                        "category": {
                            "type": "string",
                            "enum": [
                                "produce", "dairy", "meat", "seafood", "pantry",
                                "bakery", "frozen", "beverages", "other"
                            ]
                        }
                    },
                    "required": ["ingredient", "quantity", "category"]
                }
            }
        },
        "required": ["ingredients"]
    })
}
