use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp},
    recipe_analysis::entities::RecipeAnalysis,
};

pub const MAX_SERVINGS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase())).ok()
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlannedMeal {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub recipe_id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub servings: u32,
    pub notes: Option<String>,
    /// Joined from the saved recipe; absent once that recipe is deleted.
    pub dish_name: Option<String>,
    pub analysis: Option<RecipeAnalysis>,
}

#[derive(Debug, Clone)]
pub struct PlannedMealConfig {
    pub plan_id: Uuid,
    pub recipe_id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub servings: u32,
    pub notes: Option<String>,
}

pub fn validate_servings(servings: u32) -> Result<u32, CoreError> {
    if !(1..=MAX_SERVINGS).contains(&servings) {
        return Err(CoreError::ValidationError(format!(
            "servings must be between 1 and {}",
            MAX_SERVINGS
        )));
    }
    Ok(servings)
}

impl PlannedMeal {
    pub fn new(config: PlannedMealConfig) -> Result<Self, CoreError> {
        let (_, timestamp) = generate_timestamp();

        Ok(Self {
            id: Uuid::new_v7(timestamp),
            plan_id: config.plan_id,
            recipe_id: config.recipe_id,
            date: config.date,
            meal_type: config.meal_type,
            servings: validate_servings(config.servings)?,
            notes: config.notes.filter(|n| !n.trim().is_empty()),
            dish_name: None,
            analysis: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_start: NaiveDate,
    /// Ordered by date, then breakfast to snack.
    pub meals: Vec<PlannedMeal>,
    pub created_at: DateTime<Utc>,
}

impl MealPlan {
    pub fn new(user_id: Uuid, week_start: NaiveDate) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            week_start: week_start_of(week_start),
            meals: Vec::new(),
            created_at: now,
        }
    }

    /// Distinct recipe ids in first-planned order.
    pub fn recipe_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = Vec::with_capacity(self.meals.len());
        for meal in &self.meals {
            if !ids.contains(&meal.recipe_id) {
                ids.push(meal.recipe_id);
            }
        }
        ids
    }

    pub fn sort_meals(&mut self) {
        self.meals.sort_by_key(|m| (m.date, m.meal_type));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meal(plan: &MealPlan, recipe_id: Uuid, day: NaiveDate, meal_type: MealType) -> PlannedMeal {
        PlannedMeal::new(PlannedMealConfig {
            plan_id: plan.id,
            recipe_id,
            date: day,
            meal_type,
            servings: 2,
            notes: None,
        })
        .unwrap()
    }

    #[test]
    fn test_week_starts_on_monday() {
        assert_eq!(week_start_of(date(2026, 10, 14)), date(2026, 10, 12));
        assert_eq!(week_start_of(date(2026, 10, 12)), date(2026, 10, 12));
        assert_eq!(week_start_of(date(2026, 10, 18)), date(2026, 10, 12));
        assert_eq!(week_start_of(date(2026, 1, 1)), date(2025, 12, 29));
    }

    #[test]
    fn test_servings_are_bounded() {
        assert!(validate_servings(0).is_err());
        assert_eq!(validate_servings(4).unwrap(), 4);
        assert!(validate_servings(MAX_SERVINGS + 1).is_err());
    }

    #[test]
    fn test_meals_sort_by_day_then_meal_type() {
        let mut plan = MealPlan::new(Uuid::new_v4(), date(2026, 10, 14));
        let soup = Uuid::new_v4();
        let oats = Uuid::new_v4();
        plan.meals = vec![
            meal(&plan, soup, date(2026, 10, 13), MealType::Dinner),
            meal(&plan, oats, date(2026, 10, 13), MealType::Breakfast),
            meal(&plan, soup, date(2026, 10, 12), MealType::Lunch),
        ];

        plan.sort_meals();

        let order: Vec<(NaiveDate, MealType)> =
            plan.meals.iter().map(|m| (m.date, m.meal_type)).collect();
        assert_eq!(
            order,
            vec![
                (date(2026, 10, 12), MealType::Lunch),
                (date(2026, 10, 13), MealType::Breakfast),
                (date(2026, 10, 13), MealType::Dinner),
            ]
        );
        assert_eq!(plan.recipe_ids(), vec![soup, oats]);
    }

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!(MealType::parse(" Dinner "), Some(MealType::Dinner));
        assert_eq!(MealType::parse("brunch"), None);
    }
}
