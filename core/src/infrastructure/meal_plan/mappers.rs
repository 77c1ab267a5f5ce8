use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        meal_plan::entities::{MealPlan, MealType, PlannedMeal},
    },
    entity::{meal_plans, planned_meals},
};

impl TryFrom<planned_meals::Model> for PlannedMeal {
    type Error = CoreError;

    fn try_from(model: planned_meals::Model) -> Result<Self, Self::Error> {
        let meal_type = MealType::parse(&model.meal_type).ok_or_else(|| {
            error!("Stored meal type {} is not recognised", model.meal_type);
            CoreError::InternalServerError
        })?;
        let servings = u32::try_from(model.servings).map_err(|_| {
            error!("Stored servings {} is negative", model.servings);
            CoreError::InternalServerError
        })?;

        Ok(Self {
            id: model.id,
            plan_id: model.plan_id,
            recipe_id: model.recipe_id,
            date: model.date,
            meal_type,
            servings,
            notes: model.notes,
            dish_name: None,
            analysis: None,
        })
    }
}

pub fn map_plan(
    model: meal_plans::Model,
    meals: Vec<planned_meals::Model>,
) -> Result<MealPlan, CoreError> {
    Ok(MealPlan {
        id: model.id,
        user_id: model.user_id,
        week_start: model.week_start,
        meals: meals
            .into_iter()
            .map(PlannedMeal::try_from)
            .collect::<Result<_, _>>()?,
        created_at: model.created_at.to_utc(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    fn row(meal_type: &str, servings: i32) -> planned_meals::Model {
        planned_meals::Model {
            id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            recipe_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
            meal_type: meal_type.to_string(),
            servings,
            notes: None,
        }
    }

    #[test]
    fn test_row_maps_to_meal() {
        let meal = PlannedMeal::try_from(row("dinner", 3)).unwrap();

        assert_eq!(meal.meal_type, MealType::Dinner);
        assert_eq!(meal.servings, 3);
        assert_eq!(meal.dish_name, None);
    }

    #[test]
    fn test_corrupt_rows_are_internal_errors() {
        assert_eq!(
            PlannedMeal::try_from(row("brunch", 1)),
            Err(CoreError::InternalServerError)
        );
        assert_eq!(
            PlannedMeal::try_from(row("lunch", -1)),
            Err(CoreError::InternalServerError)
        );
    }
}
