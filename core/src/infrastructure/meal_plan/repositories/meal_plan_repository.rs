use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::OnConflict,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        meal_plan::{
            entities::{MealPlan, PlannedMeal},
            ports::MealPlanRepository,
        },
    },
    entity::{
        meal_plans::{ActiveModel, Column, Entity, Model},
        planned_meals::{
            ActiveModel as MealActiveModel, Column as MealColumn, Entity as MealEntity,
        },
    },
    infrastructure::meal_plan::mappers::map_plan,
};

#[derive(Debug, Clone)]
pub struct PostgresMealPlanRepository {
    pub db: DatabaseConnection,
}

impl PostgresMealPlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_meals(&self, plan: Model) -> Result<MealPlan, CoreError> {
        let meals = plan
            .find_related(MealEntity)
            .order_by_asc(MealColumn::Date)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load planned meals: {}", e);
                CoreError::InternalServerError
            })?;

        map_plan(plan, meals)
    }
}

fn meal_active_model(meal: &PlannedMeal) -> Result<MealActiveModel, CoreError> {
    let servings = i32::try_from(meal.servings).map_err(|_| {
        CoreError::ValidationError(format!("servings {} is out of range", meal.servings))
    })?;

    Ok(MealActiveModel {
        id: Set(meal.id),
        plan_id: Set(meal.plan_id),
        recipe_id: Set(meal.recipe_id),
        date: Set(meal.date),
        meal_type: Set(meal.meal_type.as_str().to_string()),
        servings: Set(servings),
        notes: Set(meal.notes.clone()),
    })
}

fn map_db_error(action: &'static str) -> impl Fn(DbErr) -> CoreError {
    move |e| {
        error!("Failed to {}: {}", action, e);
        CoreError::InternalServerError
    }
}

impl MealPlanRepository for PostgresMealPlanRepository {
    async fn get_or_create_plan(&self, plan: MealPlan) -> Result<MealPlan, CoreError> {
        let active_model = ActiveModel {
            id: Set(plan.id),
            user_id: Set(plan.user_id),
            week_start: Set(plan.week_start),
            created_at: Set(plan.created_at.fixed_offset()),
        };

        // (user_id, week_start) is unique; a concurrent first access keeps the
        // row that landed first.
        Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::WeekStart])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_error("create meal plan"))?;

        let stored = Entity::find()
            .filter(Column::UserId.eq(plan.user_id))
            .filter(Column::WeekStart.eq(plan.week_start))
            .one(&self.db)
            .await
            .map_err(map_db_error("get meal plan"))?
            .ok_or(CoreError::InternalServerError)?;

        self.with_meals(stored).await
    }

    async fn get_plan(&self, plan_id: Uuid, user_id: Uuid) -> Result<Option<MealPlan>, CoreError> {
        let plan = Entity::find()
            .filter(Column::Id.eq(plan_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(map_db_error("get meal plan"))?;

        match plan {
            Some(plan) => self.with_meals(plan).await.map(Some),
            None => Ok(None),
        }
    }

    async fn add_meal(&self, meal: PlannedMeal) -> Result<PlannedMeal, CoreError> {
        MealEntity::insert(meal_active_model(&meal)?)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_error("add planned meal"))?;

        Ok(meal)
    }

    async fn get_meal(&self, meal_id: Uuid, user_id: Uuid) -> Result<Option<PlannedMeal>, CoreError> {
        let meal = MealEntity::find()
            .inner_join(Entity)
            .filter(MealColumn::Id.eq(meal_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(map_db_error("get planned meal"))?;

        meal.map(PlannedMeal::try_from).transpose()
    }

    async fn update_meal(&self, meal: PlannedMeal) -> Result<PlannedMeal, CoreError> {
        MealEntity::update(meal_active_model(&meal)?)
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::NotFound,
                e => map_db_error("update planned meal")(e),
            })?;

        Ok(meal)
    }

    async fn delete_meal(&self, meal_id: Uuid) -> Result<(), CoreError> {
        MealEntity::delete_by_id(meal_id)
            .exec(&self.db)
            .await
            .map_err(map_db_error("delete planned meal"))?;

        Ok(())
    }
}
