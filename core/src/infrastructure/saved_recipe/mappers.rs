use crate::{
    domain::{common::entities::app_errors::CoreError, saved_recipe::entities::SavedRecipe},
    entity::saved_recipes,
    infrastructure::db::json::from_json,
};

impl TryFrom<saved_recipes::Model> for SavedRecipe {
    type Error = CoreError;

    fn try_from(model: saved_recipes::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            dish_name: model.dish_name,
            recipe_text: model.recipe_text,
            analysis: model
                .analysis
                .map(|analysis| from_json(analysis, "analysis"))
                .transpose()?,
            is_favorite: model.is_favorite,
            notes: model.notes,
            tags: from_json(model.tags, "tags")?,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        })
    }
}
