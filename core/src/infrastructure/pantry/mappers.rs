use crate::{domain::pantry::entities::PantryItem, entity::pantry_items};

impl From<pantry_items::Model> for PantryItem {
    fn from(model: pantry_items::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            category: model.category,
            created_at: model.created_at.to_utc(),
        }
    }
}
