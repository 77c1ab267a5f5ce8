use crate::{domain::jwt::entities::RefreshToken, entity::refresh_tokens};

impl From<refresh_tokens::Model> for RefreshToken {
    fn from(model: refresh_tokens::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            expires_at: model.expires_at.to_utc(),
            revoked: model.revoked,
            created_at: model.created_at.to_utc(),
        }
    }
}
