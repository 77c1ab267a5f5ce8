use uuid::Uuid;

/// The authenticated caller. Every service call is scoped by `id()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

impl Identity {
    pub fn new(user_id: Uuid, email: String) -> Self {
        Self { user_id, email }
    }

    pub fn id(&self) -> Uuid {
        self.user_id
    }
}

pub struct RegisterInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Profile fields to change; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}
