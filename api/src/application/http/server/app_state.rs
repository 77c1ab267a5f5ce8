use std::sync::Arc;

use mealadapt_core::application::MealAdaptService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MealAdaptService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MealAdaptService) -> Self {
        Self { args, service }
    }
}
