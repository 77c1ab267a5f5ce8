use uuid::Uuid;

pub struct AnalyzeRecipeInput {
    pub recipe_text: String,
    /// Restricts the analysis to these members; `None` analyses the whole household.
    pub member_ids: Option<Vec<Uuid>>,
}
