pub struct AddPantryItemInput {
    pub name: String,
    pub category: Option<String>,
}

pub struct SuggestRecipesInput {
    /// Overrides the stored pantry when present.
    pub ingredients: Option<Vec<String>>,
}
