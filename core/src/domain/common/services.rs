use crate::domain::{common::AuthConfig, llm::invoker::ModelInvoker};

/// Single application service. Each feature implements its service trait on
/// this struct, bounded on the ports it needs.
#[derive(Clone)]
pub struct Service<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> {
    pub(crate) user_repository: U,
    pub(crate) refresh_token_repository: RT,
    pub(crate) hasher_repository: H,
    pub(crate) token_codec: TK,
    pub(crate) family_member_repository: F,
    pub(crate) saved_recipe_repository: SR,
    pub(crate) shopping_list_repository: SH,
    pub(crate) meal_plan_repository: MP,
    pub(crate) pantry_repository: P,
    pub(crate) product_catalog: PC,
    pub(crate) health_check_repository: HC,
    pub(crate) invoker: ModelInvoker<LLM, RL>,
    pub(crate) auth_config: AuthConfig,
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> Service<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repository: U,
        refresh_token_repository: RT,
        hasher_repository: H,
        token_codec: TK,
        family_member_repository: F,
        saved_recipe_repository: SR,
        shopping_list_repository: SH,
        meal_plan_repository: MP,
        pantry_repository: P,
        product_catalog: PC,
        health_check_repository: HC,
        invoker: ModelInvoker<LLM, RL>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            user_repository,
            refresh_token_repository,
            hasher_repository,
            token_codec,
            family_member_repository,
            saved_recipe_repository,
            shopping_list_repository,
            meal_plan_repository,
            pantry_repository,
            product_catalog,
            health_check_repository,
            invoker,
            auth_config,
        }
    }
}
