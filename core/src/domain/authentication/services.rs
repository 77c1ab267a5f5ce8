use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    authentication::{
        entities::AuthSession,
        ports::AuthService,
        value_objects::{
            ChangePasswordInput, Identity, LoginInput, RegisterInput, UpdateProfileInput,
        },
    },
    barcode::ports::ProductCatalog,
    common::{
        AuthConfig, entities::app_errors::CoreError, generate_timestamp, services::Service,
    },
    crypto::ports::HasherRepository,
    family::ports::FamilyMemberRepository,
    health::ports::HealthCheckRepository,
    jwt::{
        entities::{JwtClaim, RefreshToken, TokenType},
        ports::{RefreshTokenRepository, TokenCodec},
    },
    llm::ports::{LLMClient, RateLimiter},
    meal_plan::ports::MealPlanRepository,
    pantry::ports::PantryRepository,
    saved_recipe::ports::SavedRecipeRepository,
    shopping::ports::ShoppingListRepository,
    user::{
        entities::{User, normalize_email},
        ports::UserRepository,
    },
};

async fn issue_session<TK, RT>(
    token_codec: &TK,
    refresh_token_repository: &RT,
    config: &AuthConfig,
    user: User,
) -> Result<AuthSession, CoreError>
where
    TK: TokenCodec,
    RT: RefreshTokenRepository,
{
    let access_ttl = Duration::hours(config.access_token_ttl_hours);
    let access_claim = JwtClaim::new(user.id, user.email.clone(), TokenType::Access, access_ttl);
    let refresh_claim = JwtClaim::new(
        user.id,
        user.email.clone(),
        TokenType::Refresh,
        Duration::days(config.refresh_token_ttl_days),
    );

    let access = token_codec.sign(access_claim).await?;
    let refresh = token_codec.sign(refresh_claim.clone()).await?;
    refresh_token_repository
        .create(RefreshToken::from_claim(&refresh_claim))
        .await?;

    Ok(AuthSession {
        user,
        access_token: access.token,
        refresh_token: refresh.token,
        token_type: "bearer".to_string(),
        expires_in: access_ttl.num_seconds(),
    })
}

/// A consumed token came back: the whole token family is treated as leaked.
async fn reject_reused_refresh<RT>(
    refresh_token_repository: &RT,
    user_id: Uuid,
) -> Result<AuthSession, CoreError>
where
    RT: RefreshTokenRepository,
{
    warn!(user_id = %user_id, "Refresh token reuse detected");
    refresh_token_repository.revoke_all_for_user(user_id).await?;
    Err(CoreError::InvalidToken)
}

impl<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL> AuthService
    for Service<U, RT, H, TK, F, SR, SH, MP, P, PC, HC, LLM, RL>
where
    U: UserRepository,
    RT: RefreshTokenRepository,
    H: HasherRepository,
    TK: TokenCodec,
    F: FamilyMemberRepository,
    SR: SavedRecipeRepository,
    SH: ShoppingListRepository,
    MP: MealPlanRepository,
    P: PantryRepository,
    PC: ProductCatalog,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    RL: RateLimiter,
{
    #[instrument(skip_all)]
    async fn register(&self, input: RegisterInput) -> Result<AuthSession, CoreError> {
        let email = normalize_email(&input.email);

        if self
            .user_repository
            .get_by_email(email.clone())
            .await?
            .is_some()
        {
            return Err(CoreError::Conflict(
                "an account with this email already exists".to_string(),
            ));
        }

        let password_hash = self.hasher_repository.hash_password(input.password).await?;
        let user = self
            .user_repository
            .create_user(User::new(email, input.name.trim().to_string(), password_hash))
            .await?;

        info!(user_id = %user.id, "User registered");

        issue_session(
            &self.token_codec,
            &self.refresh_token_repository,
            &self.auth_config,
            user,
        )
        .await
    }

    #[instrument(skip_all)]
    async fn login(&self, input: LoginInput) -> Result<AuthSession, CoreError> {
        let user = self
            .user_repository
            .get_by_email(normalize_email(&input.email))
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        let valid = self
            .hasher_repository
            .verify_password(input.password, user.password_hash.clone())
            .await?;
        if !valid {
            warn!(user_id = %user.id, "Rejected login attempt");
            return Err(CoreError::InvalidCredentials);
        }

        issue_session(
            &self.token_codec,
            &self.refresh_token_repository,
            &self.auth_config,
            user,
        )
        .await
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: String) -> Result<AuthSession, CoreError> {
        let claim = self.token_codec.verify(refresh_token).await?;
        if claim.typ != TokenType::Refresh {
            return Err(CoreError::InvalidToken);
        }

        let stored = self
            .refresh_token_repository
            .get_by_jti(claim.jti)
            .await?
            .ok_or(CoreError::InvalidToken)?;

        if stored.user_id != claim.sub {
            return Err(CoreError::InvalidToken);
        }

        if stored.revoked {
            return reject_reused_refresh(&self.refresh_token_repository, claim.sub).await;
        }

        if !stored.is_usable(Utc::now()) {
            return Err(CoreError::TokenExpired);
        }

        // Lost the race against a concurrent refresh with the same token.
        if !self.refresh_token_repository.consume(claim.jti).await? {
            return reject_reused_refresh(&self.refresh_token_repository, claim.sub).await;
        }

        let user = self
            .user_repository
            .get_by_id(claim.sub)
            .await?
            .ok_or(CoreError::InvalidToken)?;

        issue_session(
            &self.token_codec,
            &self.refresh_token_repository,
            &self.auth_config,
            user,
        )
        .await
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn logout(&self, identity: Identity) -> Result<(), CoreError> {
        self.refresh_token_repository
            .revoke_all_for_user(identity.id())
            .await
    }

    async fn authorize(&self, token: String) -> Result<Identity, CoreError> {
        let claim = self.token_codec.verify(token).await?;
        if claim.typ != TokenType::Access {
            return Err(CoreError::InvalidToken);
        }

        Ok(Identity::new(claim.sub, claim.email))
    }

    async fn get_me(&self, identity: Identity) -> Result<User, CoreError> {
        self.user_repository
            .get_by_id(identity.id())
            .await?
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn update_me(
        &self,
        identity: Identity,
        input: UpdateProfileInput,
    ) -> Result<User, CoreError> {
        let mut user = self.get_me(identity).await?;

        if let Some(name) = input.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(CoreError::ValidationError("name must not be empty".to_string()));
            }
            user.name = name.to_string();
        }

        if let Some(email) = input.email {
            let email = normalize_email(&email);
            if email != user.email {
                let taken = self
                    .user_repository
                    .get_by_email(email.clone())
                    .await?
                    .is_some_and(|other| other.id != user.id);
                if taken {
                    return Err(CoreError::Conflict("email already in use".to_string()));
                }
                user.email = email;
            }
        }

        user.updated_at = generate_timestamp().0;
        let user = self.user_repository.update_user(user).await?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn change_password(
        &self,
        identity: Identity,
        input: ChangePasswordInput,
    ) -> Result<(), CoreError> {
        let mut user = self.get_me(identity).await?;

        let valid = self
            .hasher_repository
            .verify_password(input.current_password, user.password_hash.clone())
            .await?;
        if !valid {
            warn!(user_id = %user.id, "Rejected password change");
            return Err(CoreError::Invalid("current password is incorrect".to_string()));
        }

        user.password_hash = self
            .hasher_repository
            .hash_password(input.new_password)
            .await?;
        user.updated_at = generate_timestamp().0;
        let user = self.user_repository.update_user(user).await?;

        self.refresh_token_repository
            .revoke_all_for_user(user.id)
            .await?;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn delete_me(&self, identity: Identity) -> Result<(), CoreError> {
        self.user_repository.delete_user(identity.id()).await?;

        info!(user_id = %identity.id(), "Account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::domain::{
        common::services::tests::{Stores, TestService},
        llm::invoker::tests::ScriptedClient,
    };

    async fn register(service: &TestService, email: &str) -> AuthSession {
        service
            .register(RegisterInput {
                email: email.to_string(),
                name: "Ana".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap()
    }

    fn identity_of(session: &AuthSession) -> Identity {
        Identity::new(session.user.id, session.user.email.clone())
    }

    #[tokio::test]
    async fn test_refresh_rotates_the_token_pair() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let first = register(&service, "ana@example.com").await;

        let second = service.refresh(first.refresh_token.clone()).await.unwrap();

        assert_ne!(second.refresh_token, first.refresh_token);
        assert_eq!(second.user.id, first.user.id);
        assert_eq!(stores.refresh_tokens.live_for(first.user.id), 1);
        assert!(service.authorize(second.access_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_reused_refresh_token_revokes_every_session() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let first = register(&service, "ana@example.com").await;
        let second = service.refresh(first.refresh_token.clone()).await.unwrap();

        let replay = service.refresh(first.refresh_token).await;

        assert_eq!(replay, Err(CoreError::InvalidToken));
        assert_eq!(stores.refresh_tokens.live_for(first.user.id), 0);
        assert_eq!(
            service.refresh(second.refresh_token).await,
            Err(CoreError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_refresh_that_loses_the_race_is_treated_as_reuse() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let first = register(&service, "ana@example.com").await;
        service.refresh(first.refresh_token.clone()).await.unwrap();

        // The second request read the token before the first one revoked it.
        stores.refresh_tokens.stale_reads.store(true, Ordering::SeqCst);
        let racing = service.refresh(first.refresh_token).await;

        assert_eq!(racing, Err(CoreError::InvalidToken));
        assert_eq!(stores.refresh_tokens.live_for(first.user.id), 0);
    }

    #[tokio::test]
    async fn test_access_token_cannot_be_used_to_refresh() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let session = register(&service, "ana@example.com").await;

        assert_eq!(
            service.refresh(session.access_token).await,
            Err(CoreError::InvalidToken)
        );
        assert_eq!(
            service.authorize(session.refresh_token).await,
            Err(CoreError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password_and_unknown_email() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        register(&service, "ana@example.com").await;

        let wrong_password = service
            .login(LoginInput {
                email: "ana@example.com".to_string(),
                password: "not-it".to_string(),
            })
            .await;
        let unknown = service
            .login(LoginInput {
                email: "bo@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        assert_eq!(wrong_password, Err(CoreError::InvalidCredentials));
        assert_eq!(unknown, Err(CoreError::InvalidCredentials));
        assert!(
            service
                .login(LoginInput {
                    email: " ANA@example.com ".to_string(),
                    password: "secret1".to_string(),
                })
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_a_conflict() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        register(&service, "ana@example.com").await;

        let again = service
            .register(RegisterInput {
                email: "Ana@Example.com".to_string(),
                name: "Ana".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        assert!(matches!(again, Err(CoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_me_refuses_an_email_in_use() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let ana = register(&service, "ana@example.com").await;
        register(&service, "bo@example.com").await;

        let taken = service
            .update_me(
                identity_of(&ana),
                UpdateProfileInput {
                    name: None,
                    email: Some("BO@example.com".to_string()),
                },
            )
            .await;
        let renamed = service
            .update_me(
                identity_of(&ana),
                UpdateProfileInput {
                    name: Some("  Ana Maria ".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();

        assert!(matches!(taken, Err(CoreError::Conflict(_))));
        assert_eq!(renamed.name, "Ana Maria");
        assert_eq!(renamed.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_change_password_requires_current_and_ends_sessions() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let session = register(&service, "ana@example.com").await;

        let wrong = service
            .change_password(
                identity_of(&session),
                ChangePasswordInput {
                    current_password: "guess".to_string(),
                    new_password: "secret2".to_string(),
                },
            )
            .await;
        assert!(matches!(wrong, Err(CoreError::Invalid(_))));

        service
            .change_password(
                identity_of(&session),
                ChangePasswordInput {
                    current_password: "secret1".to_string(),
                    new_password: "secret2".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(stores.refresh_tokens.live_for(session.user.id), 0);
        assert!(
            service
                .login(LoginInput {
                    email: "ana@example.com".to_string(),
                    password: "secret2".to_string(),
                })
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_delete_me_removes_the_account() {
        let stores = Stores::default();
        let service = stores.service(ScriptedClient::default());
        let session = register(&service, "ana@example.com").await;

        service.delete_me(identity_of(&session)).await.unwrap();

        assert_eq!(
            service.get_me(identity_of(&session)).await,
            Err(CoreError::NotFound)
        );
        assert_eq!(
            service.delete_me(identity_of(&session)).await,
            Err(CoreError::NotFound)
        );
    }
}
