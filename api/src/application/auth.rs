use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use mealadapt_core::domain::authentication::{ports::AuthService, value_objects::Identity};
use tracing::debug;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

/// Why a presented bearer token was not turned into an [`Identity`].
#[derive(Debug, Clone)]
struct AuthRejection(ApiError);

pub async fn extract_token_from_bearer(parts: &mut Parts) -> Option<String> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .ok()?;

    let token = bearer.token().trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Resolves the bearer token, when one is sent, into an [`Identity`] request extension.
/// Rejection happens later in [`RequiredIdentity`] so that the error carries the cause.
pub async fn auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if let Some(token) = extract_token_from_bearer(&mut parts).await {
        match state.service.authorize(token).await {
            Ok(identity) => {
                parts.extensions.insert(identity);
            }
            Err(e) => {
                debug!("bearer token rejected: {}", e);
                parts.extensions.insert(AuthRejection(ApiError::from(e)));
            }
        }
    }

    next.run(Request::from_parts(parts, body)).await
}

/// Extractor for handlers that need an authenticated caller.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>().cloned() {
            return Ok(RequiredIdentity(identity));
        }

        if let Some(AuthRejection(error)) = parts.extensions.get::<AuthRejection>().cloned() {
            return Err(error);
        }

        Err(ApiError::Unauthorized(
            "Authentication required: provide a Bearer token in the Authorization header"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request as HttpRequest;

    use super::*;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = HttpRequest::builder().uri("/api/auth/me");
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_bearer_token_is_extracted() {
        let mut parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(
            extract_token_from_bearer(&mut parts).await,
            Some("abc.def.ghi".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_or_foreign_scheme_yields_none() {
        assert_eq!(extract_token_from_bearer(&mut parts_with(None)).await, None);
        assert_eq!(
            extract_token_from_bearer(&mut parts_with(Some("Basic dXNlcjpwYXNz"))).await,
            None
        );
    }
}
