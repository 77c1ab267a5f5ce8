use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use tracing::{debug, error};

use crate::domain::{
    common::entities::app_errors::CoreError,
    jwt::{
        entities::{Jwt, JwtClaim},
        ports::TokenCodec,
    },
};

/// Signs and verifies tokens with a shared HMAC-SHA256 secret.
#[derive(Clone)]
pub struct Hs256TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Hs256TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenCodec for Hs256TokenCodec {
    async fn sign(&self, claim: JwtClaim) -> Result<Jwt, CoreError> {
        let token = encode(&Header::new(Algorithm::HS256), &claim, &self.encoding_key).map_err(
            |e| {
                error!("Failed to sign token: {}", e);
                CoreError::InternalServerError
            },
        )?;

        Ok(Jwt {
            token,
            expires_at: claim.exp,
        })
    }

    async fn verify(&self, token: String) -> Result<JwtClaim, CoreError> {
        decode::<JwtClaim>(&token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => CoreError::TokenExpired,
                _ => {
                    debug!("Rejected token: {}", e);
                    CoreError::InvalidToken
                }
            })
    }
}
