use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::generate_uuid_v7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaim {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
    pub typ: TokenType,
}

impl JwtClaim {
    pub fn new(sub: Uuid, email: String, typ: TokenType, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub,
            email,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: generate_uuid_v7(),
            typ,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jwt {
    pub token: String,
    pub expires_at: i64,
}

/// Server-side record of an issued refresh token, keyed by its `jti`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn from_claim(claim: &JwtClaim) -> Self {
        Self {
            id: claim.jti,
            user_id: claim.sub,
            expires_at: claim.expires_at(),
            revoked: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at > now
    }
}
