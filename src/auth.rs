// src/auth.rs
// DOCUMENTATION: Bearer-token authentication
// PURPOSE: Decode HS256 JWTs into a typed caller identity for handlers
//
// Token issuance lives in the auth service; this side only verifies
// signatures and reads the identity plus the is_admin claim.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::HbnbError;

/// JWT claim set consumed by this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id
    pub sub: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Authenticated caller, extracted per request from the bearer token.
/// Handlers that take this as a parameter require authentication; a
/// missing or invalid token short-circuits to 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub is_admin: bool,
}

impl AuthUser {
    /// Owner-or-admin rule shared by all mutating place endpoints
    pub fn can_manage(&self, owner_id: &str) -> bool {
        self.is_admin || self.user_id == owner_id
    }
}

impl FromRequest for AuthUser {
    type Error = HbnbError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, HbnbError> {
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or(HbnbError::Unauthorized)?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(HbnbError::Unauthorized)?
        .to_str()
        .map_err(|_| HbnbError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(HbnbError::Unauthorized)?
        .trim();
    if token.is_empty() {
        return Err(HbnbError::Unauthorized);
    }

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        log::debug!("Rejected bearer token: {}", e);
        HbnbError::Unauthorized
    })?;

    Ok(AuthUser {
        user_id: decoded.claims.sub,
        is_admin: decoded.claims.is_admin,
    })
}

/// Mint a short-lived token for the seed binary and the test suite.
/// Not wired to any endpoint.
pub fn mint_token(
    secret: &str,
    user_id: &str,
    is_admin: bool,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        is_admin,
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
