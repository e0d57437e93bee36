use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by inbound user tokens and outbound service tokens. User
/// tokens are minted by the auth service; only the fields the gateway reads
/// are typed, everything else passes through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub jti: String,
    #[serde(default)]
    pub service: bool,
}

/// Verify signature and expiry, returning the parsed claims.
pub fn validate_token(token: &str, key: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(key.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Mint a short-lived machine-to-machine token for calls the gateway makes to
/// pools on its own behalf (filter refresh).
pub fn mint_service_token(key: &str, ttl: Duration) -> Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        sub: "search-gateway".to_string(),
        exp: now + ttl.as_secs(),
        jti: uuid::Uuid::new_v4().to_string(),
        service: true,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )?;
    Ok(token)
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    let mut parts = authorization.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}
