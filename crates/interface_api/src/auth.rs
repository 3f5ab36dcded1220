//! Authentication and authorization
//!
//! Session issuance lives with the external identity provider; this module
//! only validates bearer tokens and maps claims to roles.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(String),
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `email` - User's email address
/// * `roles` - User's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: &str,
    email: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Checks if user has required role
pub fn has_role(claims: &Claims, required_role: &str) -> bool {
    claims.roles.iter().any(|r| r == required_role || r == "admin")
}

/// Permission definitions
pub mod permissions {
    pub const LEAD_READ: &str = "lead:read";
    pub const LEAD_WRITE: &str = "lead:write";
    pub const QUOTATION_READ: &str = "quotation:read";
    pub const QUOTATION_WRITE: &str = "quotation:write";
    pub const PROFILE_READ: &str = "profile:read";
    pub const PROFILE_WRITE: &str = "profile:write";
    pub const AGENCY_WRITE: &str = "agency:write";
    pub const CONTENT_WRITE: &str = "content:write";
    pub const CAMPAIGN_WRITE: &str = "campaign:write";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = create_token(
            "user-1",
            "staff@agency.pk",
            vec!["agency_staff".to_string()],
            "test-secret",
            3600,
        )
        .unwrap();

        let claims = validate_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "staff@agency.pk");
        assert!(has_role(&claims, "agency_staff"));
        assert!(!has_role(&claims, "counselor"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("user-1", "a@b.c", vec![], "secret-a", 3600).unwrap();
        assert!(matches!(
            validate_token(&token, "secret-b"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_admin_passes_any_role_check() {
        let token = create_token("root", "admin@hq.pk", vec!["admin".to_string()], "s", 60).unwrap();
        let claims = validate_token(&token, "s").unwrap();
        assert!(has_role(&claims, "counselor"));
    }
}
