use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use skybook_core::user::{Permission, UserRole};
use skybook_workflow::Authenticated;

use crate::error::AppError;
use crate::state::{AppState, AuthConfig};

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub exp: usize,
}

/// Sign an access token for a user that just logged in
pub fn issue_token(auth: &AuthConfig, login: &Authenticated) -> Result<String, AppError> {
    let claims = Claims {
        sub: login.user.id.to_string(),
        email: login.user.email.clone(),
        role: login.user.role,
        permissions: login.permissions.clone(),
        exp: token_expiry(auth.expiration)?,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::Anyhow(anyhow::anyhow!("Token encoding failed: {}", e)))
}

/// Unix timestamp `expiration` seconds from now. Lifetimes chrono cannot represent are an error.
fn token_expiry(expiration: u64) -> Result<usize, AppError> {
    let out_of_range =
        || AppError::Anyhow(anyhow::anyhow!("Token expiry of {}s is out of range", expiration));

    let lifetime = i64::try_from(expiration)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(out_of_range)?;
    let expires_at = Utc::now()
        .checked_add_signed(lifetime)
        .ok_or_else(out_of_range)?;

    usize::try_from(expires_at.timestamp()).map_err(|_| out_of_range())
}

fn bearer_claims(req: &Request, auth: &AuthConfig) -> Result<Claims, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::AuthenticationError("Invalid or expired token".to_string()))
}

// ============================================================================
// Admin Authentication Middleware
// ============================================================================

pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = bearer_claims(&req, &state.auth)?;

    if claims.role != UserRole::Admin {
        return Err(AppError::AuthorizationError(
            "Admin access required".to_string(),
        ));
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

// ============================================================================
// Permission Check Helper
// ============================================================================

pub fn has_permission(claims: &Claims, permission: Permission) -> bool {
    claims.permissions.iter().any(|p| p == permission.as_str())
}

/// Fail with 403 unless the token carries `permission`
pub fn require_permission(claims: &Claims, permission: Permission) -> Result<(), AppError> {
    if has_permission(claims, permission) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError(format!(
            "Missing permission {}",
            permission.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skybook_workflow::UserView;

    fn config() -> AuthConfig {
        AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        }
    }

    fn admin_login(permissions: Vec<String>) -> Authenticated {
        Authenticated {
            user: UserView {
                id: 2,
                email: "admin@skybook.com".to_string(),
                name: "Admin User (Admin)".to_string(),
                role: UserRole::Admin,
                location: None,
            },
            permissions,
        }
    }

    #[test]
    fn test_issued_token_decodes() {
        let token = issue_token(&config(), &admin_login(vec!["MANAGE_FLIGHTS".to_string()])).unwrap();
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.sub, "2");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(has_permission(&claims, Permission::ManageFlights));
        assert!(!has_permission(&claims, Permission::ManageUsers));
        assert!(require_permission(&claims, Permission::ManageUsers).is_err());
    }

    #[test]
    fn test_huge_expiration_is_an_error() {
        let auth = AuthConfig {
            secret: "test-secret".to_string(),
            expiration: u64::MAX,
        };
        assert!(matches!(
            issue_token(&auth, &admin_login(vec![])),
            Err(AppError::Anyhow(_))
        ));

        // Representable as i64 seconds, but past chrono's date range
        let auth = AuthConfig {
            expiration: i64::MAX as u64,
            ..auth
        };
        assert!(matches!(
            issue_token(&auth, &admin_login(vec![])),
            Err(AppError::Anyhow(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(&config(), &admin_login(vec![])).unwrap();
        let req = axum::http::Request::builder()
            .header("Authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let other = AuthConfig {
            secret: "another-secret".to_string(),
            expiration: 3600,
        };
        assert!(bearer_claims(&req, &config()).is_ok());
        assert!(matches!(
            bearer_claims(&req, &other),
            Err(AppError::AuthenticationError(_))
        ));
    }
}
