//! Login verification and access-token issuance.
//!
//! Passwords are stored as Argon2id PHC strings with a random salt and
//! verified in constant time; access tokens are HS256-signed JWTs. A failed
//! lookup and a failed verification are indistinguishable on the wire.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{AuthUser, LoginResponse, UserRecord};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's database id.
    pub sub: i32,
    /// The user's display name.
    pub ad: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier for audit.
    pub jti: String,
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (algorithm, params, salt, and hash
/// embedded together).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash invalid: {}", e)))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::InternalError(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Issue an HS256 access token for the given user.
pub fn issue_token(user: &AuthUser, config: &Config) -> Result<String, AppError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        ad: user.ad.clone(),
        exp: now + config.token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token signing failed: {}", e)))
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Signature and expiration are checked; an invalid token maps to
/// `InvalidCredentials`.
pub fn validate_token(token: &str, config: &Config) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidCredentials)
}

/// Look up a user by username, verify the password, and issue a token.
///
/// Both an unknown username and a wrong password produce
/// `InvalidCredentials`; the caller cannot tell them apart.
pub async fn login(
    pool: &PgPool,
    config: &Config,
    username: &str,
    password: &str,
) -> Result<LoginResponse, AppError> {
    let record = sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, ad, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(password, &record.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let user = AuthUser {
        id: record.id,
        username: record.username,
        ad: record.ad,
    };
    let token = issue_token(&user, config)?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(LoginResponse { user, token })
}

/// Seed the admin user from configuration if it does not exist yet.
///
/// Idempotent: an existing username is left untouched, so a restart never
/// overwrites a rotated password.
pub async fn seed_admin(pool: &PgPool, config: &Config) -> anyhow::Result<()> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        return Ok(());
    };

    let hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let inserted = sqlx::query(
        "INSERT INTO users (username, ad, password_hash) VALUES ($1, $2, $3) \
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(username)
    .bind(hash)
    .execute(pool)
    .await?;

    if inserted.rows_affected() > 0 {
        tracing::info!(%username, "Admin user seeded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/test".to_string(),
            port: 5000,
            jwt_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_expiry_mins: 480,
            admin_username: None,
            admin_password: None,
        }
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("galeri-2026").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(verify_password("galeri-2026", &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn token_roundtrip_preserves_claims() {
        let config = test_config();
        let user = AuthUser {
            id: 7,
            username: "mehmet".to_string(),
            ad: "Mehmet".to_string(),
        };

        let token = issue_token(&user, &config).expect("token issuance should succeed");
        let claims = validate_token(&token, &config).expect("token should validate");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.ad, "Mehmet");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn token_signed_with_other_secret_rejected() {
        let config_a = test_config();
        let mut config_b = test_config();
        config_b.jwt_secret = "a-different-secret-entirely".to_string();

        let user = AuthUser {
            id: 1,
            username: "ali".to_string(),
            ad: "Ali".to_string(),
        };
        let token = issue_token(&user, &config_a).unwrap();
        assert!(matches!(
            validate_token(&token, &config_b),
            Err(AppError::InvalidCredentials)
        ));
    }
}
