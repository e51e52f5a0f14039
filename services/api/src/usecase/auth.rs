use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use rand::RngExt;
use uuid::Uuid;

use snapchef_auth_types::token::{JwtClaims, TokenType, validate_token};
use snapchef_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::domain::validation;
use crate::error::ApiError;
use crate::password::{dummy_hash, spawn_hash, spawn_verify};

const JTI_LEN: usize = 32;
const JTI_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn generate_jti() -> String {
    let mut rng = rand::rng();
    (0..JTI_LEN)
        .map(|_| JTI_CHARSET[rng.random_range(0..JTI_CHARSET.len())] as char)
        .collect()
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Signs access/refresh pairs. Every token gets its own `jti`.
#[derive(Clone)]
pub struct TokenIssuer {
    pub secret: String,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

impl TokenIssuer {
    fn sign(&self, user: &User, typ: TokenType, ttl: u64) -> Result<String, ApiError> {
        let iat = now_secs();
        let claims = JwtClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            typ,
            jti: generate_jti(),
            iat,
            exp: iat + ttl,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(e.into()))
    }

    pub fn issue(&self, user: &User) -> Result<TokenPair, ApiError> {
        Ok(TokenPair {
            access_token: self.sign(user, TokenType::Access, self.access_ttl_secs)?,
            refresh_token: self.sign(user, TokenType::Refresh, self.refresh_ttl_secs)?,
            expires_in: self.access_ttl_secs,
        })
    }
}

#[derive(Debug)]
pub struct AuthOutput {
    pub user: User,
    pub tokens: TokenPair,
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub email: String,
    pub username: String,
    pub password: String,
}

pub struct SignupUseCase<U: UserRepository> {
    pub users: U,
    pub issuer: TokenIssuer,
}

impl<U: UserRepository> SignupUseCase<U> {
    pub async fn execute(&self, input: SignupInput) -> Result<AuthOutput, ApiError> {
        let email = validation::email(&input.email)?;
        let username = validation::username(&input.username)?;
        validation::password(&input.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(ApiError::UsernameTaken);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            username,
            password_hash: spawn_hash(input.password).await?,
            role: UserRole::User,
            avatar_url: None,
            bio: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "user signed up");

        let tokens = self.issuer.issue(&user)?;
        Ok(AuthOutput { user, tokens })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub issuer: TokenIssuer,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, ApiError> {
        let email = input.email.trim().to_lowercase();
        let user = self.users.find_by_email(&email).await?;
        // Unknown emails still pay for one verification.
        let stored = user
            .as_ref()
            .map_or_else(|| dummy_hash().to_owned(), |u| u.password_hash.clone());
        let verified = spawn_verify(input.password, stored).await;
        let user = match user {
            Some(user) if verified => user,
            _ => return Err(ApiError::InvalidCredentials),
        };
        if !user.is_active {
            return Err(ApiError::UserBanned);
        }
        let tokens = self.issuer.issue(&user)?;
        Ok(AuthOutput { user, tokens })
    }
}

// ── Refresh ──────────────────────────────────────────────────────────────────

pub struct RefreshUseCase<U: UserRepository> {
    pub users: U,
    pub issuer: TokenIssuer,
}

impl<U: UserRepository> RefreshUseCase<U> {
    /// Rotate: a valid refresh token buys a brand-new pair.
    pub async fn execute(&self, refresh_token: &str) -> Result<AuthOutput, ApiError> {
        let info = validate_token(refresh_token, &self.issuer.secret, TokenType::Refresh)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected refresh token");
                ApiError::InvalidRefreshToken
            })?;
        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .ok_or(ApiError::InvalidRefreshToken)?;
        if !user.is_active {
            return Err(ApiError::UserBanned);
        }
        let tokens = self.issuer.issue(&user)?;
        Ok(AuthOutput { user, tokens })
    }
}
