use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use snapchef_core::extract::AppJson;

use crate::error::ApiError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::auth::{
    AuthOutput, LoginInput, LoginUseCase, RefreshUseCase, SignupInput, SignupUseCase,
};

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

impl From<AuthOutput> for AuthResponse {
    fn from(out: AuthOutput) -> Self {
        Self {
            user: out.user.into(),
            access_token: out.tokens.access_token,
            refresh_token: out.tokens.refresh_token,
            token_type: "Bearer",
            expires_in: out.tokens.expires_in,
        }
    }
}

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    AppJson(body): AppJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let usecase = SignupUseCase {
        users: state.user_repo(),
        issuer: state.token_issuer(),
    };
    let out = usecase
        .execute(SignupInput {
            email: body.email,
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(out.into())))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        issuer: state.token_issuer(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(out.into()))
}

// ── POST /auth/refresh ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub async fn refresh(
    State(state): State<AppState>,
    AppJson(body): AppJson<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let usecase = RefreshUseCase {
        users: state.user_repo(),
        issuer: state.token_issuer(),
    };
    let out = usecase.execute(&body.refresh_token).await?;
    Ok(Json(out.into()))
}
