use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::{info, warn};

use insight_types::api::{
    AuthResponse, Claims, LoginRequest, MessageResponse, RegisterRequest, UserProfile,
};
use insight_types::models::{Id, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Token lifetime: one week.
const TOKEN_TTL_DAYS: i64 = 7;

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate input
    if req.username.len() < 3 || req.username.len() > 32 {
        return Err(ApiError::BadRequest(
            "Username must be between 3 and 32 characters".into(),
        ));
    }
    if req.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters".into(),
        ));
    }

    // Hashing is CPU-bound; keep it and the store calls off the runtime.
    let users = state.users.clone();
    let user = tokio::task::spawn_blocking(move || -> Result<User, ApiError> {
        if users.get_user_by_username(&req.username)?.is_some() {
            return Err(ApiError::Conflict("Username already exists".into()));
        }
        let password_hash = hash_password(&req.password)?;
        Ok(users.create_user(&req.username, &password_hash)?)
    })
    .await??;

    info!(user_id = user.id, "User registered");
    let response = auth_response(&state.jwt_secret, user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.users.clone();
    let user = tokio::task::spawn_blocking(move || -> Result<User, ApiError> {
        let Some(user) = users.get_user_by_username(&req.username)? else {
            warn!("Login failed: unknown username");
            return Err(ApiError::Unauthorized);
        };
        if !verify_password(&req.password, &user.password)? {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(ApiError::Unauthorized);
        }
        Ok(user)
    })
    .await??;

    info!(user_id = user.id, "User logged in");
    Ok(Json(auth_response(&state.jwt_secret, user)?))
}

/// Tokens are stateless, so logging out is the client dropping its token.
pub async fn logout(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    info!(user_id = claims.sub, "User logged out");
    Json(MessageResponse {
        message: "Logged out successfully".into(),
    })
}

pub async fn current_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.users.clone();
    let user = tokio::task::spawn_blocking(move || users.get_user(claims.sub))
        .await??
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(UserProfile {
        id: user.id,
        username: user.username,
    }))
}

fn auth_response(secret: &str, user: User) -> Result<AuthResponse, ApiError> {
    let token = create_token(secret, user.id, &user.username)?;
    Ok(AuthResponse {
        user: UserProfile {
            id: user.id,
            username: user.username,
        },
        token,
    })
}

pub fn create_token(secret: &str, user_id: Id, username: &str) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token encoding failed: {e}")))
}

/// Hash with Argon2id and a random salt.
fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|e| ApiError::Internal(format!("stored password hash is invalid: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
