use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    api::{ok, ApiJson, Envelope},
    auth::{
        dto::{LoginRequest, PublicUser, RegisterRequest, SessionUser, UserPayload},
        extractors::AuthUser,
        jwt::JwtKeys,
        services,
    },
    errors::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Json<Envelope<UserPayload<SessionUser>>>, AppError> {
    let account = payload.validate()?;
    let keys = JwtKeys::from_ref(&state);
    let user = services::register(state.users.as_ref(), &keys, account).await?;
    Ok(ok("User Registered Successfully", UserPayload { user }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<Envelope<UserPayload<SessionUser>>>, AppError> {
    let creds = payload.validate()?;
    let keys = JwtKeys::from_ref(&state);
    let user = services::login(state.users.as_ref(), &keys, creds).await?;
    Ok(ok("User Logged In Successfully", UserPayload { user }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Envelope<UserPayload<PublicUser>>>, AppError> {
    let user = services::me(state.users.as_ref(), user_id).await?;
    Ok(ok(
        "Fetched User Successfully",
        UserPayload {
            user: PublicUser::from(user),
        },
    ))
}
