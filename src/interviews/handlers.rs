use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    api::{ok, ApiJson, Envelope},
    auth::extractors::AuthUser,
    errors::AppError,
    interviews::{
        dto::{GenerateInterviewRequest, InterviewPayload, InterviewsPayload, OtherInterviewsRequest},
        services,
    },
    state::AppState,
};

pub fn interview_routes() -> Router<AppState> {
    Router::new()
        .route("/interview/generateInterview", post(generate_interview))
        .route("/interview/getUserInterviews", get(list_user_interviews))
        .route("/interview/getAll", post(list_other_interviews))
        .route("/interview/:id", get(get_interview))
}

#[instrument(skip(state, payload))]
pub async fn generate_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<GenerateInterviewRequest>,
) -> Result<Json<Envelope<InterviewPayload>>, AppError> {
    let spec = payload.validate(user_id)?;
    let interview = services::generate_interview(
        state.interviews.as_ref(),
        state.model.as_ref(),
        user_id,
        spec,
    )
    .await?;
    Ok(ok("Interview created successfully", InterviewPayload { interview }))
}

#[instrument(skip(state))]
pub async fn get_interview(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Envelope<InterviewPayload>>, AppError> {
    let interview = services::get_interview(state.interviews.as_ref(), &id).await?;
    Ok(ok("Fetched Interview Successfully", InterviewPayload { interview }))
}

#[instrument(skip(state))]
pub async fn list_user_interviews(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Envelope<InterviewsPayload>>, AppError> {
    let interviews = services::list_for_owner(state.interviews.as_ref(), user_id).await?;
    Ok(ok(
        "Fetched User Interviews Successfully",
        InterviewsPayload { interviews },
    ))
}

#[instrument(skip(state, payload))]
pub async fn list_other_interviews(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<OtherInterviewsRequest>,
) -> Result<Json<Envelope<InterviewsPayload>>, AppError> {
    let owner = payload.validate()?;
    let interviews = services::list_excluding_owner(state.interviews.as_ref(), owner).await?;
    Ok(ok("Fetched Interviews Successfully", InterviewsPayload { interviews }))
}
