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
    feedback::{
        dto::{FeedbackPayload, GenerateFeedbackRequest},
        services,
    },
    state::AppState,
};

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedback/generate", post(generate_feedback))
        .route("/feedback/get/:id", get(get_feedback))
        .route("/feedback/interview/:interview_id", get(get_interview_feedback))
}

#[instrument(skip(state, payload))]
pub async fn generate_feedback(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<GenerateFeedbackRequest>,
) -> Result<Json<Envelope<FeedbackPayload>>, AppError> {
    let input = payload.validate()?;
    let feedback = services::generate_feedback(
        state.interviews.as_ref(),
        state.feedback.as_ref(),
        state.model.as_ref(),
        user_id,
        input.interview_id,
        &input.transcript,
    )
    .await?;
    Ok(ok("Generated feedback successfully", FeedbackPayload { feedback }))
}

#[instrument(skip(state))]
pub async fn get_feedback(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Envelope<FeedbackPayload>>, AppError> {
    let feedback = services::get_feedback(state.feedback.as_ref(), &id).await?;
    Ok(ok("Fetched Feedback Successfully", FeedbackPayload { feedback }))
}

#[instrument(skip(state))]
pub async fn get_interview_feedback(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(interview_id): Path<String>,
) -> Result<Json<Envelope<FeedbackPayload>>, AppError> {
    let feedback = services::get_for_interview(state.feedback.as_ref(), &interview_id).await?;
    Ok(ok("Fetched Feedback Successfully", FeedbackPayload { feedback }))
}
