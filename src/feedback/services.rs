use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::{
    dto::TranscriptEntry,
    repo::FeedbackStore,
    repo_types::{Feedback, NewFeedback},
    scoring::generate_scorecard,
};
use crate::interviews::repo::InterviewStore;
use crate::llm::GenerativeModel;

fn feedback_not_found() -> AppError {
    AppError::NotFound("Feedback not found".into())
}

/// Scores a transcript and stores the result. The interview must exist, and
/// nothing is written unless the model's answer passes validation.
pub async fn generate_feedback(
    interviews: &dyn InterviewStore,
    store: &dyn FeedbackStore,
    model: &dyn GenerativeModel,
    user_id: Uuid,
    interview_id: Uuid,
    transcript: &[TranscriptEntry],
) -> Result<Feedback, AppError> {
    if interviews.find_by_id(interview_id).await?.is_none() {
        return Err(AppError::NotFound("Interview not found".into()));
    }

    let scorecard = generate_scorecard(model, transcript).await?;
    let feedback = store
        .insert(NewFeedback {
            interview_id,
            user_id,
            scorecard,
        })
        .await?;

    info!(
        feedback_id = %feedback.id,
        interview_id = %interview_id,
        total_score = feedback.total_score,
        "feedback generated"
    );
    Ok(feedback)
}

pub async fn get_feedback(store: &dyn FeedbackStore, raw_id: &str) -> Result<Feedback, AppError> {
    let id = raw_id.trim().parse::<Uuid>().map_err(|_| feedback_not_found())?;
    store.find_by_id(id).await?.ok_or_else(feedback_not_found)
}

pub async fn get_for_interview(
    store: &dyn FeedbackStore,
    raw_interview_id: &str,
) -> Result<Feedback, AppError> {
    let id = raw_interview_id
        .trim()
        .parse::<Uuid>()
        .map_err(|_| feedback_not_found())?;
    store
        .find_latest_by_interview(id)
        .await?
        .ok_or_else(feedback_not_found)
}
