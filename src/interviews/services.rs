use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::{
    dto::InterviewSpec,
    questions::generate_questions,
    repo::InterviewStore,
    repo_types::{Interview, NewInterview},
};
use crate::llm::GenerativeModel;

/// Generates the questions first; nothing is stored unless they parse.
pub async fn generate_interview(
    store: &dyn InterviewStore,
    model: &dyn GenerativeModel,
    owner: Uuid,
    spec: InterviewSpec,
) -> Result<Interview, AppError> {
    let questions = generate_questions(model, &spec).await?;

    let interview = store
        .insert(NewInterview {
            created_by: owner,
            job_role: spec.job_role,
            experience_level: spec.experience_level,
            tech_stack: spec.tech_stack,
            interview_type: spec.interview_type,
            number_of_questions: spec.number_of_questions as i32,
            questions,
            is_public: spec.is_public,
        })
        .await?;

    info!(
        interview_id = %interview.id,
        owner = %owner,
        questions = interview.questions.len(),
        "interview generated"
    );
    Ok(interview)
}

/// Malformed ids cannot name a stored interview, so they are reported as not found.
pub async fn get_interview(store: &dyn InterviewStore, raw_id: &str) -> Result<Interview, AppError> {
    let not_found = || AppError::NotFound("Interview not found".into());
    let id = raw_id.trim().parse::<Uuid>().map_err(|_| not_found())?;
    store.find_by_id(id).await?.ok_or_else(not_found)
}

pub async fn list_for_owner(
    store: &dyn InterviewStore,
    owner: Uuid,
) -> Result<Vec<Interview>, AppError> {
    store.list_by_owner(owner).await
}

/// Public interviews of other users; everything public when no user is given.
pub async fn list_excluding_owner(
    store: &dyn InterviewStore,
    owner: Option<Uuid>,
) -> Result<Vec<Interview>, AppError> {
    store.list_public(owner).await
}
