use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::repo_types::{Feedback, NewFeedback};

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn insert(&self, new: NewFeedback) -> Result<Feedback, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Feedback>, AppError>;
    /// Most recent feedback generated for an interview.
    async fn find_latest_by_interview(&self, interview_id: Uuid)
        -> Result<Option<Feedback>, AppError>;
}

const COLUMNS: &str = "id, interview_id, user_id, total_score, category_scores, strengths, \
                       areas_for_improvement, final_assessment, created_at";

#[derive(Clone)]
pub struct PgFeedbackStore {
    db: PgPool,
}

impl PgFeedbackStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn insert(&self, new: NewFeedback) -> Result<Feedback, AppError> {
        let card = new.scorecard;
        let sql = format!(
            r#"
            INSERT INTO feedback
                (interview_id, user_id, total_score, category_scores, strengths,
                 areas_for_improvement, final_assessment)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Feedback>(&sql)
            .bind(new.interview_id)
            .bind(new.user_id)
            .bind(card.total_score)
            .bind(Json(&card.category_scores))
            .bind(&card.strengths)
            .bind(&card.areas_for_improvement)
            .bind(&card.final_assessment)
            .fetch_one(&self.db)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Feedback>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM feedback WHERE id = $1");
        let row = sqlx::query_as::<_, Feedback>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }

    async fn find_latest_by_interview(
        &self,
        interview_id: Uuid,
    ) -> Result<Option<Feedback>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM feedback
            WHERE interview_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#
        );
        let row = sqlx::query_as::<_, Feedback>(&sql)
            .bind(interview_id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }
}
