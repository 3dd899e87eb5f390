use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::repo_types::{Interview, NewInterview};

#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn insert(&self, new: NewInterview) -> Result<Interview, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Interview>, AppError>;
    /// Newest first.
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Interview>, AppError>;
    /// Public interviews, minus those created by `exclude` when given; newest first.
    async fn list_public(&self, exclude: Option<Uuid>) -> Result<Vec<Interview>, AppError>;
}

const COLUMNS: &str = "id, created_by, job_role, experience_level, tech_stack, interview_type, \
                       number_of_questions, questions, is_public, created_at";

#[derive(Clone)]
pub struct PgInterviewStore {
    db: PgPool,
}

impl PgInterviewStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn insert(&self, new: NewInterview) -> Result<Interview, AppError> {
        let sql = format!(
            r#"
            INSERT INTO interviews
                (created_by, job_role, experience_level, tech_stack, interview_type,
                 number_of_questions, questions, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Interview>(&sql)
            .bind(new.created_by)
            .bind(&new.job_role)
            .bind(new.experience_level)
            .bind(&new.tech_stack)
            .bind(new.interview_type)
            .bind(new.number_of_questions)
            .bind(&new.questions)
            .bind(new.is_public)
            .fetch_one(&self.db)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Interview>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM interviews WHERE id = $1");
        let row = sqlx::query_as::<_, Interview>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Interview>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM interviews WHERE created_by = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, Interview>(&sql)
            .bind(owner)
            .fetch_all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn list_public(&self, exclude: Option<Uuid>) -> Result<Vec<Interview>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM interviews
            WHERE is_public AND ($1::uuid IS NULL OR created_by <> $1)
            ORDER BY created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, Interview>(&sql)
            .bind(exclude)
            .fetch_all(&self.db)
            .await?;
        Ok(rows)
    }
}
