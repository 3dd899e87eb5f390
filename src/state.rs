use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::repo::{PgUserStore, UserStore};
use crate::config::AppConfig;
use crate::feedback::repo::{FeedbackStore, PgFeedbackStore};
use crate::interviews::repo::{InterviewStore, PgInterviewStore};
use crate::llm::{GeminiClient, GenerativeModel};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub interviews: Arc<dyn InterviewStore>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub model: Arc<dyn GenerativeModel>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let db = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let model = Arc::new(GeminiClient::new(&config.gemini)?) as Arc<dyn GenerativeModel>;

        Ok(Self {
            users: Arc::new(PgUserStore::new(db.clone())),
            interviews: Arc::new(PgInterviewStore::new(db.clone())),
            feedback: Arc::new(PgFeedbackStore::new(db.clone())),
            db,
            config,
            model,
        })
    }

    pub fn from_parts(
        db: PgPool,
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        interviews: Arc<dyn InterviewStore>,
        feedback: Arc<dyn FeedbackStore>,
        model: Arc<dyn GenerativeModel>,
    ) -> Self {
        Self {
            db,
            config,
            users,
            interviews,
            feedback,
            model,
        }
    }

    /// Waits for in-flight queries, then closes the pool.
    pub async fn shutdown(&self) {
        self.db.close().await;
        tracing::info!("database pool closed");
    }
}
