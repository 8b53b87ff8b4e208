use std::str::FromStr;

use anyhow::Context;
use chrono::Utc;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{datastore::DataStore, QuizDraft, QuizItem, Utterance};

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, Clone)]
pub struct SqliteDataStore {
    pub pool: SqlitePool,
}

impl SqliteDataStore {
    /// Establish connection to the database, creating the file and the
    /// transcript/quiz tables if they do not exist yet.
    pub async fn init(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context("Invalid sqlite database URL")?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .inspect_err(
                |e| tracing::error!(error = ?e, "Failed to establish connection to database"),
            )
            .context("Failed to connect to sqlite database")?;

        MIGRATOR
            .run(&pool)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to run database migrations"))
            .context("Failed to run database migrations")?;

        Ok(SqliteDataStore { pool })
    }
}

impl DataStore for SqliteDataStore {
    async fn append_transcript(&self, utterance: &Utterance) -> anyhow::Result<()> {
        let content_json =
            serde_json::to_string(utterance).context("Failed to serialize utterance")?;

        sqlx::query("INSERT INTO transcripts (content_json, timestamp) VALUES (?1, ?2)")
            .bind(&content_json)
            .bind(utterance.timestamp)
            .execute(&self.pool)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = ?e,
                    user_name = %utterance.user_name,
                    "Failed to append utterance to transcript log"
                )
            })
            .context("Failed to append utterance to transcript log")?;

        Ok(())
    }

    async fn insert_quiz(&self, quiz: &QuizDraft) -> anyhow::Result<QuizItem> {
        let item = sqlx::query_as::<_, QuizItem>(
            r#"
            INSERT INTO mcqs (question, option_a, option_b, option_c, option_d, answer, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id, question, option_a, option_b, option_c, option_d, answer, created_at
            "#,
        )
        .bind(&quiz.question)
        .bind(&quiz.option_a)
        .bind(&quiz.option_b)
        .bind(&quiz.option_c)
        .bind(&quiz.option_d)
        .bind(&quiz.answer)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "Failed to insert quiz item"))
        .context("Failed to insert quiz item")?;

        Ok(item)
    }

    async fn latest_quiz(&self) -> anyhow::Result<Option<QuizItem>> {
        let item = sqlx::query_as::<_, QuizItem>(
            r#"
            SELECT id, question, option_a, option_b, option_c, option_d, answer, created_at
            FROM mcqs
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "Failed to fetch latest quiz item"))
        .context("Failed to fetch latest quiz item")?;

        Ok(item)
    }
}
