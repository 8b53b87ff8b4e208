use anyhow::Context;
use reqwest::Client;

use crate::{datastore::QuizSink, QuizDraft};

/// Remote mirror of the `mcqs` table, written via the Supabase REST API.
///
/// The remote table has the same shape as the local one; writes here are
/// independent of the local insert and carry no transactional guarantee.
#[derive(Debug, Clone)]
pub struct SupabaseQuizSink {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseQuizSink {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl QuizSink for SupabaseQuizSink {
    async fn push_quiz(&self, quiz: &QuizDraft) -> anyhow::Result<()> {
        let url = format!("{}/rest/v1/mcqs", self.base_url.trim_end_matches('/'));

        let resp = self
            .client
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(quiz)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to reach remote quiz store"))
            .context("Failed to reach remote quiz store")?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            anyhow::bail!("Remote quiz store rejected insert: {status} - {message}");
        }

        Ok(())
    }
}
