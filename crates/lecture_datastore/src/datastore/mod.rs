use std::future::Future;

pub mod sqlite;
pub mod supabase;

use crate::{QuizDraft, QuizItem, Utterance};

/// Primary durable store for the transcript log and generated quiz items.
pub trait DataStore {
    fn append_transcript(
        &self,
        utterance: &Utterance,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn insert_quiz(
        &self,
        quiz: &QuizDraft,
    ) -> impl Future<Output = anyhow::Result<QuizItem>> + Send;

    fn latest_quiz(&self) -> impl Future<Output = anyhow::Result<Option<QuizItem>>> + Send;
}

/// Secondary store that quiz items are mirrored to after the primary write.
///
/// Sink failures are the caller's to log; they must never fail the primary
/// write.
pub trait QuizSink {
    fn push_quiz(&self, quiz: &QuizDraft) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// No-op sink for deployments without a remote store configured.
impl QuizSink for () {
    async fn push_quiz(&self, _quiz: &QuizDraft) -> anyhow::Result<()> {
        Ok(())
    }
}
