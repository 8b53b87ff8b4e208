use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped speaker/text pair ingested from a live transcript feed.
///
/// `timestamp` is client-supplied microseconds since the Unix epoch. The
/// field names mirror the wire format pushed by the transcription client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub user_name: String,
    pub data: String,
    pub timestamp: i64,
}

/// A generated multiple-choice question before it has been persisted.
///
/// `answer` is the correct option letter, one of `A`..`D`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub answer: String,
}

/// A quiz item as stored in the `mcqs` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct QuizItem {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}
