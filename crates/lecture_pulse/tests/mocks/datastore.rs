use std::sync::{Arc, Mutex};

use chrono::Utc;
use lecture_datastore::{DataStore, QuizDraft, QuizItem, Utterance};

#[derive(Clone, Default)]
pub struct MockDataStore {
    pub inserted: Arc<Mutex<Vec<QuizItem>>>,
    pub transcript_log: Arc<Mutex<Vec<Utterance>>>,
    pub fail_with: Option<String>,
}

impl MockDataStore {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl DataStore for MockDataStore {
    async fn append_transcript(&self, utterance: &Utterance) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.transcript_log.lock().unwrap().push(utterance.clone());
        Ok(())
    }

    async fn insert_quiz(&self, quiz: &QuizDraft) -> anyhow::Result<QuizItem> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }

        let mut inserted = self.inserted.lock().unwrap();
        let item = QuizItem {
            id: inserted.len() as i64 + 1,
            question: quiz.question.clone(),
            option_a: quiz.option_a.clone(),
            option_b: quiz.option_b.clone(),
            option_c: quiz.option_c.clone(),
            option_d: quiz.option_d.clone(),
            answer: quiz.answer.clone(),
            created_at: Utc::now(),
        };
        inserted.push(item.clone());
        Ok(item)
    }

    async fn latest_quiz(&self) -> anyhow::Result<Option<QuizItem>> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.inserted.lock().unwrap().last().cloned())
    }
}
