use std::sync::{Arc, Mutex};

use lecture_datastore::{QuizDraft, QuizSink};

#[derive(Clone, Default)]
pub struct MockQuizSink {
    pub pushed: Arc<Mutex<Vec<QuizDraft>>>,
    pub fail_with: Option<String>,
}

impl MockQuizSink {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl QuizSink for MockQuizSink {
    async fn push_quiz(&self, quiz: &QuizDraft) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.pushed.lock().unwrap().push(quiz.clone());
        Ok(())
    }
}
