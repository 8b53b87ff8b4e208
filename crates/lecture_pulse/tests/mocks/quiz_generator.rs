use std::sync::{Arc, Mutex};

use lecture_pulse::QuizGenerator;

#[derive(Clone)]
pub struct MockQuizGenerator {
    pub reply: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockQuizGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            reply: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl QuizGenerator for MockQuizGenerator {
    const QUIZ_MODEL: &'static str = "mock-quiz-generator";

    type Error = anyhow::Error;

    async fn generate_quiz_reply(&self, summary: &str) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(summary.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.reply.clone())
    }
}
