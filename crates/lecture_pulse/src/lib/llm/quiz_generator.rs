use std::{fmt::Debug, future::Future};

/// Second stage of the generation chain: turns an already-condensed summary
/// into the model's raw quiz reply.
///
/// Implementations return the reply text verbatim; tolerant JSON extraction
/// happens in [`crate::llm::extract`] so it stays unit-testable away from
/// the network.
pub trait QuizGenerator {
    const QUIZ_MODEL: &'static str;

    type Error: Debug;

    fn generate_quiz_reply(
        &self,
        summary: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
