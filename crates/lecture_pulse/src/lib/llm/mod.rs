pub mod extract;
mod gemini;
mod quiz_generator;
mod summarizer;

pub use gemini::{GeminiClient, GeminiError};
pub use quiz_generator::QuizGenerator;
pub use summarizer::{SamplingParams, Summarizer, SummaryResponse};
