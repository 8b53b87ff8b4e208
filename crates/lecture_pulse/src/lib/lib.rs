mod error;
mod llm;
mod pipeline;
pub mod server;
pub mod tracing;
pub mod transcript;

pub use error::Error;
pub use llm::{
    extract, GeminiClient, GeminiError, QuizGenerator, SamplingParams, Summarizer, SummaryResponse,
};
pub use pipeline::{
    builder::QuizPipelineBuilder, CycleOutcome, QuizPipeline, SummaryOutcome, MIN_TRANSCRIPT_CHARS,
};
pub use transcript::TranscriptStore;
