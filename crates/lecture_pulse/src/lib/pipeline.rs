pub mod builder;

use lecture_datastore::{DataStore, QuizItem, QuizSink};

use crate::{
    llm::{extract, QuizGenerator, SamplingParams, Summarizer},
    Error,
};

/// Windows whose stripped text is shorter than this skip the generation
/// backend entirely; near-empty lectures are not worth a call.
pub const MIN_TRANSCRIPT_CHARS: usize = 50;

#[derive(Debug)]
pub enum SummaryOutcome {
    NotEnoughData,
    Summary(String),
}

#[derive(Debug)]
pub enum CycleOutcome {
    NotEnoughData,
    Stored(QuizItem),
}

/// The core transcript-to-quiz pipeline.
///
/// One `run_cycle` drives a full generation cycle: summarize the rendered
/// window, prompt for a quiz item, parse the reply, store it. Any stage
/// error ends the cycle; there is no automatic retry.
#[derive(Debug)]
pub struct QuizPipeline<D, S, Q, R>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    store: D,
    summarizer: S,
    generator: Q,
    remote_sink: Option<R>,
    sampling: SamplingParams,
}

impl<D, S, Q, R> QuizPipeline<D, S, Q, R>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    /// Summarizes the rendered transcript window, skipping the backend when
    /// there is not enough text to work with.
    #[tracing::instrument(skip_all)]
    pub async fn summarize(&self, transcript: &str) -> Result<SummaryOutcome, Error> {
        if transcript.trim().chars().count() < MIN_TRANSCRIPT_CHARS {
            tracing::info!("Transcript window below minimum length, skipping generation");
            return Ok(SummaryOutcome::NotEnoughData);
        }

        let response = self
            .summarizer
            .summarize(transcript, &self.sampling)
            .await
            .map_err(|e| Error::Generation(format!("{e:?}")))?;

        Ok(SummaryOutcome::Summary(response.summary))
    }

    /// Runs one full generation cycle over an already-rendered transcript
    /// window.
    ///
    /// The primary insert must succeed for the cycle to succeed; the remote
    /// sink write is independent and its failure is logged only.
    #[tracing::instrument(skip_all)]
    pub async fn run_cycle(&self, transcript: &str) -> Result<CycleOutcome, Error> {
        let summary = match self.summarize(transcript).await? {
            SummaryOutcome::NotEnoughData => return Ok(CycleOutcome::NotEnoughData),
            SummaryOutcome::Summary(summary) => summary,
        };

        let reply = self
            .generator
            .generate_quiz_reply(&summary)
            .await
            .map_err(|e| Error::Generation(format!("{e:?}")))?;

        let draft = extract::parse_quiz_payload(&reply)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to parse quiz reply"))?;

        let stored = self
            .store
            .insert_quiz(&draft)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to store quiz item"))
            .map_err(Error::Storage)?;

        if let Some(sink) = &self.remote_sink {
            if let Err(e) = sink.push_quiz(&draft).await {
                tracing::warn!(error = ?e, "Failed to mirror quiz item to remote store");
            }
        }

        tracing::info!(quiz_id = stored.id, "Stored generated quiz item");
        Ok(CycleOutcome::Stored(stored))
    }
}
