use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::llm::{QuizGenerator, SamplingParams, Summarizer, SummaryResponse};

/// Client for the Gemini `generateContent` API, covering both stages of the
/// generation chain (summarize, then quiz authoring).
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Reply contained no usable text")]
    EmptyReply,
}

impl GeminiClient {
    const SUMMARIZE_PROMPT: &str = include_str!("./prompts/summarize_0.txt");
    const MCQ_PROMPT: &str = include_str!("./prompts/mcq_0.txt");

    // Bounds how long a single backend call can hold a generation cycle.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        Ok(Self {
            client: Client::builder().timeout(Self::REQUEST_TIMEOUT).build()?,
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_generate_request(
        &self,
        model_name: &str,
        prompt: impl Into<String>,
        generation_config: serde_json::Value,
    ) -> Result<String, GeminiError> {
        let body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt.into() }
                    ]
                }
            ],
            "generationConfig": generation_config,
        });

        let resp = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, model_name
            ))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, message });
        }

        let response = resp.json::<GenerateContentResponse>().await?;

        response.first_text().ok_or(GeminiError::EmptyReply)
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ContentPart>>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .find_map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
    }
}

impl Summarizer for GeminiClient {
    const SUMMARIZER_MODEL: &'static str = "gemini-1.5-flash";

    type Error = GeminiError;

    async fn summarize(
        &self,
        transcript: &str,
        params: &SamplingParams,
    ) -> Result<SummaryResponse, Self::Error> {
        let prompt = format!("{}\n\n{}", Self::SUMMARIZE_PROMPT.trim(), transcript);
        let generation_config = serde_json::json!({
            "temperature": params.temperature,
            "topP": params.top_p,
            "topK": params.top_k,
            "maxOutputTokens": params.max_output_tokens,
        });

        let summary = self
            .send_generate_request(Self::SUMMARIZER_MODEL, prompt, generation_config)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize transcript"))?;

        Ok(SummaryResponse { summary })
    }
}

impl QuizGenerator for GeminiClient {
    const QUIZ_MODEL: &'static str = "gemini-1.5-flash";

    type Error = GeminiError;

    async fn generate_quiz_reply(&self, summary: &str) -> Result<String, Self::Error> {
        let prompt = format!(
            "{}\n\nText: \"\"\"{}\"\"\"",
            Self::MCQ_PROMPT.trim(),
            summary
        );

        self.send_generate_request(Self::QUIZ_MODEL, prompt, serde_json::json!({}))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate quiz reply"))
    }
}
