use std::sync::Arc;

use clap::Parser;
use lecture_datastore::{SqliteDataStore, SupabaseQuizSink};
use lecture_pulse::{
    server::{self, AppState},
    tracing::init_tracing_subscriber,
    GeminiClient, QuizPipeline, QuizPipelineBuilder,
};

#[derive(Parser)]
#[command(name = "lecture-pulse", about = "Live lecture transcript to quiz server")]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "5000")]
    port: u16,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://mcq.db")]
    database_url: String,

    /// Gemini API key; generation endpoints are disabled when absent
    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_api_key: Option<String>,

    /// Supabase project URL for the remote quiz mirror
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: Option<String>,

    /// Supabase anon key for the remote quiz mirror
    #[arg(long, env = "SUPABASE_ANON_KEY")]
    supabase_key: Option<String>,

    /// Auto-generation interval in minutes
    #[arg(long, env = "QUIZ_INTERVAL_MINUTES", default_value = "10")]
    quiz_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let store = SqliteDataStore::init(&cli.database_url).await?;

    let pipeline: Option<QuizPipeline<_, GeminiClient, GeminiClient, SupabaseQuizSink>> =
        match cli.gemini_api_key {
            Some(api_key) => {
                let gemini = GeminiClient::new(api_key)?;

                let remote_sink = match (cli.supabase_url, cli.supabase_key) {
                    (Some(url), Some(key)) => Some(SupabaseQuizSink::new(url, key)),
                    _ => {
                        tracing::info!("Supabase not configured, quiz items stay local only");
                        None
                    }
                };

                Some(
                    QuizPipelineBuilder::new()
                        .store(store.clone())
                        .summarizer(gemini.clone())
                        .generator(gemini)
                        .remote_sink(remote_sink)
                        .build(),
                )
            }
            None => {
                tracing::warn!(
                    "GEMINI_API_KEY not set, summary and quiz generation endpoints are disabled"
                );
                None
            }
        };

    let state = Arc::new(AppState::new(store, pipeline, cli.quiz_interval));

    server::serve(&cli.bind, cli.port, state).await
}
