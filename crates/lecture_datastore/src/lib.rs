//! # DataStore Module
//!
//! This module provides functionality for persisting lecture transcript
//! utterances and generated multiple-choice quiz items in a local SQLite
//! database.
//!
//! The module uses sqlx for database operations and provides an abstraction
//! layer (`DataStore`) over the transcript log and quiz tables, plus a
//! `QuizSink` abstraction for best-effort mirroring of quiz items to a
//! remote store.

mod datastore;
mod domain;

pub use datastore::sqlite::SqliteDataStore;
pub use datastore::supabase::SupabaseQuizSink;
pub use datastore::{DataStore, QuizSink};
pub use domain::{QuizDraft, QuizItem, Utterance};
