#![allow(dead_code)]

pub mod datastore;
pub mod quiz_generator;
pub mod sink;
pub mod summarizer;
