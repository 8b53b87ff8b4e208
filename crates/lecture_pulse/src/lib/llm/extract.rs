//! Tolerant extraction of a quiz payload from a model reply.
//!
//! Model replies routinely arrive wrapped in Markdown code fences and with
//! typographic quote characters. This module is a pure function over the
//! reply text so the cleanup rules can be unit-tested against malformed
//! fixtures without touching the network.

use std::sync::LazyLock;

use lecture_datastore::QuizDraft;
use regex::Regex;

static CODE_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?").expect("valid code fence regex"));

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("reply is missing required field {0:?}")]
    MissingField(&'static str),
    #[error("answer must be one of A-D, got {0:?}")]
    InvalidAnswer(String),
}

/// Strips code fences, normalizes typographic quotes and parses the reply
/// into a [`QuizDraft`]. Incomplete payloads error out; they are never
/// coerced into a partially-populated draft.
pub fn parse_quiz_payload(raw: &str) -> Result<QuizDraft, ExtractError> {
    let cleaned = CODE_FENCE_REGEX.replace_all(raw.trim(), "");
    let cleaned = cleaned
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    let value: serde_json::Value = serde_json::from_str(cleaned.trim())?;

    let question = require_str(&value, "question")?;
    let options = value
        .get("options")
        .ok_or(ExtractError::MissingField("options"))?;
    let option_a = require_str(options, "A")?;
    let option_b = require_str(options, "B")?;
    let option_c = require_str(options, "C")?;
    let option_d = require_str(options, "D")?;

    let answer = require_str(&value, "answer")?.trim().to_uppercase();
    if !matches!(answer.as_str(), "A" | "B" | "C" | "D") {
        return Err(ExtractError::InvalidAnswer(answer));
    }

    Ok(QuizDraft {
        question,
        option_a,
        option_b,
        option_c,
        option_d,
        answer,
    })
}

fn require_str(value: &serde_json::Value, field: &'static str) -> Result<String, ExtractError> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or(ExtractError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN_REPLY: &str = r#"{
        "question": "What does the mitochondria produce?",
        "options": {"A": "ATP", "B": "DNA", "C": "Glucose", "D": "Oxygen"},
        "answer": "A"
    }"#;

    #[test]
    fn parses_plain_json_reply() {
        let draft = parse_quiz_payload(PLAIN_REPLY).unwrap();
        assert_eq!(draft.question, "What does the mitochondria produce?");
        assert_eq!(draft.option_a, "ATP");
        assert_eq!(draft.option_d, "Oxygen");
        assert_eq!(draft.answer, "A");
    }

    #[test]
    fn fenced_reply_parses_identically_to_plain() {
        let fenced = format!("```json\n{PLAIN_REPLY}\n```");
        assert_eq!(
            parse_quiz_payload(&fenced).unwrap(),
            parse_quiz_payload(PLAIN_REPLY).unwrap()
        );
    }

    #[test]
    fn typographic_quotes_parse_identically_to_straight() {
        let curly = "```json\n{\u{201C}question\u{201D}: \u{201C}Which planet is largest?\u{201D}, \
                     \u{201C}options\u{201D}: {\u{201C}A\u{201D}: \u{201C}Mars\u{201D}, \u{201C}B\u{201D}: \u{201C}Jupiter\u{201D}, \
                     \u{201C}C\u{201D}: \u{201C}Venus\u{201D}, \u{201C}D\u{201D}: \u{201C}Saturn\u{201D}}, \
                     \u{201C}answer\u{201D}: \u{201C}B\u{201D}}\n```";
        let draft = parse_quiz_payload(curly).unwrap();
        assert_eq!(draft.question, "Which planet is largest?");
        assert_eq!(draft.option_b, "Jupiter");
        assert_eq!(draft.answer, "B");
    }

    #[test]
    fn lowercase_answer_is_normalized() {
        let reply = PLAIN_REPLY.replace("\"answer\": \"A\"", "\"answer\": \"a\"");
        assert_eq!(parse_quiz_payload(&reply).unwrap().answer, "A");
    }

    #[test]
    fn missing_options_key_is_rejected() {
        let reply = r#"{"question": "Q?", "answer": "A"}"#;
        assert!(matches!(
            parse_quiz_payload(reply),
            Err(ExtractError::MissingField("options"))
        ));
    }

    #[test]
    fn missing_option_letter_is_rejected() {
        let reply = r#"{
            "question": "Q?",
            "options": {"A": "one", "B": "two", "C": "three"},
            "answer": "A"
        }"#;
        assert!(matches!(
            parse_quiz_payload(reply),
            Err(ExtractError::MissingField("D"))
        ));
    }

    #[test]
    fn answer_outside_a_to_d_is_rejected() {
        let reply = PLAIN_REPLY.replace("\"answer\": \"A\"", "\"answer\": \"E\"");
        assert!(matches!(
            parse_quiz_payload(&reply),
            Err(ExtractError::InvalidAnswer(_))
        ));
    }

    #[test]
    fn prose_reply_is_rejected_as_invalid_json() {
        let reply = "Sure! Here is your question about mitochondria.";
        assert!(matches!(
            parse_quiz_payload(reply),
            Err(ExtractError::InvalidJson(_))
        ));
    }
}
