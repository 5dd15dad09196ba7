//! Core types for the gradebox evaluation pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of evaluating one submission output against one test case.
///
/// The score is a fraction in `[0.0, 1.0]`; pass/fail comparators only ever
/// produce the two extremes, but graders that award partial credit use the
/// full range. `text` is the explanation shown to contestants: the first
/// element is a message-catalog template, any following elements are literal
/// values substituted into it downstream (e.g. a filename).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub score: f64,
    pub text: Vec<String>,
}

impl Outcome {
    /// Build an outcome. Scores outside `[0.0, 1.0]` are a caller bug.
    pub fn new(score: f64, text: Vec<String>) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&score),
            "outcome score out of range: {score}"
        );
        Self { score, text }
    }
}

/// Custom error types for gradebox.
///
/// An `Err` from an evaluation step always means "could not judge", never
/// "judged incorrect": absent output and mismatches are reported as normal
/// zero-score outcomes, not errors.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sandbox error: {0}")]
    Sandbox(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for gradebox operations.
pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_score_and_text() {
        let outcome = Outcome::new(1.0, vec!["Output is correct".to_string()]);
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"score":1.0,"text":["Output is correct"]}"#);
    }

    #[test]
    fn test_outcome_supports_fractional_scores() {
        let outcome = Outcome::new(0.5, vec!["Output is partially correct".to_string()]);
        assert_eq!(outcome.score, 0.5);
    }

    #[test]
    fn test_eval_error_wraps_io() {
        let err: EvalError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, EvalError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }
}
