// src/models/result.rs

use std::time::Duration;

use chrono::{DateTime, Local};

/// Review line for one question of a scored attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    /// 1-based position in the bank.
    pub number: usize,
    pub question: String,
    /// Submitted 1-based option index; `None` when unanswered.
    pub user_answer: Option<usize>,
    pub correct_answer: usize,
    /// Option text for `user_answer`, only when it names a real option.
    pub user_choice: Option<String>,
    pub correct_choice: String,
    pub is_correct: bool,
}

/// Outcome of scoring one submission. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredResult {
    pub correct_count: usize,
    pub total: usize,
    pub elapsed: Duration,
    pub answers: Vec<AnswerReview>,
}

/// One line of the outcome log.
#[derive(Debug, Clone)]
pub struct OutcomeEntry {
    pub recorded_at: DateTime<Local>,
    pub display_name: String,
    pub correct_count: usize,
    pub total: usize,
    pub elapsed: Duration,
}

impl OutcomeEntry {
    pub fn new(display_name: &str, result: &ScoredResult) -> Self {
        Self {
            recorded_at: Local::now(),
            display_name: display_name.to_string(),
            correct_count: result.correct_count,
            total: result.total,
            elapsed: result.elapsed,
        }
    }
}
