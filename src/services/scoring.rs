// src/services/scoring.rs

use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::models::{
    question::QuestionBank,
    result::{AnswerReview, ScoredResult},
};

/// Form field carrying the answer to the question at a 0-based index.
/// Leading zeros are rejected so each question has exactly one field name.
static ANSWER_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^q(0|[1-9][0-9]*)$").expect("valid answer field pattern"));

/// Scores a submission against the bank.
///
/// Pure: `finished_at` is passed in rather than read from the clock.
/// Answers beyond the slice, `None`, and indices that match no option all
/// count as wrong.
pub fn score(
    bank: &QuestionBank,
    answers: &[Option<usize>],
    started_at: Instant,
    finished_at: Instant,
) -> ScoredResult {
    let reviews: Vec<AnswerReview> = bank
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let user_answer = answers.get(i).copied().flatten();
            AnswerReview {
                number: i + 1,
                question: question.text.clone(),
                user_answer,
                correct_answer: question.correct,
                user_choice: user_answer
                    .and_then(|a| question.option_text(a))
                    .map(str::to_string),
                correct_choice: question
                    .option_text(question.correct)
                    .unwrap_or_default()
                    .to_string(),
                is_correct: user_answer == Some(question.correct),
            }
        })
        .collect();

    ScoredResult {
        correct_count: reviews.iter().filter(|r| r.is_correct).count(),
        total: bank.len(),
        elapsed: elapsed_between(started_at, finished_at),
        answers: reviews,
    }
}

/// Monotonic time between two instants, zero if `finished_at` is earlier.
pub fn elapsed_between(started_at: Instant, finished_at: Instant) -> Duration {
    finished_at.saturating_duration_since(started_at)
}

/// Formats a duration as `MM:SS`; minutes are not wrapped into hours.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Builds the answer vector from submitted form fields.
///
/// `q<i>` holds the 1-based option chosen for question `i`. Blank,
/// non-numeric and unknown fields leave the question unanswered.
pub fn parse_submission(form: &HashMap<String, String>, total: usize) -> Vec<Option<usize>> {
    let mut answers = vec![None; total];

    for (key, value) in form {
        let Some(index) = ANSWER_FIELD
            .captures(key)
            .and_then(|caps| caps[1].parse::<usize>().ok())
        else {
            continue;
        };

        if let Some(slot) = answers.get_mut(index) {
            *slot = value.trim().parse::<usize>().ok();
        }
    }

    answers
}
