// src/models/question.rs

use std::ops::Deref;

/// A single multiple-choice question.
///
/// `correct` is 1-based and always within `1..=options.len()`; the loader
/// refuses records that break this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub correct: usize,
    pub text: String,
    pub options: Vec<String>,
}

impl Question {
    /// Text of the option at the given 1-based index, if it exists.
    pub fn option_text(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }
}

/// Ordered, immutable question set shared by every session.
///
/// There is deliberately no mutation API; build one with `QuestionBank::new`
/// and share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl Deref for QuestionBank {
    type Target = [Question];

    fn deref(&self) -> &[Question] {
        &self.questions
    }
}

/// DTO for rendering a question to the participant (excludes the answer).
#[derive(Debug)]
pub struct PublicQuestion<'a> {
    pub number: usize,
    pub text: &'a str,
    pub options: &'a [String],
}

impl<'a> PublicQuestion<'a> {
    pub fn list(bank: &'a QuestionBank) -> Vec<PublicQuestion<'a>> {
        bank.iter()
            .enumerate()
            .map(|(i, q)| PublicQuestion {
                number: i + 1,
                text: &q.text,
                options: &q.options,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_text_is_one_based() {
        let question = Question {
            correct: 1,
            text: "Q".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
        };

        assert_eq!(question.option_text(1), Some("a"));
        assert_eq!(question.option_text(2), Some("b"));
        assert_eq!(question.option_text(0), None);
        assert_eq!(question.option_text(3), None);
    }
}
