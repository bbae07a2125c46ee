// src/services/loader.rs

use std::{fmt, fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::models::question::{Question, QuestionBank};

/// The question source could not be opened or read. Fatal at startup.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Read(csv::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot open question source '{}': {}", path, source)
            }
            LoadError::Read(err) => write!(f, "cannot read question source: {}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Read(err) => Some(err),
        }
    }
}

/// Why a single record was left out of the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    TooFewFields(usize),
    InvalidCorrectIndex(String),
    CorrectIndexOutOfRange { correct: i64, options: usize },
    EmptyText,
    EmptyOption(usize),
    Unreadable(String),
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRecord::TooFewFields(n) => write!(f, "expected at least 3 fields, got {}", n),
            MalformedRecord::InvalidCorrectIndex(raw) => {
                write!(f, "correct index '{}' is not a number", raw)
            }
            MalformedRecord::CorrectIndexOutOfRange { correct, options } => {
                write!(f, "correct index {} outside 1..={}", correct, options)
            }
            MalformedRecord::EmptyText => write!(f, "question text is empty"),
            MalformedRecord::EmptyOption(n) => write!(f, "option {} is empty", n),
            MalformedRecord::Unreadable(msg) => write!(f, "unreadable record: {}", msg),
        }
    }
}

/// Loads the question bank from a `;`-separated file.
pub fn load_question_bank(path: impl AsRef<Path>) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    load_from_reader(file)
}

/// Reads question records from any source.
///
/// Malformed records are logged and skipped; only I/O failures abort.
pub fn load_from_reader<R: Read>(reader: R) -> Result<QuestionBank, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut questions = Vec::new();
    let mut skipped = 0usize;

    for (i, record) in csv_reader.records().enumerate() {
        let line = i + 1;
        let parsed = match record {
            Ok(record) => parse_record(&record),
            Err(err) if err.is_io_error() => return Err(LoadError::Read(err)),
            Err(err) => Err(MalformedRecord::Unreadable(err.to_string())),
        };

        match parsed {
            Ok(question) => questions.push(question),
            Err(reason) => {
                skipped += 1;
                tracing::warn!("Skipping question record {}: {}", line, reason);
            }
        }
    }

    if questions.is_empty() {
        tracing::warn!("Question source yielded no usable questions");
    }
    tracing::info!("Loaded {} questions ({} skipped)", questions.len(), skipped);

    Ok(QuestionBank::new(questions))
}

/// Validates one record: `correct;text;option1;option2;...`.
pub fn parse_record(record: &StringRecord) -> Result<Question, MalformedRecord> {
    let mut fields: Vec<&str> = record.iter().collect();

    // tolerate trailing delimiters
    while fields.len() > 3 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    if fields.len() < 3 {
        return Err(MalformedRecord::TooFewFields(fields.len()));
    }

    let correct: i64 = fields[0]
        .parse()
        .map_err(|_| MalformedRecord::InvalidCorrectIndex(fields[0].to_string()))?;

    let text = fields[1];
    if text.is_empty() {
        return Err(MalformedRecord::EmptyText);
    }

    let options: Vec<String> = fields[2..].iter().map(|o| o.to_string()).collect();
    if let Some(pos) = options.iter().position(String::is_empty) {
        return Err(MalformedRecord::EmptyOption(pos + 1));
    }

    if correct < 1 || correct as u64 > options.len() as u64 {
        return Err(MalformedRecord::CorrectIndexOutOfRange {
            correct,
            options: options.len(),
        });
    }

    Ok(Question {
        correct: correct as usize,
        text: text.to_string(),
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(input: &str) -> QuestionBank {
        load_from_reader(input.as_bytes()).expect("in-memory source is readable")
    }

    #[test]
    fn loads_valid_records_in_order() {
        let bank = load("2; Capital of France? ; Berlin ; Paris ; Rome\n1;2+2?;4;5\n");

        assert_eq!(bank.len(), 2);
        assert_eq!(bank[0].correct, 2);
        assert_eq!(bank[0].text, "Capital of France?");
        assert_eq!(bank[0].options, vec!["Berlin", "Paris", "Rome"]);
        assert_eq!(bank[1].text, "2+2?");
    }

    #[test]
    fn drops_out_of_range_correct_index() {
        let bank = load("0;Q zero;a;b\n3;Q three;a;b\n-1;Q neg;a;b\n2;Q ok;a;b\n");

        assert_eq!(bank.len(), 1);
        assert_eq!(bank[0].text, "Q ok");
    }

    #[test]
    fn drops_short_and_non_numeric_rows() {
        let bank = load("1;only text\nx;Q;a;b\n\n1;Q good;a\n");

        assert_eq!(bank.len(), 1);
        assert_eq!(bank[0].text, "Q good");
        assert_eq!(bank[0].options, vec!["a"]);
    }

    #[test]
    fn trailing_delimiter_is_ignored() {
        let bank = load("2;Q;a;b;\n");

        assert_eq!(bank.len(), 1);
        assert_eq!(bank[0].options, vec!["a", "b"]);
    }

    #[test]
    fn empty_text_or_option_is_malformed() {
        let empty_text = StringRecord::from(vec!["1", "", "a"]);
        assert_eq!(parse_record(&empty_text), Err(MalformedRecord::EmptyText));

        let empty_option = StringRecord::from(vec!["1", "Q", "a", "", "c"]);
        assert_eq!(parse_record(&empty_option), Err(MalformedRecord::EmptyOption(2)));
    }

    #[test]
    fn quoted_fields_may_contain_delimiter() {
        let bank = load("1;\"Pick one; carefully\";yes;no\n");

        assert_eq!(bank.len(), 1);
        assert_eq!(bank[0].text, "Pick one; carefully");
    }

    #[test]
    fn missing_file_is_load_error() {
        let result = load_question_bank("/definitely/not/here/questions.csv");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
