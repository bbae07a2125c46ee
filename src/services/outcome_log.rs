// src/services/outcome_log.rs

use std::fmt;
use std::path::{Path, PathBuf};

use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

use crate::{models::result::OutcomeEntry, services::scoring::format_elapsed};

/// The outcome log destination could not be written.
#[derive(Debug)]
pub struct OutcomeLogError(pub std::io::Error);

impl fmt::Display for OutcomeLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "outcome log write failed: {}", self.0)
    }
}

impl std::error::Error for OutcomeLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for OutcomeLogError {
    fn from(err: std::io::Error) -> Self {
        OutcomeLogError(err)
    }
}

/// Append-only text file with one line per completed attempt.
#[derive(Debug)]
pub struct OutcomeLog {
    path: PathBuf,
    // Serializes whole open-write-close cycles so lines never interleave.
    write_lock: Mutex<()>,
}

impl OutcomeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes exactly one line for `entry`.
    ///
    /// The file is opened per call and closed on every return path.
    pub async fn append(&self, entry: &OutcomeEntry) -> Result<(), OutcomeLogError> {
        let line = format_entry(entry);
        let _guard = self.write_lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Appends `entry`, reporting but not propagating failures.
    pub async fn record(&self, entry: &OutcomeEntry) {
        match self.append(entry).await {
            Ok(()) => tracing::debug!("Recorded outcome for {}", entry.display_name),
            Err(e) => tracing::error!(
                "Failed to record outcome for {} in {}: {}",
                entry.display_name,
                self.path.display(),
                e
            ),
        }
    }
}

/// `YYYY-MM-DD|HH:MM:SS, <name>, correct <c> of <t>, time: MM:SS\n`
pub fn format_entry(entry: &OutcomeEntry) -> String {
    let name: String = entry
        .display_name
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | ',') { ' ' } else { c })
        .collect();

    format!(
        "{}, {}, correct {} of {}, time: {}\n",
        entry.recorded_at.format("%Y-%m-%d|%H:%M:%S"),
        name,
        entry.correct_count,
        entry.total,
        format_elapsed(entry.elapsed)
    )
}
