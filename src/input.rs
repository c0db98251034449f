//! Task input store: the raw batch text and its validation.
//!
//! The buffer holds whatever the user last loaded or typed. Parsing checks
//! only the top-level shape; individual record fields are interpreted lazily
//! at render time with safe fallbacks, never rejected here.

use serde_json::Value;
use thiserror::Error;

use crate::task::TaskRecord;

const SHAPE_MESSAGE: &str = "JSON must be an array of tasks or an object with a 'tasks' array.";

/// Input that cannot be turned into a task batch. User-correctable; the
/// underlying parser message is carried verbatim.
#[derive(Debug, Error)]
#[error("Invalid JSON: {cause}")]
pub struct ValidationError {
    pub cause: String,
}

/// In-memory store for the current batch of tasks as raw structured text.
///
/// State lives only for the process; every edit replaces the text wholesale.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the buffer contents.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replace the buffer with the built-in example batch.
    pub fn load_sample(&mut self) {
        self.text = sample_json();
    }

    /// Replace the buffer with the contents of a file.
    pub fn load_file(&mut self, path: &str) -> Result<(), std::io::Error> {
        self.text = std::fs::read_to_string(path)?;
        Ok(())
    }

    /// Validate the buffer into task records.
    ///
    /// Empty or whitespace-only text is an empty batch, not an error. The
    /// accepted shapes are a bare array of records or an object with a
    /// `tasks` array; anything else fails with the cause in the message.
    pub fn parse(&self) -> Result<Vec<TaskRecord>, ValidationError> {
        let raw = self.text.trim();
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let parsed: Value = serde_json::from_str(raw).map_err(|e| ValidationError {
            cause: e.to_string(),
        })?;

        let items = match parsed {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("tasks") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(ValidationError {
                        cause: SHAPE_MESSAGE.to_string(),
                    })
                }
            },
            _ => {
                return Err(ValidationError {
                    cause: SHAPE_MESSAGE.to_string(),
                })
            }
        };

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| ValidationError {
                    cause: e.to_string(),
                })
            })
            .collect()
    }
}

/// The example batch seeded by `load_sample` and the `sample` subcommand.
pub fn sample_json() -> String {
    let sample = serde_json::json!([
        {
            "title": "Finish task triage client core logic",
            "due_date": "2025-12-01",
            "estimated_hours": 3,
            "importance": 9,
            "dependencies": [],
        },
        {
            "title": "Refactor old side project",
            "due_date": "2025-12-20",
            "estimated_hours": 6,
            "importance": 5,
            "dependencies": [],
        },
        {
            "title": "Pay electricity bill",
            "due_date": "2025-11-28",
            "estimated_hours": 0.5,
            "importance": 10,
            "dependencies": [],
        },
        {
            "title": "Write blog post about Rust tips",
            "due_date": "2026-01-10",
            "estimated_hours": 4,
            "importance": 6,
            "dependencies": ["outline"],
        },
    ]);
    serde_json::to_string_pretty(&sample).unwrap_or_default()
}
