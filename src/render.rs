//! Presentation model for scored results, plus the terminal writer for it.
//!
//! Rendering is pure and happens after the coercions in `classify`; there is
//! no error path here. Each `RenderedView` replaces the previous one
//! wholesale.

use std::io::{self, Write};

use crossterm::style::Stylize;
use serde_json::Value;

use crate::classify::{classify, format_number, number_or, sequence_len, Severity};
use crate::task::{ResponseEnvelope, ScoredTask};

/// Which operation produced the envelope; the summary wording differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Analyze,
    Suggest,
}

/// Status line shown after every stage of an action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// One rendered task card.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub title: String,
    /// Importance badge text, e.g. `Imp 10`.
    pub badge: String,
    pub badge_severity: Severity,
    /// Combined due date, estimated hours, and dependency count line.
    pub meta: String,
    /// Two-decimal score line, e.g. `Score: 9.50`.
    pub score: String,
    pub score_severity: Severity,
    pub explanation: String,
}

/// A complete view: summary line plus cards in service order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedView {
    pub summary: String,
    pub cards: Vec<TaskCard>,
}

/// Build the presentation model for an envelope.
///
/// Tasks keep the order the service returned. All field fallbacks are applied
/// here and only here; the records themselves are left untouched.
pub fn render(envelope: &ResponseEnvelope, mode: Mode) -> RenderedView {
    let summary = match mode {
        Mode::Suggest => envelope.summary.clone().unwrap_or_default(),
        Mode::Analyze => {
            if envelope.tasks.is_empty() {
                "No tasks to display.".to_string()
            } else {
                format!("Showing {} tasks sorted by priority.", envelope.tasks.len())
            }
        }
    };

    let cards = envelope
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| card_for(task, index))
        .collect();

    RenderedView { summary, cards }
}

fn card_for(task: &ScoredTask, index: usize) -> TaskCard {
    let record = &task.record;

    let title = record
        .title
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Task {}", index + 1));

    let importance = number_or(record.importance.as_ref(), 5.0);
    let due = display_due(record.due_date.as_ref());
    let hours = display_hours(record.estimated_hours.as_ref());
    let deps = sequence_len(record.dependencies.as_ref());

    // The score is classified on the reparsed two-decimal text so the
    // displayed value and its bucket always agree.
    let score_text = format!("{:.2}", number_or(task.score.as_ref(), 0.0));
    let score_severity = classify(score_text.parse().unwrap_or(0.0));

    TaskCard {
        title,
        badge: format!("Imp {}", format_number(importance)),
        badge_severity: classify(importance),
        meta: format!("Due: {due} • Est: {hours}h • Deps: {deps}"),
        score: format!("Score: {score_text}"),
        score_severity,
        explanation: task
            .explanation
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
    }
}

fn display_due(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "No due date".to_string(),
    }
}

fn display_hours(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "?".to_string(),
    }
}

/// Write a view to a terminal, coloring severities when `color` is on.
pub fn write_view(out: &mut impl Write, view: &RenderedView, color: bool) -> io::Result<()> {
    if !view.summary.is_empty() {
        writeln!(out, "{}", view.summary)?;
    }
    for card in &view.cards {
        writeln!(out)?;
        let title = if color {
            card.title.as_str().bold().to_string()
        } else {
            card.title.clone()
        };
        writeln!(out, "{}  [{}]", title, paint(&card.badge, card.badge_severity, color))?;
        writeln!(out, "  {}", card.meta)?;
        writeln!(out, "  {}", paint(&card.score, card.score_severity, color))?;
        if !card.explanation.is_empty() {
            writeln!(out, "  {}", card.explanation)?;
        }
    }
    Ok(())
}

/// Write the status line; errors are marked and colored red when possible.
pub fn write_status(out: &mut impl Write, status: &Status, color: bool) -> io::Result<()> {
    if status.message.is_empty() {
        return Ok(());
    }
    if status.is_error {
        let line = format!("error: {}", status.message);
        if color {
            writeln!(out, "{}", line.as_str().red())
        } else {
            writeln!(out, "{line}")
        }
    } else {
        writeln!(out, "{}", status.message)
    }
}

fn paint(text: &str, severity: Severity, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match severity {
        Severity::High => text.red().bold().to_string(),
        Severity::Medium => text.yellow().to_string(),
        Severity::Low => text.dark_grey().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> ResponseEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_analyze_card_end_to_end() {
        let view = render(
            &envelope(json!({
                "tasks": [{"title": "Pay bill", "importance": 10, "_score": 9.5}]
            })),
            Mode::Analyze,
        );

        assert_eq!(view.summary, "Showing 1 tasks sorted by priority.");
        let card = &view.cards[0];
        assert_eq!(card.title, "Pay bill");
        assert_eq!(card.badge, "Imp 10");
        assert_eq!(card.badge_severity, Severity::High);
        assert_eq!(card.score, "Score: 9.50");
        assert_eq!(card.score_severity, Severity::High);
        assert_eq!(card.explanation, "");
    }

    #[test]
    fn test_analyze_empty_envelope() {
        let view = render(&envelope(json!({})), Mode::Analyze);
        assert_eq!(view.summary, "No tasks to display.");
        assert!(view.cards.is_empty());
    }

    #[test]
    fn test_suggest_summary_is_verbatim_or_empty() {
        let with = render(
            &envelope(json!({"tasks": [], "summary": "Do the bill first."})),
            Mode::Suggest,
        );
        assert_eq!(with.summary, "Do the bill first.");

        let without = render(&envelope(json!({"tasks": []})), Mode::Suggest);
        assert_eq!(without.summary, "");
    }

    #[test]
    fn test_analyze_ignores_envelope_summary() {
        let view = render(
            &envelope(json!({"tasks": [{"title": "A"}], "summary": "server text"})),
            Mode::Analyze,
        );
        assert_eq!(view.summary, "Showing 1 tasks sorted by priority.");
    }

    #[test]
    fn test_meta_line_fallbacks() {
        let view = render(&envelope(json!({"tasks": [{}]})), Mode::Analyze);
        let card = &view.cards[0];
        assert_eq!(card.title, "Task 1");
        assert_eq!(card.badge, "Imp 5");
        assert_eq!(card.badge_severity, Severity::Medium);
        assert_eq!(card.meta, "Due: No due date • Est: ?h • Deps: 0");
        assert_eq!(card.score, "Score: 0.00");
        assert_eq!(card.score_severity, Severity::Low);
    }

    #[test]
    fn test_dependency_counts() {
        let view = render(
            &envelope(json!({
                "tasks": [
                    {"title": "A"},
                    {"title": "B", "dependencies": ["a", "b"]}
                ]
            })),
            Mode::Analyze,
        );
        assert!(view.cards[0].meta.ends_with("Deps: 0"));
        assert!(view.cards[1].meta.ends_with("Deps: 2"));
    }

    #[test]
    fn test_positional_placeholders_number_from_one() {
        let view = render(
            &envelope(json!({"tasks": [{}, {"title": ""}, {"title": "C"}]})),
            Mode::Analyze,
        );
        assert_eq!(view.cards[0].title, "Task 1");
        assert_eq!(view.cards[1].title, "Task 2");
        assert_eq!(view.cards[2].title, "C");
    }

    #[test]
    fn test_order_is_preserved() {
        let view = render(
            &envelope(json!({
                "tasks": [
                    {"title": "low", "_score": 1.0},
                    {"title": "high", "_score": 9.0}
                ]
            })),
            Mode::Analyze,
        );
        // No client-side sorting; ordering is the service's responsibility.
        assert_eq!(view.cards[0].title, "low");
        assert_eq!(view.cards[1].title, "high");
    }

    #[test]
    fn test_meta_line_with_values() {
        let view = render(
            &envelope(json!({
                "tasks": [{
                    "title": "Pay electricity bill",
                    "due_date": "2025-11-28",
                    "estimated_hours": 0.5,
                    "importance": 10,
                    "dependencies": []
                }]
            })),
            Mode::Analyze,
        );
        assert_eq!(
            view.cards[0].meta,
            "Due: 2025-11-28 • Est: 0.5h • Deps: 0"
        );
    }

    #[test]
    fn test_write_view_plain_output() {
        let view = render(
            &envelope(json!({
                "tasks": [{"title": "Pay bill", "importance": 10, "_score": 9.5,
                           "_explanation": "urgent and cheap"}]
            })),
            Mode::Analyze,
        );

        let mut out = Vec::new();
        write_view(&mut out, &view, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Showing 1 tasks sorted by priority.\n\
             \n\
             Pay bill  [Imp 10]\n\
             \x20 Due: No due date • Est: ?h • Deps: 0\n\
             \x20 Score: 9.50\n\
             \x20 urgent and cheap\n"
        );
    }

    #[test]
    fn test_write_status_marks_errors() {
        let mut out = Vec::new();
        write_status(&mut out, &Status::error("HTTP 400: strategy unknown"), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "error: HTTP 400: strategy unknown\n"
        );

        let mut out = Vec::new();
        write_status(&mut out, &Status::info("Analysis complete."), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Analysis complete.\n");
    }
}
