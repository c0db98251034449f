//! Wire types shared with the prioritization service.
//!
//! Records are deliberately permissive: fields the user omitted stay omitted
//! on the wire, and fields the service adds beyond the documented ones ride
//! through the flattened passthrough map untouched. Display fallbacks are
//! applied at render time only and are never written back into a record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single unit of work as entered by the user.
///
/// Every field is optional and loosely typed; a record is accepted as long as
/// it is a JSON object. Interpretation (numeric coercion, fallbacks) happens
/// when a card is rendered, so the record sent to the service is exactly the
/// record that was parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    /// `YYYY-MM-DD` text by convention; opaque to this client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Value>,
    /// Fields this client does not interpret, preserved for the round trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A task record as returned by the service, carrying its score annotations.
///
/// `_score` and `_explanation` are trust-the-server fields: no validation
/// beyond numeric coercion with a zero fallback at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub record: TaskRecord,
    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Value>,
    #[serde(rename = "_explanation", default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Value>,
}

/// Top-level response from either remote operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Scored tasks in the order the service chose; absent means empty.
    #[serde(default)]
    pub tasks: Vec<ScoredTask>,
    /// Free-form guidance text; only the suggest operation populates it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_without_tasks_is_empty() {
        let envelope: ResponseEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.tasks.is_empty());
        assert!(envelope.summary.is_none());
    }

    #[test]
    fn test_score_fields_split_from_passthrough() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "tasks": [{
                "title": "Pay bill",
                "importance": 10,
                "_score": 9.5,
                "_explanation": "urgent",
                "_days_until_due": 2
            }]
        }))
        .unwrap();

        let task = &envelope.tasks[0];
        assert_eq!(task.score, Some(json!(9.5)));
        assert_eq!(task.explanation, Some(json!("urgent")));
        assert_eq!(task.record.extra.get("_days_until_due"), Some(&json!(2)));
        assert!(!task.record.extra.contains_key("_score"));
    }

    #[test]
    fn test_absent_fields_stay_absent_when_serialized() {
        let record: TaskRecord = serde_json::from_value(json!({"title": "A"})).unwrap();
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json!({"title": "A"}));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let record: TaskRecord =
            serde_json::from_value(json!({"title": "A", "custom": [1, 2]})).unwrap();
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json!({"title": "A", "custom": [1, 2]}));
    }
}
