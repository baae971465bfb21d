use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::habit::HabitEntry;

/// A habit the model proposes to create. Every field is required.
///
/// Field names match the stored habit columns so an accepted plan can be
/// written back without remapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHabit {
    #[serde(rename = "Habit Name")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Frequency")]
    pub frequency: String,
    /// 24-hour `HH:MM`. Requested from the model, not validated here.
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Duration (minutes)")]
    pub duration_minutes: u32,
    #[serde(rename = "Cue")]
    pub cue: String,
    #[serde(rename = "Craving")]
    pub craving: String,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Reward")]
    pub reward: String,
}

/// A partial update to an existing habit. Only `id` and `rationale` are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitModification {
    pub id: String,
    pub rationale: String,
    #[serde(rename = "Habit Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Frequency", default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(rename = "Time", default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(
        rename = "Duration (minutes)",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_minutes: Option<u32>,
    #[serde(rename = "Cue", default, skip_serializing_if = "Option::is_none")]
    pub cue: Option<String>,
    #[serde(rename = "Craving", default, skip_serializing_if = "Option::is_none")]
    pub craving: Option<String>,
    #[serde(rename = "Response", default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(rename = "Reward", default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
}

/// A successfully generated habit-change plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitChangePlan {
    pub add: Vec<NewHabit>,
    pub modify: Vec<HabitModification>,
    pub delete: Vec<String>,
    pub summary: String,
}

impl HabitChangePlan {
    /// True when the plan proposes no changes at all.
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.modify.is_empty() && self.delete.is_empty()
    }

    /// Ids referenced by `modify` or `delete` that are not in `existing`.
    ///
    /// The generator does not check references; callers applying a plan should.
    pub fn unknown_ids(&self, existing: &[HabitEntry]) -> Vec<String> {
        let known: HashSet<&str> = existing.iter().map(|e| e.id.as_str()).collect();
        let mut seen = HashSet::new();
        self.modify
            .iter()
            .map(|m| m.id.as_str())
            .chain(self.delete.iter().map(String::as_str))
            .filter(|id| !known.contains(id) && seen.insert(*id))
            .map(str::to_string)
            .collect()
    }
}

/// Why a plan could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("GEMINI_API_KEY is not set. Provide it with --gemini-api-key or the GEMINI_API_KEY environment variable.")]
    MissingCredential,

    #[error("{0}")]
    Transport(String),

    #[error("Empty response from AI")]
    EmptyResponse,

    #[error("JSON Parse failed: {0}")]
    Malformed(String),
}

impl PlanError {
    /// Wrap a transport failure, falling back to the debug form when the
    /// error renders as an empty message.
    pub fn transport<E: fmt::Display + fmt::Debug>(err: E) -> Self {
        let msg = err.to_string();
        if msg.trim().is_empty() {
            PlanError::Transport(format!("{err:?}"))
        } else {
            PlanError::Transport(msg)
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::MissingCredential => "configuration",
            PlanError::Transport(_) => "transport",
            PlanError::EmptyResponse => "empty_output",
            PlanError::Malformed(_) => "malformed_output",
        }
    }
}

/// Flat `{add, modify, delete, summary, error?}` shape used at outer boundaries.
///
/// Built only from a `Result`, so a report with an `error` always has empty
/// lists and an empty summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReport {
    pub add: Vec<NewHabit>,
    pub modify: Vec<HabitModification>,
    pub delete: Vec<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlanReport {
    pub fn from_outcome(outcome: Result<HabitChangePlan, PlanError>) -> Self {
        match outcome {
            Ok(plan) => PlanReport {
                add: plan.add,
                modify: plan.modify,
                delete: plan.delete,
                summary: plan.summary,
                error: None,
            },
            Err(e) => PlanReport {
                add: Vec::new(),
                modify: Vec::new(),
                delete: Vec::new(),
                summary: String::new(),
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Split back into a plan or the error message.
    pub fn into_result(self) -> Result<HabitChangePlan, String> {
        match self.error {
            Some(msg) => Err(msg),
            None => Ok(HabitChangePlan {
                add: self.add,
                modify: self.modify,
                delete: self.delete,
                summary: self.summary,
            }),
        }
    }
}

impl From<Result<HabitChangePlan, PlanError>> for PlanReport {
    fn from(outcome: Result<HabitChangePlan, PlanError>) -> Self {
        PlanReport::from_outcome(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_add() -> NewHabit {
        NewHabit {
            name: "Morning meditation".into(),
            category: "Mindfulness".into(),
            frequency: "Daily".into(),
            time: "06:30".into(),
            duration_minutes: 20,
            cue: "Alarm goes off".into(),
            craving: "Calm start".into(),
            response: "Meditate on the mat".into(),
            reward: "Tea".into(),
        }
    }

    #[test]
    fn new_habit_uses_column_names() {
        let value = serde_json::to_value(sample_add()).unwrap();
        assert_eq!(value["Habit Name"], "Morning meditation");
        assert_eq!(value["Duration (minutes)"], 20);
        assert_eq!(value["Time"], "06:30");
    }

    #[test]
    fn new_habit_requires_every_field() {
        let mut value = serde_json::to_value(sample_add()).unwrap();
        value.as_object_mut().unwrap().remove("Reward");
        let err = serde_json::from_value::<NewHabit>(value).unwrap_err();
        assert!(err.to_string().contains("Reward"));
    }

    #[test]
    fn modification_needs_only_id_and_rationale() {
        let m: HabitModification =
            serde_json::from_value(json!({"id": "h1", "rationale": "later is easier"})).unwrap();
        assert_eq!(m.id, "h1");
        assert!(m.time.is_none());

        let out = serde_json::to_value(&m).unwrap();
        assert_eq!(out.as_object().unwrap().len(), 2);
    }

    #[test]
    fn modification_without_rationale_is_rejected() {
        let err = serde_json::from_value::<HabitModification>(json!({"id": "h1", "Time": "09:00"}))
            .unwrap_err();
        assert!(err.to_string().contains("rationale"));
    }

    #[test]
    fn unknown_ids_reports_dangling_references() {
        let plan = HabitChangePlan {
            modify: vec![
                HabitModification {
                    id: "h1".into(),
                    rationale: "r".into(),
                    ..Default::default()
                },
                HabitModification {
                    id: "ghost".into(),
                    rationale: "r".into(),
                    ..Default::default()
                },
            ],
            delete: vec!["ghost".into(), "gone".into()],
            ..Default::default()
        };
        let existing = vec![HabitEntry::new("h1")];
        assert_eq!(plan.unknown_ids(&existing), vec!["ghost", "gone"]);
    }

    #[test]
    fn empty_response_report_shape_is_exact() {
        let report = PlanReport::from_outcome(Err(PlanError::EmptyResponse));
        assert!(report.is_error());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "add": [],
                "modify": [],
                "delete": [],
                "summary": "",
                "error": "Empty response from AI"
            })
        );
    }

    #[test]
    fn success_report_has_no_error_key() {
        let plan = HabitChangePlan {
            add: vec![sample_add()],
            summary: "Added meditation".into(),
            ..Default::default()
        };
        let report: PlanReport = Ok(plan.clone()).into();
        let value = serde_json::to_value(&report).unwrap();
        assert!(!report.is_error());
        assert!(value.get("error").is_none());
        assert_eq!(report.into_result().unwrap(), plan);
    }

    #[test]
    fn malformed_message_mentions_parse_failure() {
        let msg = PlanError::Malformed("expected value at line 1".into()).to_string();
        assert!(msg.starts_with("JSON Parse failed"));
        assert!(msg.contains("line 1"));
    }

    #[test]
    fn missing_credential_names_the_variable() {
        assert!(PlanError::MissingCredential
            .to_string()
            .starts_with("GEMINI_API_KEY is not set"));
    }

    #[test]
    fn transport_falls_back_to_debug_for_blank_messages() {
        #[derive(Debug)]
        struct Silent;
        impl fmt::Display for Silent {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Ok(())
            }
        }
        assert_eq!(PlanError::transport(Silent), PlanError::Transport("Silent".into()));
        assert_eq!(
            PlanError::transport("connection refused"),
            PlanError::Transport("connection refused".into())
        );
    }

    #[test]
    fn error_kinds() {
        assert_eq!(PlanError::MissingCredential.kind(), "configuration");
        assert_eq!(PlanError::Transport(String::new()).kind(), "transport");
        assert_eq!(PlanError::EmptyResponse.kind(), "empty_output");
        assert_eq!(PlanError::Malformed(String::new()).kind(), "malformed_output");
    }
}
