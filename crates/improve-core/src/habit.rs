use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ImproveError;

pub const KEY_NAME: &str = "Habit Name";
pub const KEY_CATEGORY: &str = "Category";
pub const KEY_FREQUENCY: &str = "Frequency";
pub const KEY_TIME: &str = "Time";
pub const KEY_DURATION: &str = "Duration (minutes)";
pub const KEY_CUE: &str = "Cue";
pub const KEY_CRAVING: &str = "Craving";
pub const KEY_RESPONSE: &str = "Response";
pub const KEY_REWARD: &str = "Reward";
pub const KEY_TYPE: &str = "Type";
pub const KEY_ARCHIVED: &str = "archived";

/// `Type` value marking entries written by a previous AI adaptation pass.
pub const ADAPTATION_TYPE: &str = "adaptation";

/// A stored habit row: an id plus the loosely-typed column data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitEntry {
    pub id: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// The subset of a habit that is shown to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitSnapshot {
    pub id: String,
    pub name: Option<Value>,
    pub time: Option<Value>,
    pub duration: Option<Value>,
    pub cue: Option<Value>,
    pub craving: Option<Value>,
    pub response: Option<Value>,
    pub reward: Option<Value>,
}

impl HabitEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Map::new(),
        }
    }

    /// Builder-style setter, mostly for tests and fixtures.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Parse a JSON array of `{ "id": ..., "data": { ... } }` records.
    pub fn parse_list(json: &str) -> Result<Vec<HabitEntry>, ImproveError> {
        let entries: Vec<HabitEntry> = serde_json::from_str(json)?;
        if let Some(pos) = entries.iter().position(|e| e.id.trim().is_empty()) {
            return Err(ImproveError::InvalidInput(format!(
                "habit at index {pos} has an empty id"
            )));
        }
        Ok(entries)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn is_adaptation(&self) -> bool {
        self.get(KEY_TYPE).and_then(Value::as_str) == Some(ADAPTATION_TYPE)
    }

    pub fn is_archived(&self) -> bool {
        self.get(KEY_ARCHIVED).is_some_and(is_truthy)
    }

    /// Whether this entry may be included in a prompt's habit context.
    pub fn is_prompt_eligible(&self) -> bool {
        !self.is_adaptation() && !self.is_archived()
    }

    pub fn snapshot(&self) -> HabitSnapshot {
        let field = |key: &str| self.get(key).cloned();
        HabitSnapshot {
            id: self.id.clone(),
            name: field(KEY_NAME),
            time: field(KEY_TIME),
            duration: field(KEY_DURATION),
            cue: field(KEY_CUE),
            craving: field(KEY_CRAVING),
            response: field(KEY_RESPONSE),
            reward: field(KEY_REWARD),
        }
    }
}

impl HabitSnapshot {
    /// JSON object form of the snapshot. Absent fields are `null`.
    pub fn to_json(&self) -> Value {
        let field = |v: &Option<Value>| v.clone().unwrap_or(Value::Null);
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("name".into(), field(&self.name));
        map.insert("time".into(), field(&self.time));
        map.insert("duration".into(), field(&self.duration));
        map.insert("cue".into(), field(&self.cue));
        map.insert("craving".into(), field(&self.craving));
        map.insert("response".into(), field(&self.response));
        map.insert("reward".into(), field(&self.reward));
        Value::Object(map)
    }
}

/// Snapshots of every entry that may appear in a prompt, in input order.
pub fn eligible_snapshots(entries: &[HabitEntry]) -> Vec<HabitSnapshot> {
    entries
        .iter()
        .filter(|e| e.is_prompt_eligible())
        .map(HabitEntry::snapshot)
        .collect()
}

/// Loose truthiness for flag columns that may hold booleans, numbers or strings.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
