//! Response schema sent with every generation request.
//!
//! Written in the Gemini `responseSchema` dialect. Property names must stay in
//! sync with the serde names on `NewHabit` and `HabitModification`.

use improve_core::habit::{
    KEY_CATEGORY, KEY_CRAVING, KEY_CUE, KEY_DURATION, KEY_FREQUENCY, KEY_NAME, KEY_RESPONSE,
    KEY_REWARD, KEY_TIME,
};
use serde_json::{json, Map, Value};

const CONTENT_FIELDS: [&str; 9] = [
    KEY_NAME,
    KEY_CATEGORY,
    KEY_FREQUENCY,
    KEY_TIME,
    KEY_DURATION,
    KEY_CUE,
    KEY_CRAVING,
    KEY_RESPONSE,
    KEY_REWARD,
];

fn content_properties() -> Map<String, Value> {
    CONTENT_FIELDS
        .iter()
        .map(|&key| {
            let prop = match key {
                KEY_DURATION => json!({ "type": "INTEGER", "description": "Duration in minutes" }),
                KEY_TIME => json!({ "type": "STRING", "description": "Start time, 24-hour HH:MM" }),
                _ => json!({ "type": "STRING" }),
            };
            (key.to_string(), prop)
        })
        .collect()
}

/// Schema for a habit to add. Every field is required.
pub fn new_habit_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": content_properties(),
        "required": CONTENT_FIELDS,
    })
}

/// Schema for a modification. Only `id` and `rationale` are required.
pub fn modify_habit_schema() -> Value {
    let mut properties = content_properties();
    properties.insert(
        "id".into(),
        json!({ "type": "STRING", "description": "Id of an existing habit" }),
    );
    properties.insert(
        "rationale".into(),
        json!({ "type": "STRING", "description": "Why this change helps" }),
    );
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": ["id", "rationale"],
    })
}

/// Top-level habit-change plan schema.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "add": { "type": "ARRAY", "items": new_habit_schema() },
            "modify": { "type": "ARRAY", "items": modify_habit_schema() },
            "delete": { "type": "ARRAY", "items": { "type": "STRING" } },
            "summary": { "type": "STRING" },
        },
        "required": ["add", "modify", "delete", "summary"],
    })
}
