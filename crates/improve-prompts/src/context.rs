use improve_core::habit::{eligible_snapshots, HabitEntry, HabitSnapshot};
use serde_json::Value;

/// Everything the habit-change prompt is built from.
#[derive(Debug, Clone)]
pub struct HabitContext {
    pub intent: String,
    pub habits: Vec<HabitSnapshot>,
}

impl HabitContext {
    /// Capture the intent and the prompt-eligible habits.
    pub fn new(intent: &str, entries: &[HabitEntry]) -> Self {
        Self {
            intent: intent.to_string(),
            habits: eligible_snapshots(entries),
        }
    }

    /// Pretty JSON of the habit projection. An empty list renders as `[]`.
    pub fn habits_json(&self) -> String {
        let list = Value::Array(self.habits.iter().map(HabitSnapshot::to_json).collect());
        format!("{list:#}")
    }

    /// Render the request header, the user's intent and the current habits.
    pub fn append_preamble(&self, prompt: &mut String) {
        prompt.push_str(
            "You are a habit coach helping the user reshape their daily routine. \
             Each habit is modelled as a behavior loop: a cue that triggers it, \
             a craving that motivates it, the response (the habit itself) and \
             the reward that reinforces it.\n\n",
        );

        prompt.push_str("## User Request\n\n");
        prompt.push_str(&self.intent);
        prompt.push_str("\n\n");

        prompt.push_str("## Current Habits\n\n");
        prompt.push_str(&self.habits_json());
        prompt.push_str("\n\n");
    }
}
