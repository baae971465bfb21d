pub mod context;
pub mod habit_change;

pub use context::HabitContext;
use improve_core::HabitEntry;

/// Assemble the habit-change prompt for a user request.
///
/// Pure function of its inputs: adaptation and archived entries are dropped
/// before the remaining habits are serialized into the context block.
pub fn assemble_prompt(intent: &str, habits: &[HabitEntry]) -> String {
    let ctx = HabitContext::new(intent, habits);
    let mut prompt = String::new();
    ctx.append_preamble(&mut prompt);
    habit_change::append_instructions(&mut prompt);
    prompt
}
