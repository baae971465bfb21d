use improve_core::{HabitChangePlan, PlanError};
use tracing::warn;

use crate::sanitize::strip_code_fences;

/// Turn raw model output into a plan.
///
/// Deserialization is strict: an add missing any field, or a modify without
/// `id`/`rationale`, is rejected as malformed rather than passed through.
pub fn parse_plan(raw: &str) -> Result<HabitChangePlan, PlanError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(PlanError::EmptyResponse);
    }
    serde_json::from_str(cleaned).map_err(|e| {
        warn!(raw = %raw, "failed to parse model output: {e}");
        PlanError::Malformed(e.to_string())
    })
}
