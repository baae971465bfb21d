use improve_core::{HabitChangePlan, HabitEntry, PlanError, PlanReport};
use tracing::{info, warn};

use crate::backend::GenerativeBackend;
use crate::{parser, schema};

/// Turns a free-text request plus the user's current habits into a
/// habit-change plan.
///
/// Every failure comes back as a `PlanError` value; nothing is retried and a
/// response that fails to parse is discarded whole. The generator holds no
/// mutable state, so concurrent calls are independent.
pub struct HabitPlanGenerator<B> {
    backend: B,
}

impl<B: GenerativeBackend> HabitPlanGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn generate(
        &self,
        intent: &str,
        habits: &[HabitEntry],
    ) -> Result<HabitChangePlan, PlanError> {
        let result = self.run(intent, habits).await;
        match &result {
            Ok(plan) => info!(
                "plan ready: {} add, {} modify, {} delete",
                plan.add.len(),
                plan.modify.len(),
                plan.delete.len()
            ),
            Err(e) => warn!(kind = e.kind(), "plan generation failed: {e}"),
        }
        result
    }

    /// Like `generate`, flattened into the `{add, modify, delete, summary, error?}` shape.
    pub async fn generate_report(&self, intent: &str, habits: &[HabitEntry]) -> PlanReport {
        PlanReport::from_outcome(self.generate(intent, habits).await)
    }

    async fn run(&self, intent: &str, habits: &[HabitEntry]) -> Result<HabitChangePlan, PlanError> {
        self.backend.preflight()?;

        let prompt = improve_prompts::assemble_prompt(intent, habits);
        info!(
            "requesting plan from {} (model={}, {} habits in context)",
            self.backend.name(),
            self.backend.model_hint().unwrap_or("default"),
            habits.iter().filter(|h| h.is_prompt_eligible()).count()
        );

        let raw = self
            .backend
            .generate(&prompt, &schema::response_schema())
            .await?;
        parser::parse_plan(&raw)
    }
}
