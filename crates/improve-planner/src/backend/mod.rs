pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use improve_core::PlanError;
use serde_json::Value;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;

/// A hosted generative model that can answer one prompt with schema-shaped text.
///
/// Implementations perform exactly one request per `generate` call: no
/// streaming, no retries. Prompt assembly and output parsing live elsewhere.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &str;

    /// Optional model identifier for logging.
    fn model_hint(&self) -> Option<&str> {
        None
    }

    /// Configuration checks that must pass before any network activity.
    fn preflight(&self) -> Result<(), PlanError> {
        Ok(())
    }

    /// Send the prompt with a JSON response schema and return the raw text.
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<String, PlanError>;
}
