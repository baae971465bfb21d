use std::sync::Mutex;

use async_trait::async_trait;
use improve_core::PlanError;
use serde_json::Value;

use super::GenerativeBackend;

/// A mock backend for testing that returns a preconfigured reply and records
/// every prompt it was asked to answer.
pub struct MockBackend {
    reply: Result<String, PlanError>,
    prompts: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Create a mock that answers with the given text.
    pub fn success(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that fails every call with `err`.
    pub fn failure(err: PlanError) -> Self {
        Self {
            reply: Err(err),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str, _schema: &Value) -> Result<String, PlanError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.reply.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_is_mock() {
        assert_eq!(MockBackend::success("").name(), "mock");
        assert_eq!(MockBackend::success("").model_hint(), None);
    }

    #[tokio::test]
    async fn success_returns_text_and_records_prompt() {
        let mock = MockBackend::success("{}");
        let out = mock.generate("hello", &json!({})).await.unwrap();
        assert_eq!(out, "{}");
        assert_eq!(mock.prompts(), vec!["hello"]);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn failure_returns_error() {
        let mock = MockBackend::failure(PlanError::Transport("boom".into()));
        let err = mock.generate("p", &json!({})).await.unwrap_err();
        assert_eq!(err, PlanError::Transport("boom".into()));
        assert_eq!(mock.calls(), 1);
    }
}
