use std::path::PathBuf;

use clap::Args;

use crate::backend::gemini::{GeminiBackend, DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Clone, Args)]
pub struct PlannerConfig {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model identifier
    #[arg(long, env = "IMPROVE_GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Gemini API root
    #[arg(long, env = "IMPROVE_GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,
}

impl PlannerConfig {
    /// Build the Gemini backend with the configured credential injected.
    pub fn backend(&self) -> GeminiBackend {
        GeminiBackend::new(self.gemini_api_key.clone(), self.model.clone())
            .with_base_url(&self.gemini_base_url)
    }
}

/// Where the Pomodoro timer keeps its state when no path is given.
pub fn default_timer_state_path() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("improve").join("pomodoro.json")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share/improve/pomodoro.json")
    } else {
        PathBuf::from(".").join("improve/pomodoro.json")
    }
}
