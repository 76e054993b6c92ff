//! Process-wide configuration for the summarization service

use thiserror::Error;

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the models-listing endpoint
pub const MODELS_URL_VAR: &str = "GEMINI_MODELS_URL";
/// Environment variable holding the generation endpoint
pub const GENERATE_URL_VAR: &str = "GEMINI_GENERATE_URL";

/// Longest passage sent for summarization, in characters
pub const DEFAULT_MAX_INPUT_CHARS: usize = 8000;
/// Longest summary kept on a highlight, in characters
pub const DEFAULT_MAX_SUMMARY_CHARS: usize = 8000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 150,
        }
    }
}

/// Everything the summary client needs to reach the remote service.
///
/// Built once at startup and shared by reference.
#[derive(Clone, PartialEq)]
pub struct SummaryConfig {
    pub api_key: String,
    pub models_url: String,
    pub generate_url: String,
    pub generation: GenerationConfig,
    pub max_input_chars: usize,
    pub max_summary_chars: usize,
}

impl SummaryConfig {
    pub fn new(
        api_key: impl Into<String>,
        models_url: impl Into<String>,
        generate_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            models_url: models_url.into(),
            generate_url: generate_url.into(),
            generation: GenerationConfig::default(),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            max_summary_chars: DEFAULT_MAX_SUMMARY_CHARS,
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self::new(
            require(API_KEY_VAR)?,
            require(MODELS_URL_VAR)?,
            require(GENERATE_URL_VAR)?,
        ))
    }

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    pub fn with_max_summary_chars(mut self, max: usize) -> Self {
        self.max_summary_chars = max;
        self
    }
}

// The credential must not end up in logs.
impl std::fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("api_key", &"<redacted>")
            .field("models_url", &self.models_url)
            .field("generate_url", &self.generate_url)
            .field("generation", &self.generation)
            .field("max_input_chars", &self.max_input_chars)
            .field("max_summary_chars", &self.max_summary_chars)
            .finish()
    }
}
