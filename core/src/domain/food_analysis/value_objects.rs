use std::time::Duration;

use crate::domain::common::{DEFAULT_ANALYSIS_TIMEOUT_SECS, DEFAULT_LLM_MODEL, DEFAULT_MAX_TOKENS, LLMConfig};

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&LLMConfig> for GenerationParams {
    fn from(config: &LLMConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub params: GenerationParams,
    pub timeout: Duration,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            params: GenerationParams::default(),
            timeout: Duration::from_secs(DEFAULT_ANALYSIS_TIMEOUT_SECS),
        }
    }
}

impl From<&LLMConfig> for AnalysisOptions {
    fn from(config: &LLMConfig) -> Self {
        Self {
            params: GenerationParams::from(config),
            timeout: config.timeout,
        }
    }
}

/// Lifecycle of one analysis attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Requesting,
    Extracting,
    Succeeded,
    Failed,
}

impl AnalysisState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, AnalysisState::Requesting | AnalysisState::Extracting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisState::Succeeded | AnalysisState::Failed)
    }
}
