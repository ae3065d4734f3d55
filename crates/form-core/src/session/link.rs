use std::env;

use super::Session;
use crate::step::StepType;

pub const DEFAULT_BASE_URL: &str = "/wizard";

/// Prefijo de las URLs reanudables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub base_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string() }
    }
}

impl LinkConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Lee `FORMFLOW_BASE_URL`; default `/wizard`.
    pub fn from_env() -> Self {
        env::var("FORMFLOW_BASE_URL").ok()
                                     .filter(|v| !v.trim().is_empty())
                                     .map(Self::new)
                                     .unwrap_or_default()
    }

    /// `{base}/{token}/{step}`
    pub fn build<K: StepType>(&self, session: &Session<K>, step: K) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), session.token(), step.as_str())
    }
}
