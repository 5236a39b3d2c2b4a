//! Runtime configuration, read from `ANISE_*` environment variables.

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{builtins::Registry, context::Context};

/// Default limit on nested `map`/`filter` re-entries.
pub const DEFAULT_MAX_NESTING: usize = 16;

pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub max_nesting_depth: usize,
    /// Present only when an API key is configured.
    pub completion: Option<CompletionConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_nesting_depth: DEFAULT_MAX_NESTING,
            completion: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_nesting_depth = match lookup("ANISE_MAX_NESTING") {
            Some(value) => parse_var("ANISE_MAX_NESTING", value)?,
            None => DEFAULT_MAX_NESTING,
        };

        let completion = match lookup("ANISE_COMPLETION_API_KEY").filter(|key| !key.is_empty()) {
            Some(api_key) => {
                let timeout_secs = match lookup("ANISE_COMPLETION_TIMEOUT_SECS") {
                    Some(value) => parse_var("ANISE_COMPLETION_TIMEOUT_SECS", value)?,
                    None => DEFAULT_COMPLETION_TIMEOUT_SECS,
                };
                Some(CompletionConfig {
                    api_key,
                    endpoint: lookup("ANISE_COMPLETION_ENDPOINT")
                        .unwrap_or_else(|| DEFAULT_COMPLETION_ENDPOINT.to_string()),
                    model: lookup("ANISE_COMPLETION_MODEL")
                        .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        Ok(Config {
            max_nesting_depth,
            completion,
        })
    }

    /// Standard registry, with the HTTP completion client installed when one
    /// is configured.
    pub fn registry(&self) -> Registry {
        let registry = Registry::standard();
        match &self.completion {
            #[cfg(feature = "completion")]
            Some(completion) => {
                let client = crate::completion::HttpCompletionClient::new(completion.clone());
                registry.with_completion_service(Arc::new(client))
            }
            _ => registry,
        }
    }

    /// Empty context over [`Config::registry`] with the configured nesting limit.
    pub fn context(&self) -> Context {
        Context::with_registry(Arc::new(self.registry())).with_max_depth(self.max_nesting_depth)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_completion_enabled_by_key() {
        let config = Config::from_lookup(lookup(&[
            ("ANISE_COMPLETION_API_KEY", "sk-test"),
            ("ANISE_COMPLETION_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        let completion = config.completion.unwrap();
        assert_eq!(completion.endpoint, DEFAULT_COMPLETION_ENDPOINT);
        assert_eq!(completion.model, DEFAULT_COMPLETION_MODEL);
        assert_eq!(completion.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_nesting() {
        let err = Config::from_lookup(lookup(&[("ANISE_MAX_NESTING", "deep")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value 'deep' for ANISE_MAX_NESTING");
    }

    #[test]
    fn test_context_uses_limit() {
        let config = Config {
            max_nesting_depth: 0,
            completion: None,
        };
        let result = crate::pipeline::evaluate(&config.context(), r#"map(int[1], "_x")"#);
        assert!(matches!(
            result,
            Err(crate::Error::Eval(crate::EvalError::NestingLimit(0)))
        ));
    }
}
