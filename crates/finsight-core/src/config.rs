//! Runtime settings read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `FINSIGHT_POLYGON_API_KEY` | `demo` |
//! | `FINSIGHT_POLYGON_BASE_URL` | `https://api.polygon.io` |
//! | `FINSIGHT_HF_TOKEN` | empty, no auth header |
//! | `FINSIGHT_INFERENCE_URL` | hosted Mixtral text-generation endpoint |
//! | `FINSIGHT_MODEL` | `mistralai/Mixtral-8x7B-Instruct-v0.1` |
//! | `FINSIGHT_TIMEOUT_MS` | `10000` |

use std::fmt::{Debug, Formatter};

use crate::ValidationError;

pub const DEFAULT_POLYGON_BASE_URL: &str = "https://api.polygon.io";
pub const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mixtral-8x7B-Instruct-v0.1";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub polygon_api_key: String,
    pub polygon_base_url: String,
    pub inference_token: String,
    pub inference_url: String,
    pub model: String,
    pub timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            polygon_api_key: String::from("demo"),
            polygon_base_url: String::from(DEFAULT_POLYGON_BASE_URL),
            inference_token: String::new(),
            inference_url: String::from(DEFAULT_INFERENCE_URL),
            model: String::from(DEFAULT_MODEL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source; unset or blank values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let timeout_ms = match read("FINSIGHT_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ValidationError::InvalidSetting {
                    name: "FINSIGHT_TIMEOUT_MS",
                    value: raw,
                })?,
            None => defaults.timeout_ms,
        };

        Ok(Self {
            polygon_api_key: read("FINSIGHT_POLYGON_API_KEY").unwrap_or(defaults.polygon_api_key),
            polygon_base_url: read("FINSIGHT_POLYGON_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.polygon_base_url),
            inference_token: read("FINSIGHT_HF_TOKEN").unwrap_or(defaults.inference_token),
            inference_url: read("FINSIGHT_INFERENCE_URL").unwrap_or(defaults.inference_url),
            model: read("FINSIGHT_MODEL").unwrap_or(defaults.model),
            timeout_ms,
        })
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl Debug for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("polygon_api_key", &"<redacted>")
            .field("polygon_base_url", &self.polygon_base_url)
            .field("inference_token", &"<redacted>")
            .field("inference_url", &self.inference_url)
            .field("model", &self.model)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn overrides_are_applied_and_base_url_is_normalized() {
        let settings = Settings::from_lookup(lookup(&[
            ("FINSIGHT_POLYGON_API_KEY", "key-1"),
            ("FINSIGHT_POLYGON_BASE_URL", "http://localhost:9000/"),
            ("FINSIGHT_TIMEOUT_MS", "250"),
        ]))
        .expect("valid");

        assert_eq!(settings.polygon_api_key, "key-1");
        assert_eq!(settings.polygon_base_url, "http://localhost:9000");
        assert_eq!(settings.timeout_ms, 250);
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = Settings::from_lookup(lookup(&[("FINSIGHT_TIMEOUT_MS", "0")]))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSetting { .. }));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let settings = Settings {
            polygon_api_key: String::from("super-secret"),
            ..Settings::default()
        };
        assert!(!format!("{settings:?}").contains("super-secret"));
    }
}
