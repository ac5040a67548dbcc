//! Client configuration and factory.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use studybuddy_core::traits::{GenerationService, QuestionCount};

use crate::backend::BackendService;

/// Bearer credential issued by the identity service.
///
/// Passed through to the backend untouched. `Debug` masks the value so it
/// never lands in logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(***)")
        }
    }
}

/// Top-level studybuddy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the generation backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Bearer credential for the backend.
    #[serde(default)]
    pub access_token: Credential,
    /// Question count used when none is given.
    #[serde(default)]
    pub default_question_count: QuestionCount,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Output directory for payloads and attempt reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_timeout() -> u64 {
    120
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./studybuddy-results")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            access_token: Credential::default(),
            default_question_count: QuestionCount::default(),
            timeout_secs: default_timeout(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studybuddy.toml` in the current directory
/// 2. `~/.config/studybuddy/config.toml`
///
/// Environment variable overrides: `STUDYBUDDY_BACKEND_URL`, `STUDYBUDDY_ACCESS_TOKEN`.
pub fn load_config() -> Result<ClientConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studybuddy.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClientConfig::default(),
    };

    if let Ok(url) = std::env::var("STUDYBUDDY_BACKEND_URL") {
        config.backend_url = url;
    }
    if let Ok(token) = std::env::var("STUDYBUDDY_ACCESS_TOKEN") {
        config.access_token = Credential::new(token);
    }

    Ok(config)
}

/// Parse a TOML config string and expand `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<ClientConfig> {
    let mut config: ClientConfig = toml::from_str(content)?;
    config.backend_url = resolve_env_vars(&config.backend_url);
    config.access_token = Credential::new(resolve_env_vars(config.access_token.expose()));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studybuddy"))
}

/// Create the backend service from configuration.
pub fn create_service(config: &ClientConfig) -> Result<Box<dyn GenerationService>> {
    anyhow::ensure!(
        !config.access_token.is_empty(),
        "no access token configured; set access_token in studybuddy.toml or STUDYBUDDY_ACCESS_TOKEN"
    );
    let service = BackendService::new(
        &config.backend_url,
        config.access_token.clone(),
        config.timeout_secs,
    )?;
    Ok(Box::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_STUDYBUDDY_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_STUDYBUDDY_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_STUDYBUDDY_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_STUDYBUDDY_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_STUDYBUDDY_TEST_SELF", "${_STUDYBUDDY_TEST_SELF}");
        std::env::set_var("_STUDYBUDDY_TEST_A", "a");
        assert_eq!(
            resolve_env_vars("${_STUDYBUDDY_TEST_SELF}-${_STUDYBUDDY_TEST_A}"),
            "${_STUDYBUDDY_TEST_SELF}-a"
        );
        assert_eq!(resolve_env_vars("${_STUDYBUDDY_TEST_UNSET}x"), "x");
        std::env::remove_var("_STUDYBUDDY_TEST_SELF");
        std::env::remove_var("_STUDYBUDDY_TEST_A");
    }

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.backend_url, "http://localhost:5000");
        assert_eq!(config.default_question_count.get(), 10);
        assert_eq!(config.timeout_secs, 120);
        assert!(config.access_token.is_empty());
    }

    #[test]
    fn parse_full_config() {
        std::env::set_var("_STUDYBUDDY_TEST_TOKEN", "jwt-abc");
        let config = parse_config_str(
            r#"
backend_url = "https://study.example.com"
access_token = "${_STUDYBUDDY_TEST_TOKEN}"
default_question_count = 25
timeout_secs = 30
"#,
        )
        .unwrap();
        std::env::remove_var("_STUDYBUDDY_TEST_TOKEN");

        assert_eq!(config.backend_url, "https://study.example.com");
        assert_eq!(config.access_token.expose(), "jwt-abc");
        assert_eq!(config.default_question_count.get(), 25);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn question_count_out_of_range_in_config() {
        assert!(parse_config_str("default_question_count = 5").is_err());
    }

    #[test]
    fn debug_masks_token() {
        let config = ClientConfig {
            access_token: Credential::new("super-secret"),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/studybuddy.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studybuddy.toml");
        std::fs::write(&path, "backend_url = \"http://backend:9000\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert!(config.backend_url.starts_with("http"));
    }

    #[test]
    fn create_service_requires_token() {
        let err = create_service(&ClientConfig::default()).err().unwrap();
        assert!(err.to_string().contains("no access token"));
    }
}
