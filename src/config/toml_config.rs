use super::{
    format_bind_address, resolve_token, threshold_from_secs, validate_pending_seconds,
    validate_provider, DEFAULT_PORT,
};
use crate::core::ConfigProvider;
use crate::domain::model::ResultProfile;
use crate::utils::error::{Result, ScanApiError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub scan: ScanConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub enabled: bool,
    pub bearer_token: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bearer_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub pending_seconds: f64,
    pub profile: ResultProfile,
    pub min_endpoints: Option<usize>,
    pub max_endpoints: Option<usize>,
    pub max_risk_factors: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pending_seconds: 5.0,
            profile: ResultProfile::default(),
            min_endpoints: None,
            max_endpoints: None,
            max_risk_factors: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub enforce_account_exists: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScanApiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScanApiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BEARER_TOKEN})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScanApiError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> String {
        format_bind_address(&self.server.host, self.server.port)
    }

    fn bearer_token(&self) -> Option<String> {
        resolve_token(self.auth.enabled, self.auth.bearer_token.as_deref())
    }

    fn pending_threshold(&self) -> Duration {
        threshold_from_secs(self.scan.pending_seconds)
    }

    fn result_profile(&self) -> ResultProfile {
        self.scan.profile
    }

    fn min_endpoints(&self) -> Option<usize> {
        self.scan.min_endpoints
    }

    fn max_endpoints(&self) -> Option<usize> {
        self.scan.max_endpoints
    }

    fn max_risk_factors(&self) -> Option<usize> {
        self.scan.max_risk_factors
    }

    fn enforce_account_exists(&self) -> bool {
        self.registry.enforce_account_exists
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        validate_pending_seconds("scan.pending_seconds", self.scan.pending_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BEARER_TOKEN;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8080

[auth]
bearer_token = "secret"

[scan]
pending_seconds = 2.5
profile = "placeholder"
max_endpoints = 4
max_risk_factors = 3

[registry]
enforce_account_exists = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.bearer_token().as_deref(), Some("secret"));
        assert_eq!(config.pending_threshold(), Duration::from_millis(2500));
        assert_eq!(config.result_profile(), ResultProfile::Placeholder);
        assert_eq!(config.max_endpoints(), Some(4));
        assert!(config.enforce_account_exists());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.bearer_token().as_deref(), Some(DEFAULT_BEARER_TOKEN));
        assert_eq!(config.pending_threshold(), Duration::from_secs(5));
        assert!(!config.enforce_account_exists());
    }

    #[test]
    fn test_auth_can_be_disabled() {
        let config = TomlConfig::from_toml_str("[auth]\nenabled = false\n").unwrap();
        assert_eq!(config.bearer_token(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TROPICO_TEST_TOKEN", "from-env");

        let toml_content = r#"
[auth]
bearer_token = "${TROPICO_TEST_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.bearer_token().as_deref(), Some("from-env"));

        std::env::remove_var("TROPICO_TEST_TOKEN");
    }

    #[test]
    fn test_unresolved_env_var_fails_validation() {
        let toml_content = r#"
[auth]
bearer_token = "${TROPICO_TEST_MISSING_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = TomlConfig::from_toml_str("[scan]\nmax_risk_factors = 40\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[scan]\npending_seconds = -3.0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, ScanApiError::ConfigError { .. }));
    }

    #[test]
    fn test_hostname_bind_address_is_valid() {
        let config = TomlConfig::from_toml_str("[server]\nhost = \"localhost\"\n").unwrap();
        assert_eq!(config.bind_address(), "localhost:5000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_config_loads_with_default_token() {
        let config = TomlConfig::from_toml_str(include_str!("../../config.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.bearer_token().as_deref(), Some(DEFAULT_BEARER_TOKEN));
        assert_eq!(config.pending_threshold(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[server]
port = 6000

[scan]
profile = "domain"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:6000");
        assert_eq!(config.result_profile(), ResultProfile::Domain);
    }
}
