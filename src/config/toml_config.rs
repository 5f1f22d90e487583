use crate::config::{CliConfig, DEFAULT_SALON_NAME, DEFAULT_STORE_PATH};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SalonError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub salon: SalonSection,
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonSection {
    #[serde(default = "default_salon_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_salon_name() -> String {
    DEFAULT_SALON_NAME.to_string()
}

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

impl Default for SalonSection {
    fn default() -> Self {
        Self {
            name: default_salon_name(),
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SalonError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SalonError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SALON_STORE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SalonError::ConfigError {
            message: format!("env var pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("salon.name", &self.salon.name)?;
        validation::validate_path("store.path", &self.store.path)?;
        Ok(())
    }

    /// 應用命令列覆蓋設定
    pub fn apply_overrides(&mut self, cli: &CliConfig) {
        if let Some(store) = &cli.store {
            self.store.path = store.clone();
            tracing::info!("🔧 Store path overridden to: {}", store);
        }
        if let Some(name) = &cli.salon_name {
            self.salon.name = name.clone();
            tracing::info!("🔧 Salon name overridden to: {}", name);
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn store_path(&self) -> &str {
        &self.store.path
    }

    fn salon_name(&self) -> &str {
        &self.salon.name
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[salon]
name = "Cut & Curl"

[store]
path = "./data/accounts.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.salon_name(), "Cut & Curl");
        assert_eq!(config.store_path(), "./data/accounts.txt");
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.salon_name(), DEFAULT_SALON_NAME);
        assert_eq!(config.store_path(), DEFAULT_STORE_PATH);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_SALON_STORE", "/tmp/salon-users.txt");

        let toml_content = r#"
[store]
path = "${TEST_SALON_STORE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store_path(), "/tmp/salon-users.txt");

        std::env::remove_var("TEST_SALON_STORE");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[salon]
name = "   "
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_replace_file_values() {
        let mut config = TomlConfig::from_toml_str("").unwrap();
        let cli = CliConfig {
            config: None,
            store: Some("elsewhere.txt".to_string()),
            salon_name: Some("Shear Genius".to_string()),
            verbose: false,
        };

        config.apply_overrides(&cli);

        assert_eq!(config.store_path(), "elsewhere.txt");
        assert_eq!(config.salon_name(), "Shear Genius");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[salon]
name = "File Test Salon"
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.salon_name(), "File Test Salon");
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let result = TomlConfig::from_toml_str("[salon\nname = ");
        assert!(matches!(
            result,
            Err(SalonError::ConfigValidationError { .. })
        ));
    }
}
