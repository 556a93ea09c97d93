use crate::core::ConfigProvider;
use crate::domain::model::Category;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range,
    validate_source_location, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SOURCE: &str = "./data/json-database";
pub const DEFAULT_TTL_MINUTES: u64 = 30;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// TTL 與清理間隔的上限（一週）
pub const MAX_CACHE_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    /// 類別 -> 檔名
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    /// 類別 -> (外部拼寫 -> 正式名稱)
    #[serde(default)]
    pub aliases: BTreeMap<String, BTreeMap<String, String>>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_location")]
    pub location: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            timeout_seconds: None,
        }
    }
}

fn default_location() -> String {
    DEFAULT_SOURCE.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_minutes: Option<u64>,
    /// 0 或未設定表示不啟動定期清理
    pub sweep_interval_minutes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LookupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${JYOTISH_DATA_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LookupError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_source_location("source.location", &self.source.location)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(ttl) = self.cache.ttl_minutes {
            validate_range("cache.ttl_minutes", ttl, 1, MAX_CACHE_MINUTES)?;
        }
        if let Some(sweep) = self.cache.sweep_interval_minutes {
            validate_range("cache.sweep_interval_minutes", sweep, 0, MAX_CACHE_MINUTES)?;
        }

        for (category, file_name) in &self.files {
            parse_category(&format!("files.{}", category), category)?;
            validate_non_empty_string(&format!("files.{}", category), file_name)?;
        }

        for (category, pairs) in &self.aliases {
            parse_category(&format!("aliases.{}", category), category)?;
            for (external, canonical) in pairs {
                validate_non_empty_string(&format!("aliases.{}", category), external)?;
                validate_non_empty_string(&format!("aliases.{}.{}", category, external), canonical)?;
            }
        }

        if let Some(format) = self.log_format() {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format) {
                return Err(LookupError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_source(&self) -> &str {
        &self.source.location
    }

    fn cache_ttl(&self) -> Duration {
        minutes(self.cache.ttl_minutes.unwrap_or(DEFAULT_TTL_MINUTES))
    }

    fn sweep_interval(&self) -> Option<Duration> {
        self.cache
            .sweep_interval_minutes
            .filter(|value| *value > 0)
            .map(minutes)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    // 無法辨識的類別已由 validate_config 回報，這裡直接略過
    fn file_name_overrides(&self) -> HashMap<Category, String> {
        self.files
            .iter()
            .filter_map(|(category, name)| Some((category.parse().ok()?, name.clone())))
            .collect()
    }

    fn extra_aliases(&self) -> Vec<(Category, String, String)> {
        let mut aliases = Vec::new();
        for (category, pairs) in &self.aliases {
            let Ok(category) = category.parse::<Category>() else {
                continue;
            };
            for (external, canonical) in pairs {
                aliases.push((category, external.clone(), canonical.clone()));
            }
        }
        aliases
    }
}

fn minutes(value: u64) -> Duration {
    Duration::from_secs(value.saturating_mul(60))
}

fn parse_category(field: &str, raw: &str) -> Result<Category> {
    raw.parse().map_err(|_| LookupError::InvalidConfigValueError {
        field: field.to_string(),
        value: raw.to_string(),
        reason: "Unknown category. Valid categories: nakshatra, tithi, karana, vara, yoga, special_yoga"
            .to_string(),
    })
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
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
location = "https://cdn.example.com/json-database/"
timeout_seconds = 10

[cache]
ttl_minutes = 15
sweep_interval_minutes = 5

[files]
vara = "dias.json"
special_yoga = "special.json"

[aliases.vara]
"Raviwar" = "Ravivara"

[aliases.nakshatra]
"Ashwini Star" = "Aśvinī"

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_source(), "https://cdn.example.com/json-database/");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.cache_ttl(), Duration::from_secs(15 * 60));
        assert_eq!(config.sweep_interval(), Some(Duration::from_secs(5 * 60)));
        assert_eq!(
            config.file_name_overrides().get(&Category::SpecialYoga).map(String::as_str),
            Some("special.json")
        );
        assert_eq!(
            config.extra_aliases(),
            vec![
                (Category::Nakshatra, "Ashwini Star".to_string(), "Aśvinī".to_string()),
                (Category::Vara, "Raviwar".to_string(), "Ravivara".to_string()),
            ]
        );
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.log_format(), Some("json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_empty_config() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.data_source(), DEFAULT_SOURCE);
        assert_eq!(config.cache_ttl(), Duration::from_secs(30 * 60));
        assert_eq!(config.sweep_interval(), None);
        assert!(config.file_name_overrides().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_sweep_interval_disables_sweeper() {
        let config = TomlConfig::from_toml_str("[cache]\nsweep_interval_minutes = 0\n").unwrap();
        assert_eq!(config.sweep_interval(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("JYOTISH_TEST_DATA_URL", "https://test.example.com/db");

        let toml_content = r#"
[source]
location = "${JYOTISH_TEST_DATA_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.location, "https://test.example.com/db");

        std::env::remove_var("JYOTISH_TEST_DATA_URL");
    }

    #[test]
    fn test_unset_variable_is_left_in_place() {
        let toml_content = r#"
[source]
location = "${JYOTISH_TEST_UNSET_VARIABLE}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.location, "${JYOTISH_TEST_UNSET_VARIABLE}");
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = TomlConfig::from_toml_str("[source]\nlocation = \"http://\"\n").unwrap();
        assert!(invalid_url.validate().is_err());

        let zero_ttl = TomlConfig::from_toml_str("[cache]\nttl_minutes = 0\n").unwrap();
        assert!(zero_ttl.validate().is_err());

        let bad_format = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        let error = bad_format.validate().unwrap_err();
        assert!(error.is_config_error());

        let empty_file = TomlConfig::from_toml_str("[files]\nvara = \" \"\n").unwrap();
        assert!(empty_file.validate().is_err());
    }

    #[test]
    fn test_cache_minutes_have_upper_bound() {
        let huge_ttl =
            TomlConfig::from_toml_str("[cache]\nttl_minutes = 200000000000000000\n").unwrap();
        assert!(matches!(
            huge_ttl.validate(),
            Err(LookupError::InvalidConfigValueError { .. })
        ));
        // 驗證前讀取也不會溢位
        assert_eq!(huge_ttl.cache_ttl(), Duration::from_secs(u64::MAX));

        let huge_sweep =
            TomlConfig::from_toml_str("[cache]\nsweep_interval_minutes = 10081\n").unwrap();
        assert!(huge_sweep.validate().is_err());

        let one_week = TomlConfig::from_toml_str(
            "[cache]\nttl_minutes = 10080\nsweep_interval_minutes = 10080\n",
        )
        .unwrap();
        assert!(one_week.validate().is_ok());
    }

    #[test]
    fn test_unknown_category_fails_validation() {
        let config = TomlConfig::from_toml_str("[files]\nweek = \"x.json\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(LookupError::InvalidConfigValueError { .. })
        ));
        assert!(config.file_name_overrides().is_empty());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[source\nlocation = 1");
        assert!(matches!(
            result,
            Err(LookupError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nlocation = \"./other-data\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_source(), "./other-data");
    }
}
