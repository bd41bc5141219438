use crate::core::choices::ChoiceOptions;
use crate::core::ColumnLayout;
use crate::utils::error::{Result, SumLoadError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub columns: ColumnLayout,
    pub choices: ChoiceOptions,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub settings: Option<String>,
    pub error_log: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SumLoadError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SumLoadError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let columns = [
            ("columns.proc", &self.columns.proc),
            ("columns.thick", &self.columns.thick),
            ("columns.width", &self.columns.width),
            ("columns.length", &self.columns.length),
            ("columns.effective_area", &self.columns.effective_area),
            ("columns.done", &self.columns.done),
        ];
        for (field, name) in columns {
            crate::utils::validation::validate_non_empty_string(field, name)?;
        }

        // 篩選欄位與加總欄位不可重複
        let mut names: Vec<&str> = columns[..5].iter().map(|(_, name)| name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(SumLoadError::InvalidConfigValueError {
                field: "columns".to_string(),
                value: pair[0].to_string(),
                reason: "Column is mapped more than once".to_string(),
            });
        }

        if let Some(path) = &self.files.settings {
            crate::utils::validation::validate_path("files.settings", path)?;
        }
        if let Some(path) = &self.files.error_log {
            crate::utils::validation::validate_path("files.error_log", path)?;
        }

        Ok(())
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
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.columns, ColumnLayout::default());
        assert_eq!(config.choices.exclude, vec!["nun", "4"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_columns() {
        let toml_content = r#"
[columns]
effective_area = "Area m2"
done = "Status"

[choices]
exclude = []
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.columns.effective_area, "Area m2");
        assert_eq!(config.columns.done, "Status");
        assert_eq!(config.columns.proc, "Proc.");
        assert!(config.choices.exclude.is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SUMLOAD_TEST_DIR", "/srv/sumload");

        let toml_content = r#"
[files]
settings = "${SUMLOAD_TEST_DIR}/settings.json"
error_log = "${SUMLOAD_TEST_UNDEFINED}/errors.log"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.files.settings.as_deref(), Some("/srv/sumload/settings.json"));
        assert_eq!(
            config.files.error_log.as_deref(),
            Some("${SUMLOAD_TEST_UNDEFINED}/errors.log")
        );

        std::env::remove_var("SUMLOAD_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[columns]
width = "Length"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[columns]\nproc = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[columns]\nproc = \"Process\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.columns.proc, "Process");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(TomlConfig::from_toml_str("[columns\n").is_err());
    }
}
