use crate::domain::model::{ScheduleDefinition, ScheduleDocument, WeekEntry};
use crate::utils::error::{Result, SyllabusError};
use crate::utils::validation::{validate_required_fields, Validate};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use toml::{Table, Value};

pub const REQUIRED_SECTIONS: &[&str] = &["instructor", "course", "schedule"];

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// 課程講義配置 (保持檔案中的鍵順序)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyllabusConfig {
    pub table: Table,
}

impl SyllabusConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SyllabusError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);
        let table: Table = toml::from_str(&processed_content)?;
        Ok(Self { table })
    }

    /// 取得 `[schedule]` 區段並轉成產生器的輸入
    pub fn schedule_definition(&self) -> Result<ScheduleDefinition> {
        let section = self
            .table
            .get("schedule")
            .ok_or_else(|| SyllabusError::MissingRequiredField {
                fields: vec!["schedule".to_string()],
            })?;

        section
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| SyllabusError::ConfigError {
                message: format!("[schedule] section is invalid: {}", e.message()),
            })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.table.get(key)
    }
}

impl Validate for SyllabusConfig {
    fn validate(&self) -> Result<()> {
        validate_required_fields(&self.table, REQUIRED_SECTIONS)
    }
}

impl ScheduleDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SyllabusError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 每個頂層表格是一週，依檔案中的順序排列
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: Table = toml::from_str(content)?;
        let mut weeks = Vec::with_capacity(table.len());

        for (id, value) in table {
            if !value.is_table() {
                return Err(SyllabusError::InvalidConfigValueError {
                    field: id,
                    value: value.to_string(),
                    reason: "each schedule entry must be a week table".to_string(),
                });
            }

            let mut week: WeekEntry =
                value
                    .try_into()
                    .map_err(|e: toml::de::Error| SyllabusError::ConfigError {
                        message: format!("[{}] is not a valid week: {}", id, e.message()),
                    })?;
            week.id = id;
            weeks.push(week);
        }

        Ok(Self { weeks })
    }
}

/// 替換環境變數 (例如 ${INSTRUCTOR_EMAIL})；不存在的變數保持原文
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}
