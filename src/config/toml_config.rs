use crate::config::line::LineConfig;
use crate::core::formatter::MAX_CAROUSEL_CARDS;
use crate::core::ConfigProvider;
use crate::domain::model::{Locale, ReplyStyle};
use crate::utils::error::{BotError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_SOURCE_URL: &str = "https://www.fda.gov.tw/DataAction";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TITLE_FIELD: &str = "標題";
pub const DEFAULT_DATE_FIELD: &str = "發布日期";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env placeholder pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
    pub line: Option<LineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub title_field: String,
    pub date_field: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 30,
            title_field: DEFAULT_TITLE_FIELD.to_string(),
            date_field: DEFAULT_DATE_FIELD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    pub style: ReplyStyle,
    pub locale: Locale,
    pub max_cards: usize,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            style: ReplyStyle::default(),
            locale: Locale::default(),
            max_cards: MAX_CAROUSEL_CARDS,
        }
    }
}

impl BotConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| BotError::ConfigError {
                message: format!("cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CHANNEL_ACCESS_TOKEN})；未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 回覆用的 LINE 設定；設定檔沒有就讀環境變數
    pub fn line_config(&self) -> Result<LineConfig> {
        let config = match &self.line {
            Some(line) => line.clone(),
            None => LineConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl ConfigProvider for BotConfig {
    fn source_url(&self) -> &str {
        &self.source.url
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds
    }

    fn title_field(&self) -> &str {
        &self.source.title_field
    }

    fn date_field(&self) -> &str {
        &self.source.date_field
    }

    fn reply_style(&self) -> ReplyStyle {
        self.reply.style
    }

    fn locale(&self) -> Locale {
        self.reply.locale
    }

    fn max_cards(&self) -> usize {
        self.reply.max_cards
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.url", &self.source.url)?;
        validate_non_empty_string("source.user_agent", &self.source.user_agent)?;
        validate_range("source.timeout_seconds", self.source.timeout_seconds, 1, 300)?;
        validate_non_empty_string("source.title_field", &self.source.title_field)?;
        validate_non_empty_string("source.date_field", &self.source.date_field)?;
        validate_range("reply.max_cards", self.reply.max_cards, 1, MAX_CAROUSEL_CARDS)?;

        if let Some(line) = &self.line {
            line.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorSeverity;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
url = "https://example.com/feed"
user_agent = "notice-bot/0.1"
timeout_seconds = 10
title_field = "title"
date_field = "published"

[reply]
style = "cards"
locale = "en"
max_cards = 5

[line]
channel_access_token = "abc"
"#;

        let config = BotConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source_url(), "https://example.com/feed");
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.title_field(), "title");
        assert_eq!(config.reply_style(), ReplyStyle::Cards);
        assert_eq!(config.locale(), Locale::En);
        assert_eq!(config.max_cards(), 5);
        let line = config.line.as_ref().unwrap();
        assert_eq!(line.api_base, "https://api.line.me");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BotConfig::from_toml_str("").unwrap();

        assert_eq!(config.source_url(), DEFAULT_SOURCE_URL);
        assert_eq!(config.user_agent(), "Mozilla/5.0");
        assert_eq!(config.title_field(), "標題");
        assert_eq!(config.date_field(), "發布日期");
        assert_eq!(config.reply_style(), ReplyStyle::Text);
        assert_eq!(config.locale(), Locale::ZhTw);
        assert_eq!(config.max_cards(), 10);
        assert!(config.line.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NOTICE_BOT_TEST_TOKEN", "token-from-env");

        let toml_content = r#"
[line]
channel_access_token = "${NOTICE_BOT_TEST_TOKEN}"
"#;

        let config = BotConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.line.unwrap().channel_access_token,
            "token-from-env"
        );

        std::env::remove_var("NOTICE_BOT_TEST_TOKEN");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = BotConfig::from_toml_str("[source]\nurl = \"invalid-url\"").unwrap();
        assert!(bad_url.validate().is_err());

        let too_many_cards = BotConfig::from_toml_str("[reply]\nmax_cards = 12").unwrap();
        assert!(too_many_cards.validate().is_err());

        let zero_timeout = BotConfig::from_toml_str("[source]\ntimeout_seconds = 0").unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let err = BotConfig::from_toml_str("[reply]\nstyle = \"html\"").unwrap_err();
        assert!(matches!(err, BotError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[reply]\nlocale = \"en\"\n")
            .unwrap();

        let config = BotConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.locale(), Locale::En);
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BotConfig::from_file(dir.path().join("absent.toml")).unwrap_err();

        assert!(matches!(err, BotError::ConfigError { ref message } if message.contains("absent.toml")));
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_unresolved_token_placeholder_is_rejected() {
        let toml_content = r#"
[line]
channel_access_token = "${NOTICE_BOT_UNSET_TOKEN}"
"#;

        let config = BotConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            BotError::MissingConfigError { .. }
        ));
        assert!(matches!(
            config.line_config().unwrap_err(),
            BotError::MissingConfigError { .. }
        ));
    }
}
