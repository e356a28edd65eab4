use crate::utils::error::{BotError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_BASE: &str = "https://api.line.me";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone, Serialize, Deserialize)]
pub struct LineConfig {
    pub channel_access_token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl LineConfig {
    /// 從環境變數讀取頻道金鑰，大寫與小寫名稱都接受
    pub fn from_env() -> Result<Self> {
        let token = env::var("CHANNEL_ACCESS_TOKEN")
            .or_else(|_| env::var("channel_access_token"))
            .ok();
        let channel_access_token = validate_required_field("CHANNEL_ACCESS_TOKEN", &token)?;

        Ok(Self {
            channel_access_token: channel_access_token.clone(),
            api_base: env::var("LINE_API_BASE").unwrap_or_else(|_| default_api_base()),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        })
    }
}

// 不把金鑰印進日誌
impl std::fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineConfig")
            .field("channel_access_token", &"***")
            .field("api_base", &self.api_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Validate for LineConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("line.channel_access_token", &self.channel_access_token)?;
        // 沒被替換掉的 ${VAR} 等於沒有金鑰
        if self.channel_access_token.contains("${") {
            return Err(BotError::MissingConfigError {
                field: "line.channel_access_token".to_string(),
            });
        }
        validate_url("line.api_base", &self.api_base)?;
        validate_range("line.timeout_seconds", self.timeout_seconds, 1, 60)?;
        Ok(())
    }
}
