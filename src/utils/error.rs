use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Failed to fetch announcements from {url}: {message}")]
    FetchError { url: String, message: String },

    #[error("Announcement data parse error: {message}")]
    ParseError { message: String },

    #[error("Unrecognised date: {input:?}")]
    DateParseError { input: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Reply delivery failed with status {status}: {message}")]
    DeliveryError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::FetchError { .. } | BotError::ApiError(_) | BotError::DeliveryError { .. } => {
                ErrorCategory::Network
            }
            BotError::ParseError { .. } | BotError::SerializationError(_) => ErrorCategory::Data,
            BotError::DateParseError { .. } => ErrorCategory::Input,
            BotError::ConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BotError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者輸入錯誤在分派層就會被攔下
            BotError::DateParseError { .. } => ErrorSeverity::Low,
            BotError::DeliveryError { .. } | BotError::ApiError(_) => ErrorSeverity::Medium,
            BotError::ConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::MissingConfigError { .. } => ErrorSeverity::High,
            // 啟動時載入失敗是致命的
            BotError::FetchError { .. }
            | BotError::ParseError { .. }
            | BotError::SerializationError(_)
            | BotError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::FetchError { url, .. } => format!("無法從 {} 取得公告資料", url),
            BotError::ParseError { .. } | BotError::SerializationError(_) => {
                "公告資料格式不符預期".to_string()
            }
            BotError::DateParseError { input } => format!("無法辨識的日期：{}", input),
            BotError::ApiError(_) => "網路請求失敗".to_string(),
            BotError::IoError(_) => "讀寫檔案時發生錯誤".to_string(),
            BotError::ConfigError { message } => format!("設定錯誤：{}", message),
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值 {} 無效：{}", field, reason)
            }
            BotError::MissingConfigError { field } => format!("缺少必要設定：{}", field),
            BotError::DeliveryError { status, .. } => format!("訊息傳送失敗 (HTTP {})", status),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "確認網路連線與來源網址是否可用，稍後再試",
            ErrorCategory::Data => "確認來源網址回傳的是公告 JSON，並檢查標題與日期欄位名稱設定",
            ErrorCategory::Input => "請以 YYYY-MM-DD 或 YYYY-MM-DD~YYYY-MM-DD 格式輸入日期",
            ErrorCategory::Configuration => "檢查命令列參數、設定檔與環境變數",
            ErrorCategory::System => "確認檔案路徑存在且具有讀取權限",
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
