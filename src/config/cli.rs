use crate::config::toml_config::BotConfig;
use crate::domain::model::{Locale, ReplyStyle};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "notice-bot")]
#[command(about = "Query published announcements by date or date range")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Announcement feed URL
    #[arg(long)]
    pub source_url: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, value_enum)]
    pub reply_style: Option<ReplyStyle>,

    #[arg(long, value_enum)]
    pub locale: Option<Locale>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Answer one message, e.g. "2025-06-01~2025-06-11"
    Query { text: String },
    /// Answer each line read from stdin (":reload" refreshes the data, ":quit" exits)
    Repl,
    /// Show a summary of the loaded announcements
    Inspect {
        #[arg(long, default_value = "5")]
        rows: usize,
    },
    /// Answer one message and deliver it through the LINE reply API
    Reply {
        #[arg(long)]
        reply_token: String,
        text: String,
    },
}

impl CliConfig {
    /// 設定檔（或預設值）加上命令列覆蓋
    pub fn resolve(&self) -> Result<BotConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                BotConfig::from_file(path)?
            }
            None => BotConfig::default(),
        };

        if let Some(url) = &self.source_url {
            config.source.url = url.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            config.source.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = timeout;
        }
        if let Some(style) = self.reply_style {
            config.reply.style = style;
        }
        if let Some(locale) = self.locale {
            config.reply.locale = locale;
        }

        Ok(config)
    }
}
