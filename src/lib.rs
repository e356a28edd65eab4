pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::{BotConfig, LineConfig};

pub use adapters::{ConsoleReplySender, LineReplySender};
pub use self::core::{bot::NoticeBot, formatter::ReplyFormatter, loader::HttpAnnouncementSource};
pub use utils::error::{BotError, Result};
