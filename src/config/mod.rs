#[cfg(feature = "cli")]
pub mod cli;
pub mod line;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use line::LineConfig;
pub use toml_config::BotConfig;
