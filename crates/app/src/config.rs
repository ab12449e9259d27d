use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/spendbook.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: String,
    pub timezone: String,
    pub currency_symbol: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            currency_symbol: engine::DEFAULT_CURRENCY_SYMBOL.to_string(),
            level: "error".to_string(),
        }
    }
}

impl AppConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Timezone(self.timezone.clone()))
    }
}

#[derive(Debug, Parser)]
#[command(name = "spendbook", disable_version_flag = true)]
#[command(about = "Personal expense log and keypad calculator")]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,
    /// Answer yes to every confirmation prompt.
    #[arg(short, long, global = true)]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct Overrides {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override the directory entries are stored in.
    #[arg(long, global = true)]
    data_dir: Option<String>,
    /// Override timezone used for day grouping (IANA name).
    #[arg(long, global = true)]
    timezone: Option<String>,
    /// Override log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Home(HomeCommand),
    /// Evaluate an expression, or open the keypad when none is given.
    Calc { expression: Option<String> },
}

#[derive(Debug, Subcommand)]
pub enum HomeCommand {
    /// Record an expense dated now.
    Add { name: String, cost: String },
    /// Show entries grouped by day, most recent first.
    List {
        /// Only entries whose name contains this text (case-insensitive).
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Delete one entry by id (a unique prefix is enough).
    Remove { id: String },
    /// Delete every entry.
    Clear,
    /// Copy the grouped entries as text to stdout, or to a file.
    Export {
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl HomeCommand {
    /// Whether the command writes back the collection it loaded.
    pub fn rewrites_log(&self) -> bool {
        matches!(self, Self::Add { .. } | Self::Remove { .. })
    }
}

pub fn load(overrides: Overrides) -> Result<AppConfig> {
    let config_path = overrides.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPENDBOOK"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_dir) = overrides.data_dir {
        settings.data_dir = data_dir;
    }
    if let Some(timezone) = overrides.timezone {
        settings.timezone = timezone;
    }
    if let Some(level) = overrides.level {
        settings.level = level;
    }

    // fail early rather than on the first grouped view
    settings.timezone()?;
    Ok(settings)
}
