//! Command-line argument parsing for the session runner
//!
//! Supports:
//! - Loading a document snapshot from JSON
//! - An explicit config file instead of the per-user one
//! - Writing the edited document back out when the session ends
//! - Writing a default config file and exiting

use clap::Parser;
use std::path::PathBuf;

/// Find, replace and bulk-edit text in a design document
#[derive(Parser, Debug)]
#[command(
    name = "bulktext",
    version,
    about = "Find, replace and bulk-edit text in a design document"
)]
pub struct CliArgs {
    /// Document snapshot (JSON) to edit
    #[arg(value_name = "DOCUMENT")]
    pub document: Option<PathBuf>,

    /// Read settings from this file instead of the user config
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the edited document here when the session ends
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    pub init_config: bool,
}

/// What the process should do
#[derive(Debug, Clone)]
pub enum StartupMode {
    /// Run a session over the given document
    Session {
        document: PathBuf,
        output: Option<PathBuf>,
    },
    /// Write a default config file
    InitConfig,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    /// Explicit config path, if any
    pub config_path: Option<PathBuf>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mode = if self.init_config {
            StartupMode::InitConfig
        } else {
            let document = self
                .document
                .ok_or_else(|| "A document path is required".to_string())?;
            if document.is_dir() {
                return Err(format!("{} is a directory", document.display()));
            }
            StartupMode::Session {
                document,
                output: self.output,
            }
        };

        Ok(StartupConfig {
            mode,
            config_path: self.config,
        })
    }
}
