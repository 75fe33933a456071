//! `ExamServer` Subcommands
//!
//! - `serve`: list and serve the exam and answer-key directories
//! - `--version`: print application version
//!
//! See the `impl Configurable` below for how the configuration file is found.

mod serve;

use std::path::PathBuf;

use abscissa_core::{
    config::Override, tracing::info, Command, Configurable, FrameworkError, Runnable,
};
use clap::builder::{
    styling::{AnsiColor, Effects},
    Styles,
};

use crate::{commands::serve::ServeCmd, config::ExamServerConfig};

/// `ExamServer` Configuration Filename
pub const CONFIG_FILE: &str = "exam_server.toml";

/// `ExamServer` Subcommands
#[derive(clap::Parser, Command, Debug, Runnable)]
pub enum ExamServerCmd {
    /// Serve the exam and answer-key directories over HTTP
    Serve(ServeCmd),
}

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Red.on_default() | Effects::BOLD)
        .usage(AnsiColor::Red.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default())
}

/// Entry point for the application. It needs to be a struct to allow using subcommands!
#[derive(clap::Parser, Command, Debug)]
#[command(author, about, name = "exam-server", styles = styles(), version = env!("CARGO_PKG_VERSION"))]
pub struct EntryPoint {
    #[command(subcommand)]
    cmd: ExamServerCmd,

    /// Enable verbose logging
    #[arg(short, long, global = true, env = "EXAM_SERVER_VERBOSE")]
    pub verbose: bool,

    /// Use the specified config file
    #[arg(short, long, global = true, env = "EXAM_SERVER_CONFIG_PATH")]
    pub config: Option<String>,
}

impl Runnable for EntryPoint {
    fn run(&self) {
        self.cmd.run();
    }
}

impl Configurable<ExamServerConfig> for EntryPoint {
    /// Location of the configuration file
    ///
    /// Without `--config` the built-in defaults are used. A given file that
    /// does not exist falls back to `exam_server.toml` in the working directory.
    fn config_path(&self) -> Option<PathBuf> {
        let Some(config) = self.config.as_ref() else {
            info!("No configuration file provided.");
            return None;
        };

        let filename = PathBuf::from(config);

        if filename.exists() {
            info!("Using configuration file: `{filename:?}`");
            Some(filename)
        } else {
            info!("Provided configuration file not found. Trying default.");
            Some(PathBuf::from(CONFIG_FILE))
        }
    }

    /// Command-line options take precedence over the configuration file.
    fn process_config(&self, config: ExamServerConfig) -> Result<ExamServerConfig, FrameworkError> {
        match &self.cmd {
            ExamServerCmd::Serve(cmd) => cmd.override_config(config),
        }
    }
}
