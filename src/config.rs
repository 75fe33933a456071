//! `ExamServer` Config
//!
//! See instructions in `commands.rs` to specify the path to your
//! application's configuration file and/or command-line options
//! for specifying it.

use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use conflate::Merge;
use serde::{Deserialize, Serialize};

use crate::error::{AppResult, ErrorKind};

/// `ExamServer` Configuration
#[derive(Clone, Debug, Deserialize, Serialize, Default, Merge, Parser)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", default)]
pub struct ExamServerConfig {
    /// Server settings
    #[command(flatten)]
    pub server: ConnectionSettings,

    /// Storage settings
    #[command(flatten)]
    pub storage: StorageSettings,

    /// Download settings
    #[command(flatten)]
    pub download: DownloadSettings,
}

/// Overwrite the left value with the right value if the right value is `Some`.
fn overwrite_with_some<T>(left: &mut Option<T>, right: Option<T>) {
    if right.is_some() {
        *left = right;
    }
}

/// `[server]` section
#[derive(Clone, Serialize, Deserialize, Debug, Merge, Parser, Copy)]
#[serde(deny_unknown_fields, default, rename_all = "kebab-case")]
pub struct ConnectionSettings {
    /// IP address and port to bind to
    #[arg(long, env = "EXAM_SERVER_LISTEN")]
    #[merge(strategy = overwrite_with_some)]
    pub listen: Option<SocketAddr>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            listen: Some(default_socket_address()),
        }
    }
}

pub(crate) fn default_socket_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// `[storage]` section
#[derive(Clone, Serialize, Deserialize, Debug, Merge, Parser)]
#[serde(deny_unknown_fields, default, rename_all = "kebab-case")]
pub struct StorageSettings {
    /// Directory that relative exam and answer-key directories are resolved
    /// against (default: the current working directory)
    #[arg(long, env = "EXAM_SERVER_PROJECT_ROOT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[merge(strategy = overwrite_with_some)]
    pub project_root: Option<PathBuf>,

    /// Directory holding the exam papers (default: "../exams")
    #[arg(long, env = "EXAM_SERVER_EXAMS_DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[merge(strategy = overwrite_with_some)]
    pub exams_dir: Option<PathBuf>,

    /// Directory holding the answer keys (default: "../answer_keys")
    #[arg(long, env = "EXAM_SERVER_ANSWER_KEYS_DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[merge(strategy = overwrite_with_some)]
    pub answer_keys_dir: Option<PathBuf>,

    /// Only list files with this extension, e.g. "pdf"
    ///
    /// Files with other extensions can still be downloaded by name.
    #[arg(long, env = "EXAM_SERVER_LIST_EXTENSION")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[merge(strategy = overwrite_with_some)]
    pub list_extension: Option<String>,
}

pub(crate) fn default_exams_dir() -> PathBuf {
    PathBuf::from("../exams")
}

pub(crate) fn default_answer_keys_dir() -> PathBuf {
    PathBuf::from("../answer_keys")
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            project_root: None,
            exams_dir: Some(default_exams_dir()),
            answer_keys_dir: Some(default_answer_keys_dir()),
            list_extension: None,
        }
    }
}

/// How browsers should present a downloaded file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Save the file (`Content-Disposition: attachment`)
    #[default]
    Attachment,
    /// Display the file in the browser (`Content-Disposition: inline`)
    Inline,
}

impl Disposition {
    /// Header token for this disposition
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Inline => "inline",
        }
    }
}

/// `[download]` section
#[derive(Clone, Serialize, Deserialize, Debug, Default, Merge, Parser, Copy)]
#[serde(deny_unknown_fields, default, rename_all = "kebab-case")]
pub struct DownloadSettings {
    /// Content-Disposition of served files [default: attachment]
    #[arg(long, value_enum, env = "EXAM_SERVER_DISPOSITION")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[merge(strategy = overwrite_with_some)]
    pub disposition: Option<Disposition>,
}

impl ExamServerConfig {
    /// Read a TOML configuration file
    pub fn from_file(pth: &Path) -> AppResult<Self> {
        let s = fs::read_to_string(pth)?;

        let config: Self = toml::from_str(&s).map_err(|err| {
            ErrorKind::Config.context(format!(
                "Could not parse file: {} due to {}",
                pth.to_string_lossy(),
                err
            ))
        })?;

        Ok(config)
    }

    /// Write the configuration as TOML
    pub fn to_file(&self, pth: &Path) -> AppResult<()> {
        let toml_string = toml::to_string(&self).map_err(|err| {
            ErrorKind::Config.context(format!(
                "Could not serialize configuration to toml due to {err}"
            ))
        })?;

        fs::write(pth, toml_string)?;

        Ok(())
    }
}
