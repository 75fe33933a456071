//! Runtime context built from the loaded configuration

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use abscissa_core::prelude::{debug, info};

use crate::{
    config::{
        default_answer_keys_dir, default_exams_dir, default_socket_address, Disposition,
        ExamServerConfig, StorageSettings,
    },
    error::{AppResult, ErrorKind},
    storage::{absolute_path, BaseDirs, Storage},
};

/// Everything the web server needs, resolved once from the configuration.
#[derive(Clone, Debug)]
pub struct ServerRuntimeContext<S>
where
    S: Storage,
{
    pub(crate) socket_address: SocketAddr,
    pub(crate) storage: S,
    pub(crate) disposition: Disposition,
}

impl<S> ServerRuntimeContext<S>
where
    S: Storage,
{
    /// Resolve addresses and directories and initialise the storage.
    pub fn from_config(config: Arc<ExamServerConfig>) -> AppResult<Self> {
        let socket_address =
            Self::socket_address(config.server.listen.unwrap_or_else(default_socket_address));

        let dirs = Self::base_dirs(&config.storage)?;

        let storage = Self::init_storage(dirs, config.storage.list_extension.as_deref())?;

        let disposition = config.download.disposition.unwrap_or_default();
        debug!(?disposition, "Loaded download settings.");

        Ok(Self {
            socket_address,
            storage,
            disposition,
        })
    }

    fn socket_address(address: SocketAddr) -> SocketAddr {
        debug!(?address, "Parsed socket address.");

        address
    }

    fn project_root(project_root: Option<PathBuf>) -> AppResult<PathBuf> {
        let project_root = match project_root {
            Some(root) => root,
            None => std::env::current_dir().map_err(|err| {
                ErrorKind::Io.context(format!("Could not determine working directory: `{err}`"))
            })?,
        };

        absolute_path(&project_root)
    }

    fn base_dirs(settings: &StorageSettings) -> AppResult<BaseDirs> {
        let project_root = Self::project_root(settings.project_root.clone())?;

        let dirs = BaseDirs::new(
            &project_root,
            settings.exams_dir.clone().unwrap_or_else(default_exams_dir),
            settings
                .answer_keys_dir
                .clone()
                .unwrap_or_else(default_answer_keys_dir),
        )?;

        info!("Project root: `{}`", project_root.display());

        Ok(dirs)
    }

    fn init_storage(dirs: BaseDirs, list_extension: Option<&str>) -> AppResult<S> {
        let storage = S::init(dirs, list_extension)?;

        debug!(?storage, "Loaded Storage.");

        Ok(storage)
    }

    /// Initialised storage
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
