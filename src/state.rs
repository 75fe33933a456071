//! Shared handler state

use std::time::Instant;

use crate::{config::Disposition, context::ServerRuntimeContext, storage::Storage};

/// State shared by all request handlers.
///
/// Immutable after start-up; every request gets its own clone.
#[derive(Debug, Clone)]
pub struct AppState<S: Storage> {
    storage: S,
    disposition: Disposition,
    started_at: Instant,
}

impl<S: Storage> AppState<S> {
    /// State starting its uptime clock now
    pub fn new(storage: S, disposition: Disposition) -> Self {
        Self {
            storage,
            disposition,
            started_at: Instant::now(),
        }
    }

    /// Storage the handlers read from
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// `Content-Disposition` used for downloads
    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// Seconds since the state was created
    pub fn uptime(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl<S: Storage> From<ServerRuntimeContext<S>> for AppState<S> {
    fn from(ctx: ServerRuntimeContext<S>) -> Self {
        Self::new(ctx.storage, ctx.disposition)
    }
}
