//! `serve` subcommand

use std::time::Duration;

use abscissa_core::{
    config::Override,
    status_err,
    tracing::{debug, info},
    Application, Command, FrameworkError, Runnable, Shutdown,
};
use clap::Parser;
use conflate::Merge;

use crate::{
    config::ExamServerConfig, context::ServerRuntimeContext, error::AppResult,
    prelude::EXAM_SERVER_APP, storage::LocalStorage, web::start_web_server,
};

/// Delay after which the server stops on its own when `CI` is set
const CI_SHUTDOWN_DELAY: Duration = Duration::from_secs(3);

/// `serve` subcommand
#[derive(Command, Debug, Parser)]
pub struct ServeCmd {
    /// Server settings
    #[clap(flatten)]
    context: ExamServerConfig,
}

impl Override<ExamServerConfig> for ServeCmd {
    fn override_config(
        &self,
        mut config: ExamServerConfig,
    ) -> Result<ExamServerConfig, FrameworkError> {
        debug!(?config, "ExamServerConfig before merge.");
        debug!(?self.context, "Command context from CLI.");

        // Values given on the command line (or through the environment) win
        config.merge(self.context.clone());

        Ok(config)
    }
}

impl Runnable for ServeCmd {
    /// Start the application.
    fn run(&self) {
        if let Err(tokio_err) = abscissa_tokio::run(&EXAM_SERVER_APP, async {
            if let Err(err) = self.inner_run().await {
                status_err!("{}", err);
                EXAM_SERVER_APP.shutdown(Shutdown::Crash);
            }
        }) {
            status_err!("{}", tokio_err);
            EXAM_SERVER_APP.shutdown(Shutdown::Crash);
        };
    }
}

impl ServeCmd {
    pub async fn inner_run(&self) -> AppResult<()> {
        let server_config = EXAM_SERVER_APP.config();

        debug!(?server_config, "Loaded ExamServerConfig.");

        let runtime_ctx: ServerRuntimeContext<LocalStorage> =
            ServerRuntimeContext::from_config(server_config.clone())?;

        start_web_server(runtime_ctx, shutdown_signal()).await?;

        info!("Shutting down gracefully ...");

        Ok(())
    }
}

/// Resolves on Ctrl-C, or after a short delay if the `CI` environment
/// variable is set so the binary can be exercised in acceptance tests.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            status_err!("could not listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    if std::env::var("CI").is_ok() {
        tokio::select! {
            () = ctrl_c => {},
            () = tokio::time::sleep(CI_SHUTDOWN_DELAY) => {},
        }
    } else {
        ctrl_c.await;
    }
}
