//! `ExamServer` Abscissa Application

use abscissa_core::{
    application::{self, AppCell},
    config::{self, CfgCell},
    trace, Application, FrameworkError, StandardPaths,
};
use abscissa_tokio::TokioComponent;

use crate::{commands::EntryPoint, config::ExamServerConfig};

/// Application state
pub static EXAM_SERVER_APP: AppCell<ExamServerApp> = AppCell::new();

/// `ExamServer` Application
#[derive(Debug)]
pub struct ExamServerApp {
    config: CfgCell<ExamServerConfig>,
    state: application::State<Self>,
}

/// No configuration loaded and no components registered yet.
impl Default for ExamServerApp {
    fn default() -> Self {
        Self {
            config: CfgCell::default(),
            state: application::State::default(),
        }
    }
}

impl Application for ExamServerApp {
    type Cmd = EntryPoint;
    type Cfg = ExamServerConfig;
    type Paths = StandardPaths;

    fn config(&self) -> config::Reader<ExamServerConfig> {
        self.config.read()
    }

    fn state(&self) -> &application::State<Self> {
        &self.state
    }

    /// Framework components plus the tokio runtime used by `serve`
    fn register_components(&mut self, command: &Self::Cmd) -> Result<(), FrameworkError> {
        let mut components = self.framework_components(command)?;
        components.push(Box::new(TokioComponent::new()?));
        self.state.components_mut().register(components)
    }

    fn after_config(&mut self, config: Self::Cfg) -> Result<(), FrameworkError> {
        self.state.components_mut().after_config(&config)?;
        self.config.set_once(config);
        Ok(())
    }

    /// `-v` switches to verbose tracing output
    fn tracing_config(&self, command: &EntryPoint) -> trace::Config {
        if command.verbose {
            trace::Config::verbose()
        } else {
            trace::Config::default()
        }
    }
}
