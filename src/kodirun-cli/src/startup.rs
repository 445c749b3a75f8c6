use kodirun_core::{Handle, PluginInvoker, PluginSettings, PluginTarget};
use kodirun_nav::{ParseRunModeError, RunMode};
use kodirun_plugin::{ExecPlugin, FixtureError, FixturePlugin, PluginConfig, PluginHostError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no plugin configured; pass --plugin <executable> or --fixture <file>, or set [plugin] in config.toml")]
    NoPlugin,
    #[error("--plugin and --fixture cannot be combined")]
    ConflictingSources,
    #[error(transparent)]
    Mode(#[from] ParseRunModeError),
    #[error("unexpected argument {0:?} after the start url")]
    ExtraArgument(String),
    #[error("failed to start plugin: {0}")]
    Host(#[from] PluginHostError),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Where the plugin comes from, after command-line overrides.
#[derive(Debug, Clone)]
pub enum PluginSource {
    Exec(PluginConfig),
    Fixture(PathBuf),
}

impl PluginSource {
    /// Command-line sources take precedence over the config file.
    pub fn resolve(
        cli_plugin: Option<PathBuf>,
        cli_fixture: Option<PathBuf>,
        settings: &PluginSettings,
    ) -> Result<Self, StartupError> {
        match (cli_plugin, cli_fixture) {
            (Some(_), Some(_)) => Err(StartupError::ConflictingSources),
            (Some(executable), None) => Ok(Self::Exec(PluginConfig::new(executable))),
            (None, Some(fixture)) => Ok(Self::Fixture(fixture)),
            (None, None) => {
                if let Some(fixture) = &settings.fixture {
                    return Ok(Self::Fixture(fixture.clone()));
                }
                if settings.executable.is_some() {
                    return Ok(Self::Exec(PluginConfig::try_from(settings)?));
                }
                Err(StartupError::NoPlugin)
            }
        }
    }

    pub fn load(self) -> Result<Box<dyn PluginInvoker>, StartupError> {
        match self {
            Self::Exec(config) => Ok(Box::new(ExecPlugin::start(config)?)),
            Self::Fixture(path) => Ok(Box::new(FixturePlugin::load(&path)?)),
        }
    }
}

/// Split `[MODE] [URL]` the way `run` accepts them: a leading word that names
/// a mode selects it, anything else is the start url.
pub fn parse_invocation(args: &[String]) -> Result<(RunMode, Option<String>), StartupError> {
    let mut rest = args.iter();
    let mut mode = RunMode::default();
    let mut url = None;

    if let Some(first) = rest.next() {
        match first.parse::<RunMode>() {
            Ok(parsed) => mode = parsed,
            Err(_) if first.contains("://") => url = Some(first.clone()),
            Err(err) => return Err(err.into()),
        }
    }
    if url.is_none() {
        url = rest.next().cloned();
    }
    if let Some(extra) = rest.next() {
        return Err(StartupError::ExtraArgument(extra.clone()));
    }
    Ok((mode, url))
}

/// The start target: explicit url, then the configured one, then `plugin://<id>/`.
pub fn start_target(
    url: Option<String>,
    settings: &PluginSettings,
    plugin_id: &str,
) -> PluginTarget {
    match url.or_else(|| settings.start_url.clone()) {
        Some(path) => PluginTarget::new(path, Handle::default()),
        None => PluginTarget::root_of(plugin_id),
    }
}
