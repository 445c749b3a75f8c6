use crate::console::Console;
use crate::crawl::crawl;
use crate::error::NavError;
use crate::interactive::interactive;
use crate::runner::{once, Runner};
use kodirun_core::PluginInvoker;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a plugin run is driven. Exactly one mode runs per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Fetch and display the start listing, then exit.
    #[default]
    Once,
    Interactive,
    Crawl,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown run mode {0:?} (expected once, interactive or crawl)")]
pub struct ParseRunModeError(pub String);

impl FromStr for RunMode {
    type Err = ParseRunModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "once" => Ok(RunMode::Once),
            "interactive" => Ok(RunMode::Interactive),
            "crawl" => Ok(RunMode::Crawl),
            _ => Err(ParseRunModeError(s.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunMode::Once => "once",
            RunMode::Interactive => "interactive",
            RunMode::Crawl => "crawl",
        };
        f.write_str(name)
    }
}

/// Dispatch to the handler for `mode`.
pub fn run<P: PluginInvoker, C: Console + ?Sized>(
    mode: RunMode,
    runner: &mut Runner<P>,
    console: &mut C,
) -> Result<(), NavError> {
    tracing::info!(%mode, path = %runner.target().path, "Running plugin");
    match mode {
        RunMode::Once => once(runner, console).map(|_| ()),
        RunMode::Interactive => interactive(runner, console),
        RunMode::Crawl => crawl(runner, console).map(|_| ()),
    }
}
