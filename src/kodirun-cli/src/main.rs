mod console;
mod startup;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use console::TerminalConsole;
use kodirun_core::{init_logging, AppDirs, Config, LogLevel, LoggingConfig};
use kodirun_nav::Runner;
use startup::{parse_invocation, start_target, PluginSource};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "kodirun", version, about = "Run media-center plugins from the terminal")]
struct Cli {
    /// Plugin executable speaking the JSON-lines protocol (takes precedence over config)
    #[arg(long, global = true, value_name = "EXECUTABLE")]
    plugin: Option<PathBuf>,
    /// Fixture file with canned listings (takes precedence over config)
    #[arg(long, global = true, value_name = "FILE")]
    fixture: Option<PathBuf>,
    /// Config file to use instead of the one in the platform config directory
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a plugin: `run [once|interactive|crawl] [url]`
    Run(RunCommand),
}

#[derive(Debug, Args)]
struct RunCommand {
    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
    /// Optional run mode followed by an optional start url
    #[arg(value_name = "MODE|URL", num_args = 0..=2)]
    args: Vec<String>,
}

impl RunCommand {
    fn apply_log_level(&self, logging: &mut LoggingConfig) {
        if self.quiet {
            logging.level = LogLevel::Warn;
        }
        if self.verbose {
            logging.level = LogLevel::Debug;
        }
    }
}

/// Load the config, returning the file it came from (`None` for built-in defaults).
fn load_config(explicit: Option<&Path>, dirs: &AppDirs) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((Config::load_from(path)?, Some(path.to_path_buf())));
    }
    let path = Config::config_path(dirs);
    let config = Config::load_or_default(dirs)?;
    Ok((config, path.exists().then_some(path)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dirs = AppDirs::discover()?;
    let (mut config, config_source) = load_config(cli.config.as_deref(), &dirs)?;

    match cli.command {
        Command::Run(run) => {
            run.apply_log_level(&mut config.logging);
            let _logging = init_logging(&config.logging, &dirs)?;
            match &config_source {
                Some(path) => tracing::debug!(path = %path.display(), "Loaded config file"),
                None => tracing::debug!("No config file, using defaults"),
            }

            let (mode, url) = parse_invocation(&run.args)?;
            let plugin = PluginSource::resolve(cli.plugin, cli.fixture, &config.plugin)?.load()?;
            let target = start_target(url, &config.plugin, plugin.id());
            tracing::info!(
                plugin_id = %plugin.id(),
                %mode,
                path = %target.path,
                "Starting plugin run"
            );

            let mut runner = Runner::new(plugin, target);
            let mut console = TerminalConsole::stdio();
            kodirun_nav::run(mode, &mut runner, &mut console)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_accepts_mode_and_url() {
        let cli = Cli::try_parse_from([
            "kodirun",
            "--fixture",
            "demo.toml",
            "run",
            "-v",
            "crawl",
            "plugin://plugin.video.demo/",
        ])
        .expect("arguments should parse");
        assert_eq!(cli.fixture.as_deref(), Some(std::path::Path::new("demo.toml")));
        let Command::Run(run) = cli.command;
        assert!(run.verbose);
        assert_eq!(run.args, vec!["crawl", "plugin://plugin.video.demo/"]);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["kodirun", "run", "-q", "-v"]).is_err());
    }

    #[test]
    fn config_source_reports_the_file_used() {
        let root = tempfile::tempdir().unwrap();
        let dirs = AppDirs::under(root.path());

        let (config, source) = load_config(None, &dirs).unwrap();
        assert!(source.is_none());
        assert_eq!(config.logging.level, LoggingConfig::default().level);

        let path = Config::config_path(&dirs);
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let (config, source) = load_config(None, &dirs).unwrap();
        assert_eq!(source.as_deref(), Some(path.as_path()));
        assert_eq!(config.logging.level, LogLevel::Debug);

        let (_, source) = load_config(Some(&path), &dirs).unwrap();
        assert_eq!(source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn log_flags_override_config_level() {
        let mut logging = LoggingConfig::default();
        let run = RunCommand {
            quiet: true,
            verbose: false,
            args: Vec::new(),
        };
        run.apply_log_level(&mut logging);
        assert_eq!(logging.level, LogLevel::Warn);

        let run = RunCommand {
            quiet: false,
            verbose: true,
            args: Vec::new(),
        };
        run.apply_log_level(&mut logging);
        assert_eq!(logging.level, LogLevel::Debug);
    }
}
