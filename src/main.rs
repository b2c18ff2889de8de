mod app;
mod command;
mod config;
mod consts;
mod game;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::game::Preset;
use crate::warning::Warning;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const USAGE: &str = concat!(
    "Usage: gridsnake [<options>]\n",
    "\n",
    "Play Snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>      Read configuration from the given file\n",
    "      --log-file <PATH>    Write log messages to the given file\n",
    "      --preset <PRESET>    Play by the given rules [classic, arcade]\n",
    "  -h, --help               Display this help message and exit\n",
    "  -V, --version            Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("preset") => args.preset = Some(parser.value()?.parse::<Preset>()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    preset: Option<Preset>,
}

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(Cli::Run(args)) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("gridsnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Cli::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Cli::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let (config, config_err) = match load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Some(path) = args.log_file.as_ref().or(config.log_file.as_ref()) {
        init_logging(path)?;
    }
    let warning = config_err.map(|e| {
        tracing::warn!(error = ?e, "failed to load configuration; using defaults");
        Warning::from_error(&e, Some("Using default settings."))
    });
    let settings = config.settings(args.preset);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        preset = %settings.preset,
        fps = settings.fps.get(),
        "starting gridsnake"
    );
    let terminal = ratatui::init();
    let r = App::new(settings, warning).run(terminal);
    ratatui::restore();
    r?;
    tracing::info!("exiting");
    Ok(())
}

/// Load the configuration file at `path`, or at the default location if
/// `path` is `None`.  Only a missing default file is ignored.
fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    match path {
        Some(p) => Config::load(p, false),
        None => Config::load(&Config::default_path()?, true),
    }
}

/// Send log messages to the file at `path`.  The filter is taken from
/// `RUST_LOG`, defaulting to `info`.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}
