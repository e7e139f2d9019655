mod app;
mod command;
mod config;
mod consts;
mod util;
mod view;
use crate::app::App;
use crate::config::{Config, ConfigError};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use simplelog::{LevelFilter, WriteLogger};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

static USAGE: &str = "\
Usage: gridsnake [options]

Play Snake in the terminal

Options:
  -c, --config <FILE>     Read configuration from the given file
      --rows <N>          Number of rows on the board
      --columns <N>       Number of columns on the board
      --log-file <FILE>   Write debug logs to the given file
  -h, --help              Show this help message and exit
  -V, --version           Show the program version and exit

Steer with the arrow keys, hjkl, or wasd.  Press p to pause, q to quit.
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("rows") => args.rows = Some(parser.value()?.parse()?),
                Arg::Long("columns") => args.columns = Some(parser.value()?.parse()?),
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

/// Settings given on the command line
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    rows: Option<u16>,
    columns: Option<u16>,
    log_file: Option<PathBuf>,
}

impl Arguments {
    /// Load the configuration file and apply the command-line overrides to it
    fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path, false)?,
            None => match Config::default_path() {
                Ok(path) => Config::load(&path, true)?,
                Err(ConfigError::NoPath) => Config::default(),
                Err(e) => return Err(e),
            },
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = Some(log_file);
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env()) {
        Ok(Command::Run(args)) => error_exit(run(args)),
        Ok(Command::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let config = args.into_config()?;
    if let Some(ref path) = config.log_file {
        init_logging(path)?;
    }
    log::debug!("Configuration: {config:?}");
    let app = App::new(&config)?;
    let terminal = ratatui::init();
    let r = app.run(terminal);
    ratatui::restore();
    r.context("terminal I/O failed")
}

/// Send log messages to `path`.  The terminal belongs to the game display, so
/// logs are never written there.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path)?;
    WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), file)
        .context("failed to initialize logger")
}

fn error_exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|ioe| ioe.kind() == io::ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}
