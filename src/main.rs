mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod util;
use crate::app::App;
use crate::config::{Config, GameConfig};
use crate::util::Globals;
use anyhow::Context;
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use lexopt::{Arg, Parser};
use ratatui::DefaultTerminal;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

const USAGE: &str = "\
Usage: gridsnake [-c|--config FILE]

Steer a snake around a grid, eating food and growing longer.

Options:
  -c, --config FILE   Read configuration from FILE
  -h, --help          Show this help and exit
  -V, --version       Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run { config })
    }
}

fn main() -> ExitCode {
    let r = match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run { config }) => run(config),
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            Ok(())
        }
        Ok(Invocation::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Err(e) => Err(e.into()),
    };
    error_exit(r)
}

fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // An explicitly-given config file must exist; the default one need not.
    let (path, allow_missing) = match config_path {
        Some(p) => (p, false),
        None => (Config::default_path()?, true),
    };
    let config = Config::load(&path, allow_missing)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    logging::init(&config.logging).context("failed to set up logging")?;
    info!(path = %path.display(), ?config.game, "Loaded configuration");
    let terminal = ratatui::init();
    let r = play(terminal, config.game);
    ratatui::restore();
    info!("Exiting");
    r.context("terminal I/O failed")
}

fn play(terminal: DefaultTerminal, config: GameConfig) -> io::Result<()> {
    let mut stdout = io::stdout();
    // Windows consoles always report key releases.
    let enhanced = !cfg!(windows) && supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let release_events = cfg!(windows) || enhanced;
    info!(release_events, "Checked for key release support");
    execute!(stdout, EnableFocusChange)?;
    let r = App::new(Globals {
        config,
        release_events,
    })
    .run(terminal);
    if let Err(e) = execute!(stdout, DisableFocusChange) {
        warn!(error = %e, "Failed to disable focus change reporting");
    }
    if enhanced {
        if let Err(e) = execute!(stdout, PopKeyboardEnhancementFlags) {
            warn!(error = %e, "Failed to pop keyboard enhancement flags");
        }
    }
    r
}

fn error_exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.root_cause()
                .downcast_ref::<io::Error>()
                .is_some_and(|ioe| ioe.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], Invocation::Run { config: None })]
    #[case(&["--config", "snake.toml"], Invocation::Run { config: Some(PathBuf::from("snake.toml")) })]
    #[case(&["-c", "snake.toml"], Invocation::Run { config: Some(PathBuf::from("snake.toml")) })]
    #[case(&["--config=snake.toml"], Invocation::Run { config: Some(PathBuf::from("snake.toml")) })]
    #[case(&["--help"], Invocation::Help)]
    #[case(&["-h", "--bogus"], Invocation::Help)]
    #[case(&["-V"], Invocation::Version)]
    #[case(&["--version"], Invocation::Version)]
    fn parse_args(#[case] args: &[&str], #[case] inv: Invocation) {
        let parser = Parser::from_iter(std::iter::once("gridsnake").chain(args.iter().copied()));
        assert_eq!(Invocation::from_parser(parser).unwrap(), inv);
    }

    #[rstest]
    #[case(&["--bogus"])]
    #[case(&["extra"])]
    #[case(&["--config"])]
    fn parse_bad_args(#[case] args: &[&str]) {
        let parser = Parser::from_iter(std::iter::once("gridsnake").chain(args.iter().copied()));
        assert!(Invocation::from_parser(parser).is_err());
    }

    #[test]
    fn broken_pipe_is_success() {
        let e = anyhow::Error::from(io::Error::from(ErrorKind::BrokenPipe)).context("write failed");
        assert_eq!(error_exit(Err(e)), ExitCode::SUCCESS);
    }
}
