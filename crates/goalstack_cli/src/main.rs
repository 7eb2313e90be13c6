//! `goals` command-line entry point.
//!
//! # Responsibility
//! - Parse one command, run it through `goalstack_core`, refresh the prompt
//!   indicator and print the resulting status.
//! - Map failures to exit codes: 1 for usage errors, 2 for everything else.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use goalstack_core::config::LOG_LEVEL_ENV;
use goalstack_core::{
    default_log_level, flush_logging, init_logging, render, write_indicator, ConfigError, GoalService,
    GoalStack, GoalsConfig, IndicatorError, JsonFileStore, StoreError,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_USAGE: u8 = 1;
const EXIT_FAILURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "goals",
    version,
    about = "Keep a stack of nested goals and show the current one in your prompt"
)]
struct Cli {
    /// Directory holding goals.json and current_goal.txt [env: GOALS_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Start a new goal nested under the current one.
    Push {
        /// Goal description; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Finish the current goal and return to its parent.
    Pop,
    /// Show the current goal and the goals it belongs to.
    Status,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Push { .. } => "push",
            Self::Pop => "pop",
            Self::Status => "status",
        }
    }
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    Config(ConfigError),
    Store(StoreError),
    Indicator(IndicatorError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(message) => write!(f, "{message}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Indicator(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Usage(_) => None,
            Self::Config(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Indicator(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<IndicatorError> for CliError {
    fn from(value: IndicatorError) -> Self {
        Self::Indicator(value)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return exit_for_parse_error(err),
    };

    let outcome = run(cli);
    flush_logging();
    match outcome {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("goals: {err}");
            if let CliError::Usage(_) = err {
                eprintln!("{}", usage());
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn exit_for_parse_error(err: clap::Error) -> ExitCode {
    let code = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(EXIT_USAGE),
    };
    // clap routes help/version to stdout and errors to stderr.
    let _ = err.print();
    code
}

fn usage() -> String {
    use clap::CommandFactory;
    Cli::command().render_usage().to_string()
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = GoalsConfig::resolve(cli.dir)?;
    start_logging(&config);

    let store = JsonFileStore::new(config.store_path());
    store.ensure_exists()?;
    let service = GoalService::new(store);

    let command_name = cli.command.name();
    let stack = execute(&service, cli.command)?;
    info!("event=cli_command module=cli status=ok command={command_name}");
    let current = stack.current_goal().map_err(StoreError::from)?;
    write_indicator(config.indicator_path(), current)?;
    Ok(render(&stack).map_err(StoreError::from)?)
}

fn execute(
    service: &GoalService<JsonFileStore>,
    command: Command,
) -> Result<GoalStack, CliError> {
    let stack = match command {
        Command::Push { text } => service.push(goal_text(&text)?)?,
        Command::Pop => service.pop()?,
        Command::Status => service.load()?,
    };
    Ok(stack)
}

fn goal_text(words: &[String]) -> Result<String, CliError> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        return Err(CliError::Usage("goal text must not be blank".to_string()));
    }
    Ok(text)
}

fn start_logging(config: &GoalsConfig) {
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &config.log_dir()) {
        eprintln!("goals: logging disabled: {err}");
    }
}
