use std::io;

use arbor_lib::prelude::*;
use clap::{Parser, ValueEnum};
use command::{Outcome, execute, parse, summary};
use env_logger::Env;
use help::help;
use log::{LevelFilter, debug, info};
use report::report_command_error;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};

mod command;
mod help;
mod report;
mod snippets;

/// Evaluates and renders arithmetic expression trees
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for random(), making its values repeatable
    #[arg(long)]
    seed: Option<u64>,

    /// How ties between operators of equal rank are rendered
    #[arg(long, value_enum, default_value_t = StyleArg::Legacy)]
    style: StyleArg,

    /// Log level, overriding RUST_LOG
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Print the sample trees and exit without starting the REPL
    #[arg(long)]
    batch: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Legacy,
    Strict,
}

impl From<StyleArg> for RenderStyle {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::Legacy => RenderStyle::Legacy,
            StyleArg::Strict => RenderStyle::Strict,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

const DEMO: &str = "Sample Trees";
const WELCOME: &str = "Welcome to ARBOR!";
const TIP: &str =
    "Type a command to get started, 'help' if you're unsure what to do, or CTRL+C to exit.";
const PROMPT: &str = "ARBOR +-> ";
const SIDEBAR: &str = "      |   ";
const HISTORY_FILE: &str = ".arbor_history";

fn print_arrowed(banner: &str) {
    let padded = format!(" {banner} ");
    println!("------+-{padded:-<21}->");
}

fn print_sidebarred(text: &str) {
    println!("{SIDEBAR}{text}");
}

fn init_logging(level: Option<LogLevel>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    builder.init();
}

fn to_io(err: ArborError) -> io::Error {
    io::Error::other(err.to_string())
}

fn print_samples(session: &Session) -> Result<()> {
    print_arrowed(DEMO);
    if let Some(summary) = summary(session) {
        print_sidebarred(&summary);
    }
    if let Some(seed) = session.seed() {
        print_sidebarred(&format!("Seed: {seed}"));
    }
    for (_, line) in session.report_samples().map_err(to_io)? {
        print_sidebarred(&line);
    }
    Ok(())
}

/// Returns `false` once the user asks to quit.
fn process_input(session: &mut Session, input: &str) -> Result<bool> {
    let lc_input = input.trim().to_lowercase();
    if lc_input == "help" || lc_input.starts_with("help ") {
        help(&lc_input);
        return Ok(true);
    }

    let command = match parse(input) {
        Ok(command) => command,
        Err(err) => {
            debug!("rejected input {input:?}: {}", err.msg);
            report_command_error(input, &err, true, io::stderr())?;
            return Ok(true);
        }
    };

    match execute(session, command) {
        Ok(Outcome::Lines(lines)) => lines.iter().for_each(|line| print_sidebarred(line)),
        Ok(Outcome::Quit) => return Ok(false),
        Err(err) => print_sidebarred(&format!("Error: {err}")),
    }
    Ok(true)
}

fn repl(mut session: Session) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    #[cfg(feature = "with-file-history")]
    if rl.load_history(HISTORY_FILE).is_err() {
        println!("No previous history.");
    }

    loop {
        let readline = rl.readline(PROMPT);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                if !process_input(&mut session, &line)? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL+C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL+D");
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }

    #[cfg(feature = "with-file-history")]
    if let Err(err) = rl.save_history(HISTORY_FILE) {
        eprintln!("Failed to save history file:");
        eprintln!("{err}");
    };

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let mut session = Session::with_samples()
        .map_err(to_io)?
        .with_style(cli.style.into());
    if let Some(seed) = cli.seed {
        session = session.with_source(arbor_lib::RandomSource::seeded(seed));
    }
    if let Some(seed) = session.seed() {
        info!("random() is seeded with {seed}");
    }

    print_samples(&session)?;
    if cli.batch {
        return Ok(());
    }

    print_arrowed(WELCOME);
    print_sidebarred(TIP);
    repl(session)
}
