//! task-triage binary: one-shot subcommands plus an interactive session.

use std::io::Write;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use task_triage::client::{HttpPrioritizer, Strategy};
use task_triage::config::Config;
use task_triage::input::sample_json;
use task_triage::render::{write_status, write_view};
use task_triage::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "task-triage",
    about = "Send a batch of tasks to the prioritization service and view the scored results",
    version
)]
struct Args {
    /// Base URL of the prioritization service; defaults to $TASK_TRIAGE_URL
    /// or the local development server.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a batch with a chosen strategy and show the ranked cards.
    Analyze {
        /// Scoring strategy passed through to the service.
        #[arg(long, default_value_t = Strategy::Default)]
        strategy: Strategy,

        /// Read the batch from this file, or stdin when FILE is '-'.
        /// Defaults to the built-in sample batch.
        #[arg(long, value_name = "FILE")]
        input: Option<String>,
    },

    /// Ask the service for its top picks and a summary line.
    Suggest {
        /// Read the batch from this file, or stdin when FILE is '-'.
        /// Defaults to the built-in sample batch.
        #[arg(long, value_name = "FILE")]
        input: Option<String>,
    },

    /// Print the built-in sample batch as JSON.
    Sample,

    /// Start an interactive session.
    Repl,
}

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            1
        }
    };
    std::process::exit(exit);
}

async fn real_main() -> anyhow::Result<i32> {
    let args = Args::parse();
    init_tracing();

    let config = Config::resolve(args.base_url.as_deref())?;
    tracing::debug!("using service at {}", config.base_url);

    let client = HttpPrioritizer::new(config.base_url.clone());
    let mut session = Session::new(Box::new(client));

    match args.command {
        Command::Sample => {
            println!("{}", sample_json());
            Ok(0)
        }
        Command::Analyze { strategy, input } => {
            seed_input(&mut session, input.as_deref())?;
            session.analyze(strategy).await;
            print_outcome(&session)
        }
        Command::Suggest { input } => {
            seed_input(&mut session, input.as_deref())?;
            session.suggest().await;
            print_outcome(&session)
        }
        Command::Repl => {
            repl(&mut session).await?;
            Ok(0)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}

/// Fill the session's input from a file, stdin, or the sample batch.
fn seed_input(session: &mut Session, input: Option<&str>) -> anyhow::Result<()> {
    match input {
        None => session.load_sample(),
        Some("-") => {
            let text = std::io::read_to_string(std::io::stdin()).context("reading stdin")?;
            session.set_input(text);
        }
        Some(path) => {
            let text =
                std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            session.set_input(text);
        }
    }
    Ok(())
}

/// Print the current view to stdout and the status line to stderr. Returns
/// the process exit code: one-shot actions report failure through it.
fn print_outcome(session: &Session) -> anyhow::Result<i32> {
    if let Some(view) = session.view() {
        let mut stdout = std::io::stdout();
        write_view(&mut stdout, view, atty::is(atty::Stream::Stdout))?;
    }
    let mut stderr = std::io::stderr();
    write_status(&mut stderr, session.status(), atty::is(atty::Stream::Stderr))?;
    Ok(if session.status().is_error { 1 } else { 0 })
}

const REPL_HELP: &str = "\
Commands:
  sample              load the example batch into the input
  load <file>         load a JSON batch from a file
  show                print the current input batch
  analyze [strategy]  score the batch (default|deadline|importance|effort)
  suggest             fetch the service's top picks and summary
  help                show this text
  quit                leave the session";

/// Interactive session: state lives in one `Session` for the life of the
/// process and is discarded on exit. Starts seeded with the sample batch so
/// the first run works out of the box.
async fn repl(session: &mut Session) -> anyhow::Result<()> {
    println!("task-triage interactive session. Type 'help' for commands.");
    session.load_sample();
    report(session)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let rest = words.next();

        match command {
            "" => continue,
            "help" => println!("{REPL_HELP}"),
            "quit" | "exit" => break,
            "sample" => {
                session.load_sample();
                report(session)?;
            }
            "load" => match rest {
                Some(path) => match std::fs::read_to_string(path) {
                    Ok(text) => {
                        session.set_input(text);
                        println!("Loaded {path}.");
                    }
                    Err(e) => eprintln!("error: reading {path}: {e}"),
                },
                None => eprintln!("error: usage: load <file>"),
            },
            "show" => println!("{}", session.input().text()),
            "analyze" => {
                let strategy = match rest.map(|s| s.parse::<Strategy>()).transpose() {
                    Ok(strategy) => strategy.unwrap_or_default(),
                    Err(e) => {
                        eprintln!("error: {e}");
                        continue;
                    }
                };
                session.analyze(strategy).await;
                show_outcome(session)?;
            }
            "suggest" => {
                session.suggest().await;
                show_outcome(session)?;
            }
            other => eprintln!("error: unknown command '{other}'; type 'help'"),
        }
    }
    Ok(())
}

fn report(session: &Session) -> anyhow::Result<()> {
    let mut stderr = std::io::stderr();
    write_status(&mut stderr, session.status(), atty::is(atty::Stream::Stderr))?;
    Ok(())
}

fn show_outcome(session: &Session) -> anyhow::Result<()> {
    // On failure the previous view stays on screen conceptually; only print
    // a fresh view after a successful action.
    if !session.status().is_error {
        if let Some(view) = session.view() {
            let mut stdout = std::io::stdout();
            write_view(&mut stdout, view, atty::is(atty::Stream::Stdout))?;
        }
    }
    report(session)
}
