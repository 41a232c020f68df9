mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use novo_core::config::BackendKind;
use novo_core::persona::Persona;
use novo_core::NovoConfig;
use novo_memory::{open_backend, ConversationStore};
use novo_reasoning::{EngineOptions, ResponseEngine};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "NOVO_CONFIG", default_value = "novo.toml")]
    config: PathBuf,

    /// Storage backend: memory, file or sqlite (overrides config)
    #[arg(short, long)]
    backend: Option<BackendKind>,

    /// Directory for stored conversations (overrides config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Number of conversations to remember (overrides config)
    #[arg(long)]
    history_limit: Option<usize>,

    /// Seed reply selection for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_tracing(&args.log_level, args.log_file.as_deref())?;

    let mut config = NovoConfig::load_or_default(&args.config);
    if let Some(kind) = args.backend {
        config.storage.backend = kind;
    }
    if let Some(dir) = args.data_dir.clone() {
        config.storage.data_dir = Some(dir);
    }
    if let Some(limit) = args.history_limit {
        config.memory.history_limit = limit;
    }

    let data_dir = config.storage.data_dir.clone().unwrap_or_else(default_data_dir);
    info!("Opening {} storage in {}...", config.storage.backend, data_dir.display());
    let backend = open_backend(config.storage.backend, &data_dir).await?;
    let store = ConversationStore::with_key(backend, config.storage.key.clone());

    let mut options = EngineOptions::from_config(&config);
    options.seed = args.seed;
    let mut engine = ResponseEngine::open(store, options).await;
    let persona = Persona::from_config(&config.bot);

    let mut lines = LineSource::new()?;
    println!("{}: {}", persona.name, persona.greeting);
    if lines.is_interactive() {
        println!("(type /help for commands)");
    }

    while let Some(line) = lines.next_line()? {
        match commands::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Say(text) => {
                let reply = engine.generate_response(&text).await;
                println!("{}: {}", persona.name, reply);
            }
            Command::Feedback(positive) => {
                if engine.last().is_none() {
                    println!("Nothing to rate yet.");
                } else {
                    engine.provide_feedback(positive).await;
                    println!("Thanks for the feedback!");
                }
            }
            Command::Stats { json } => {
                let stats = engine.stats();
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    print!("{}", commands::render_stats(&stats));
                }
            }
            Command::History => print!("{}", commands::render_history(engine.history(), &persona.name)),
            Command::Why(text) => print!("{}", commands::render_analysis(&engine.analyze(&text))),
            Command::Reset => {
                engine.reset().await;
                println!("Memory cleared.");
            }
            Command::Help => println!("{}", commands::HELP),
            Command::Unknown(name) => println!("Unknown command /{} (try /help)", name),
        }
    }

    info!("Session ended with {} conversations remembered", engine.history().len());
    Ok(())
}

fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("novo"))
        .unwrap_or_else(|| PathBuf::from(".novo"))
}

/// Line editor on a terminal, plain line reads when stdin is piped.
enum LineSource {
    Editor(DefaultEditor),
    Piped(io::Lines<io::StdinLock<'static>>),
}

impl LineSource {
    fn new() -> Result<Self> {
        if io::stdin().is_terminal() {
            let editor = DefaultEditor::new().context("Failed to initialize line editor")?;
            Ok(LineSource::Editor(editor))
        } else {
            Ok(LineSource::Piped(io::stdin().lock().lines()))
        }
    }

    fn is_interactive(&self) -> bool {
        matches!(self, LineSource::Editor(_))
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            LineSource::Editor(editor) => loop {
                match editor.readline("> ") {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            let _ = editor.add_history_entry(line.as_str());
                        }
                        return Ok(Some(line));
                    }
                    Err(ReadlineError::Interrupted) => {
                        println!("^C");
                        continue;
                    }
                    Err(ReadlineError::Eof) => return Ok(None),
                    Err(e) => return Err(e).context("Failed to read input"),
                }
            },
            LineSource::Piped(lines) => match lines.next() {
                Some(line) => Ok(Some(line.context("Failed to read stdin")?)),
                None => Ok(None),
            },
        }
    }
}
