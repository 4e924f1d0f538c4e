use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

use spelling_master::{
    app::App,
    audio::{self, AudioPlayer},
    config::GameConfig,
    logging::{self, LogConfig, LogSink},
    words::WordTopics,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[derive(Debug, Parser)]
#[command(name = "spelling-master", version, about = "Hear a word, spell it, clear the topic")]
struct Cli {
    /// Config file (default: the per-user config.json, if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Word list JSON replacing the built-in topics
    #[arg(long, global = true, value_name = "PATH")]
    words: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play the game (default)
    Play,
    /// List every topic and its words
    Topics,
    /// Check that every audio asset the game may request exists
    CheckAssets,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play);

    // The game owns the terminal, so it only logs when given a file.
    let sink = match (&command, cli.log_file) {
        (_, Some(path)) => LogSink::File(path),
        (Command::Play, None) => LogSink::Discard,
        (_, None) => LogSink::Stderr,
    };
    logging::init_logging(&LogConfig::from_verbosity(cli.verbose).with_sink(sink))?;

    let config = GameConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let topics = match &cli.words {
        Some(path) => WordTopics::load(path)
            .with_context(|| format!("Failed to load words from {}", path.display()))?,
        None => WordTopics::default(),
    };

    match command {
        Command::Play => play(config, topics),
        Command::Topics => {
            list_topics(&topics);
            Ok(())
        }
        Command::CheckAssets => check_assets(&config, &topics),
    }
}

fn play(config: GameConfig, topics: WordTopics) -> Result<()> {
    let audio = AudioPlayer::new(config.audio.clone(), audio::default_backend());
    let mut app = App::new(config, topics, audio);
    app.run()
}

fn list_topics(topics: &WordTopics) {
    for (topic, words) in topics.iter() {
        println!("{} ({})", topic.label(), words.len());
        for word in words {
            println!("  {word}");
        }
    }
}

fn check_assets(config: &GameConfig, topics: &WordTopics) -> Result<()> {
    let assets = config.audio.required_assets(topics);
    let missing: Vec<_> = assets.iter().filter(|path| !path.is_file()).collect();

    for path in &missing {
        println!("missing  {}", path.display());
    }
    info!(total = assets.len(), missing = missing.len(), "asset check");
    if !missing.is_empty() {
        bail!("{} of {} audio assets missing", missing.len(), assets.len());
    }
    println!("All {} audio assets present", assets.len());
    Ok(())
}
