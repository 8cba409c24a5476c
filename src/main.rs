//! Sentence Forge - console driver
//!
//! Loads a corpus, builds the engine plus the background retention
//! sweep, and runs a small interactive loop for playing sessions from
//! the terminal. The engine itself is transport-agnostic; this binary
//! is the simplest possible caller.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::runtime::Runtime;

use sentence_forge::core::config::GameConfig;
use sentence_forge::core::error::{GameError, Result};
use sentence_forge::core::types::{PlayerId, PuzzleId};
use sentence_forge::corpus::loader;
use sentence_forge::engine::response::SubmitResponse;
use sentence_forge::engine::GameEngine;
use sentence_forge::persist::{JsonlSink, MemorySink, PersistenceSink};
use sentence_forge::sweep;

/// Play sentence-reconstruction puzzles from a sentence corpus
#[derive(Parser, Debug)]
#[command(name = "sentence-forge")]
#[command(about = "Play sentence-reconstruction puzzles from a sentence corpus")]
struct Args {
    /// Path to the corpus JSON file
    #[arg(long, default_value = "data/corpus.sample.json")]
    corpus: PathBuf,

    /// Player identifier
    #[arg(long, default_value = "console-player")]
    player: String,

    /// Target age band
    #[arg(long, default_value_t = 7)]
    age: u8,

    /// Optional TOML config overriding the default ruleset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible puzzle sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Append completed-session records to this JSON-lines file
    #[arg(long)]
    results: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("sentence_forge=info").init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load_file(path)?,
        None => GameConfig::default(),
    };
    let corpus = loader::load_corpus(&args.corpus)?;
    let sink: Arc<dyn PersistenceSink> = match &args.results {
        Some(path) => Arc::new(JsonlSink::create(path)?),
        None => Arc::new(MemorySink::new()),
    };
    let engine = Arc::new(match args.seed {
        Some(seed) => GameEngine::seeded(corpus, config, sink, seed)?,
        None => GameEngine::new(corpus, config, sink)?,
    });

    // Retention sweep runs on the runtime; the game loop stays blocking.
    let runtime = Runtime::new()?;
    let period = engine.config().sweep_period();
    runtime.spawn(sweep::run(engine.clone(), period));

    println!("\n=== SENTENCE FORGE ===");
    println!("Rebuild the sentence from its shuffled pieces");
    println!();
    println!("Commands:");
    println!("  new / n         - Start a new puzzle");
    println!("  hint / h        - Use a hint");
    println!("  skip / k        - Skip the current puzzle");
    println!("  status          - Show session progress");
    println!("  stats           - Show engine counters");
    println!("  quit / q        - Exit");
    println!("  <any text>      - Submit as your answer");
    println!();

    let player = PlayerId::new(args.player.clone());
    let mut current: Option<PuzzleId> = None;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "" => continue,
            "q" | "quit" => break,
            "n" | "new" => match engine.generate(args.age, &player) {
                Ok(puzzle) => {
                    println!("[{}] {} words ({})", puzzle.title, puzzle.word_count, puzzle.session_progress);
                    let scrambled: Vec<&str> =
                        puzzle.pieces.iter().map(|piece| piece.word.as_str()).collect();
                    println!("Pieces: {}", scrambled.join(" | "));
                    current = Some(puzzle.puzzle_id);
                }
                Err(err) => println!("Could not generate a puzzle: {err}"),
            },
            "h" | "hint" => match current {
                Some(id) => match engine.hint(id) {
                    Ok(hints) => {
                        for hint in &hints.hints {
                            println!("{} ({}/{})", hint.message, hints.hints_used, hints.max_hints);
                        }
                    }
                    Err(err) => println!("{err}"),
                },
                None => println!("No active puzzle - type 'new' first."),
            },
            "k" | "skip" => match current.take() {
                Some(id) => match engine.skip(id) {
                    Ok(skipped) => {
                        println!("{} The sentence was: {}", skipped.message, skipped.original_sentence);
                        println!("Progress: {}", skipped.session_progress);
                        if let Some(final_message) = &skipped.final_message {
                            println!("{final_message}");
                        }
                    }
                    Err(err) => println!("{err}"),
                },
                None => println!("No active puzzle - type 'new' first."),
            },
            "status" => {
                let status = engine.session_status(&player);
                if status.in_progress {
                    println!(
                        "Session: {}/{} attempted, {} solved, {} points",
                        status.puzzles_attempted.unwrap_or(0),
                        engine.config().session_length,
                        status.puzzles_solved.unwrap_or(0),
                        status.current_score.unwrap_or(0),
                    );
                } else {
                    println!("No session in progress.");
                }
            }
            "stats" => {
                let stats = engine.stats();
                println!(
                    "{} live puzzles, {} open sessions",
                    stats.live_puzzles, stats.open_sessions
                );
            }
            answer => match current {
                Some(id) => match engine.submit(id, answer) {
                    Ok(result) => {
                        print_submit_result(&result);
                        if result.original_sentence.is_some() {
                            current = None;
                        }
                    }
                    Err(GameError::AlreadyProcessed(_)) => {
                        println!("That puzzle is finished - type 'new' for the next one.");
                        current = None;
                    }
                    Err(err) => println!("{err}"),
                },
                None => println!("No active puzzle - type 'new' first."),
            },
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_submit_result(result: &SubmitResponse) {
    println!("{}", result.message);
    if let Some(score) = result.score {
        println!("Score: {score}");
    }
    println!("Progress: {}", result.session_progress);
    if let Some(final_message) = &result.final_message {
        println!("{final_message}");
    }
}
