//! Interactive loop: one keyword per line, one pipeline run per keyword.

use std::future::Future;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::errors::AppError;
use crate::generation::{GenerationOutcome, RecipePipeline};

pub const PROMPT: &str = "Enter recipe keyword: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Empty,
    Generate(String),
}

pub fn parse_command(line: &str) -> Command {
    let input = line.trim();
    if input.is_empty() {
        return Command::Empty;
    }
    match input.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Generate(input.to_string()),
    }
}

/// How the interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfInput,
    Interrupted,
}

/// Reads lines on a plain OS thread and forwards them over a channel.
///
/// The thread is detached, so a read blocked on the terminal never holds up
/// runtime shutdown. It stops once the receiver is dropped or input ends.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Reads keywords from stdin until quit, EOF or Ctrl-C.
pub async fn run(pipeline: Arc<RecipePipeline>) -> anyhow::Result<Exit> {
    let lines = spawn_line_reader(io::BufReader::new(io::stdin()));
    session(pipeline, lines, signal::ctrl_c).await
}

/// The prompt loop over any line source; `interrupt` resolves on Ctrl-C.
pub async fn session<F, Fut>(
    pipeline: Arc<RecipePipeline>,
    mut lines: mpsc::Receiver<io::Result<String>>,
    interrupt: F,
) -> anyhow::Result<Exit>
where
    F: Fn() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let mut stdout = tokio::io::stdout();

    println!("Recipe generator ready. Type 'quit' to exit.");

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.recv() => line,
            _ = interrupt() => {
                println!("\nInterrupted. Goodbye!");
                return Ok(Exit::Interrupted);
            }
        };

        let Some(line) = line else {
            println!();
            info!("stdin closed, exiting");
            return Ok(Exit::EndOfInput);
        };
        let line = line.context("Failed to read keyword from stdin")?;

        let keyword = match parse_command(&line) {
            Command::Quit => {
                println!("Goodbye!");
                return Ok(Exit::Quit);
            }
            Command::Empty => continue,
            Command::Generate(keyword) => keyword,
        };

        println!("Generating recipe for '{keyword}'...");

        let task_pipeline = Arc::clone(&pipeline);
        let task_keyword = keyword.clone();
        let mut task = tokio::spawn(async move { task_pipeline.run(&task_keyword).await });

        let result = tokio::select! {
            joined = &mut task => joined
                .map_err(|e| AppError::Internal(anyhow::Error::new(e)))
                .and_then(|outcome| outcome),
            _ = interrupt() => {
                task.abort();
                println!("\nGeneration for '{keyword}' cancelled. Goodbye!");
                return Ok(Exit::Interrupted);
            }
        };

        match result {
            Ok(outcome) => println!("{}", success_summary(&outcome)),
            Err(e) => {
                error!("Generation for '{keyword}' failed: {e}");
                println!("{}", failure_summary(&keyword, &e));
            }
        }
    }
}

fn success_summary(outcome: &GenerationOutcome) -> String {
    let stats = &outcome.stats;
    let mut summary = format!(
        "Recipe generated successfully!\n  File: {}\n  Ingredients: {}  Steps: {}  FAQs: {}  Tips: {}\n  Rating: {}  Difficulty: {}",
        outcome.path.display(),
        stats.ingredients,
        stats.steps,
        stats.faqs,
        stats.tips,
        stats.rating,
        stats.difficulty,
    );
    if stats.placeholder_images > 0 {
        summary.push_str(&format!(
            "\n  Images: {} of {} are placeholders",
            stats.placeholder_images, stats.images
        ));
    }
    summary
}

fn failure_summary(keyword: &str, error: &AppError) -> String {
    format!("Failed to generate recipe for '{keyword}': {error}")
}
