//! Interactive session: the three-screen flow on a plain line REPL.
//!
//! upload → format selection → analysis, with `back`, `reset`, and `quit`
//! available where they make sense. EOF anywhere ends the session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use console::style;
use owo_colors::OwoColorize;

use cria::intake::{self, IntakeRequest};
use cria::preview::PreviewStore;
use cria::{AnalysisEngine, CriaConfig, FormatGroup, Session, View};

use crate::commands::analyze::analysis_spinner;
use crate::display;
use crate::errors::EXIT_SUCCESS;

pub async fn run() -> Result<i32> {
    let config = CriaConfig::load();
    let engine = AnalysisEngine::from_config(&config);
    let store = PreviewStore::new();
    let mut session = Session::new(Arc::clone(&store));

    println!("{}", style("Cria — creative critique for Meta Ads").bold());
    println!("{}", "Load a square and/or vertical creative to begin.".dimmed());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    // Generation token of the selection awaiting analysis, if any.
    let mut pending: Option<u64> = None;

    loop {
        match session.view() {
            View::Upload => {
                println!();
                let Some(square) = ask(&mut lines, "square creative path (enter to skip): ")?
                else {
                    break;
                };
                let Some(vertical) = ask(&mut lines, "vertical creative path (enter to skip): ")?
                else {
                    break;
                };

                let request = IntakeRequest {
                    square: to_path(&square),
                    vertical: to_path(&vertical),
                };
                if request.is_empty() {
                    if square.eq_ignore_ascii_case("quit") || square.eq_ignore_ascii_case("q") {
                        break;
                    }
                    println!("{}", "At least one creative is required (or 'quit').".yellow());
                    continue;
                }

                let batch = intake::run_batch(&store, request).await;
                display::print_warnings(&batch.warnings);
                if !session.apply_intake(batch) {
                    println!("{}", "No file could be loaded, try again.".yellow());
                }
            }

            View::FormatSelection => {
                println!("\n{}", style("Loaded creatives").bold());
                print!("{}", display::format_creative_set(session.creative_set()));
                println!("Analyze which placements? [s]quare-like / [v]ertical / [u]pload new / [q]uit");
                let Some(choice) = ask(&mut lines, "> ")? else {
                    break;
                };
                match choice.to_ascii_lowercase().as_str() {
                    "s" | "square" | "square-like" => {
                        pending = session.select_group(FormatGroup::SquareLike);
                    }
                    "v" | "vertical" => {
                        pending = session.select_group(FormatGroup::Vertical);
                    }
                    "u" | "upload" => session.reset(),
                    "q" | "quit" | "exit" => break,
                    other => println!("{}", format!("Unknown choice '{other}'.").yellow()),
                }
            }

            View::FormatAnalysis => {
                if session.is_loading() {
                    let group = session
                        .selected_group()
                        .unwrap_or(FormatGroup::SquareLike);
                    let spinner = analysis_spinner();
                    let result = engine.analyze(session.creative_set(), group).await;
                    spinner.finish_and_clear();
                    if let Some(generation) = pending.take() {
                        session.finish_analysis(generation, result);
                    }
                    if let Some(result) = session.result() {
                        print!("{}", display::format_result(result, group));
                    }
                }

                println!("\n[b]ack to formats / [r]eset / [q]uit");
                let Some(choice) = ask(&mut lines, "> ")? else {
                    break;
                };
                match choice.to_ascii_lowercase().as_str() {
                    "b" | "back" => session.go_back(),
                    "r" | "reset" => session.reset(),
                    "q" | "quit" | "exit" => break,
                    other => println!("{}", format!("Unknown choice '{other}'.").yellow()),
                }
            }
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Prompt and read one trimmed line. `Ok(None)` means EOF.
fn ask(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn to_path(input: &str) -> Option<PathBuf> {
    if input.is_empty() || input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
        None
    } else {
        Some(PathBuf::from(input))
    }
}
