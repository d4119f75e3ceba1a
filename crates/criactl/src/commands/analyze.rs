//! One-shot analysis: load the given files, critique one format group,
//! render the result.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::info;

use cria::intake::{self, IntakeRequest};
use cria::preview::PreviewStore;
use cria::{AnalysisEngine, CriaConfig, FormatGroup, Session};

use crate::display;
use crate::errors::{self, EXIT_GENERAL_ERROR, EXIT_NO_INPUT};

pub async fn run(
    square: Option<PathBuf>,
    vertical: Option<PathBuf>,
    group: FormatGroup,
    json: bool,
) -> Result<i32> {
    if square.is_none() && vertical.is_none() {
        eprintln!(
            "{} provide at least one creative (--square and/or --vertical)",
            "error:".red().bold()
        );
        return Ok(EXIT_NO_INPUT);
    }

    let config = CriaConfig::load();
    let store = PreviewStore::new();
    let mut session = Session::new(Arc::clone(&store));

    let batch = intake::run_batch(&store, IntakeRequest { square, vertical }).await;
    display::print_warnings(&batch.warnings);

    if !session.apply_intake(batch) {
        eprintln!(
            "{} none of the provided files could be loaded",
            "error:".red().bold()
        );
        return Ok(EXIT_NO_INPUT);
    }
    for creative in session.creative_set().iter() {
        info!("loaded {}", creative.summary());
    }

    let Some(generation) = session.select_group(group) else {
        return Ok(EXIT_NO_INPUT);
    };

    let spinner = (!json).then(analysis_spinner);

    let engine = AnalysisEngine::from_config(&config);
    let result = engine.analyze(session.creative_set(), group).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    session.finish_analysis(generation, result);
    let Some(result) = session.result() else {
        return Ok(EXIT_GENERAL_ERROR);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", display::format_result(result, group));
    }
    Ok(errors::exit_code_for(result))
}

pub(crate) fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing creatives...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
