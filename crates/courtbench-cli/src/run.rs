//! The batch run: load sources → build the participant dataset → write it →
//! run the association test.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use courtbench_core::{DatasetSummary, ParticipantRow, build_dataset};
use courtbench_stats::{ContingencyTable, FisherResult, fisher_exact};
use courtbench_store::{OutputFormat, SourcePaths, load_sources, write_dataset};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub sources: SourcePaths,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub run_test: bool,
}

pub struct RunOutcome {
    pub rows: Vec<ParticipantRow>,
    pub fisher: Option<FisherResult>,
}

pub fn run(config: &RunConfig) -> anyhow::Result<RunOutcome> {
    let start = Instant::now();

    let sources = load_sources(&config.sources).context("loading hearing sources")?;
    let rows = build_dataset(&sources).context("joining participants")?;

    let summary = DatasetSummary::from_rows(&rows);
    info!(
        hearings = summary.hearings,
        rows = summary.rows,
        with_question = summary.with_question,
        with_opinion = summary.with_opinion,
        opinion_types = ?summary.opinion_types,
        "dataset summary"
    );

    write_dataset(&rows, &config.output, config.format)
        .with_context(|| format!("writing dataset to {}", config.output.display()))?;

    let fisher = if config.run_test {
        let table = ContingencyTable::from_rows(&rows);
        info!("contingency table (question × opinion):\n{table}");
        Some(fisher_exact(&table).context("running exact Fisher test")?)
    } else {
        None
    };

    info!(
        elapsed_secs = start.elapsed().as_secs_f64(),
        "run complete"
    );
    Ok(RunOutcome { rows, fisher })
}
