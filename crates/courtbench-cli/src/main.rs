mod display;
mod run;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use courtbench_store::OutputFormat;
use courtbench_store::loader::{
    DEFAULT_ANNOUNCED, DEFAULT_OPINIONS, DEFAULT_QUESTIONS, DEFAULT_REPORTED, DEFAULT_WEBCASTS,
};
use courtbench_store::sink::DEFAULT_OUTPUT;
use tracing_subscriber::EnvFilter;

use crate::run::RunConfig;

/// Join hearing rosters, questions, and opinions into a participant dataset
/// and test whether asking questions is associated with writing opinions.
#[derive(Debug, Parser)]
#[command(name = "courtbench", version, about)]
struct Cli {
    /// Directory holding the five source files under their default names.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Selected webcasts [default: <data-dir>/selected_webcasts.json]
    #[arg(long)]
    webcasts: Option<PathBuf>,

    /// Questions asked during hearings [default: <data-dir>/dataset_judge_questions.json]
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Judges announced in press releases [default: <data-dir>/judges_from_press.json]
    #[arg(long)]
    announced: Option<PathBuf>,

    /// Judges reported in judgments [default: <data-dir>/judges_from_judgments.json]
    #[arg(long)]
    reported: Option<PathBuf>,

    /// Separate opinions from judgments [default: <data-dir>/opinions_from_judgments.json]
    #[arg(long)]
    opinions: Option<PathBuf>,

    /// Where to write the dataset [default: <data-dir>/dataset_questions_opinions.json]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Dataset file format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Build and write the dataset without running the Fisher test.
    #[arg(long)]
    no_test: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    JsonColumns,
    Parquet,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::JsonColumns => OutputFormat::JsonColumns,
            Format::Parquet => OutputFormat::Parquet,
        }
    }
}

impl Cli {
    fn into_config(self) -> RunConfig {
        let dir = self.data_dir;
        let resolve = |path: Option<PathBuf>, default: &str| path.unwrap_or_else(|| dir.join(default));
        RunConfig {
            sources: courtbench_store::SourcePaths {
                webcasts: resolve(self.webcasts, DEFAULT_WEBCASTS),
                questions: resolve(self.questions, DEFAULT_QUESTIONS),
                announced: resolve(self.announced, DEFAULT_ANNOUNCED),
                reported: resolve(self.reported, DEFAULT_REPORTED),
                opinions: resolve(self.opinions, DEFAULT_OPINIONS),
            },
            output: resolve(self.output, DEFAULT_OUTPUT),
            format: self.format.into(),
            run_test: !self.no_test,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("courtbench v{}", env!("CARGO_PKG_VERSION"));

    let config = Cli::parse().into_config();
    let outcome = run::run(&config)?;
    if let Some(result) = &outcome.fisher {
        display::print_fisher_report(result);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn defaults_resolve_under_data_dir() {
        let config = Cli::try_parse_from(["courtbench", "--data-dir", "data"])
            .unwrap()
            .into_config();
        assert_eq!(config.sources.webcasts, Path::new("data/selected_webcasts.json"));
        assert_eq!(config.sources.opinions, Path::new("data/opinions_from_judgments.json"));
        assert_eq!(config.output, Path::new("data/dataset_questions_opinions.json"));
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.run_test);
    }

    #[test]
    fn explicit_paths_override_defaults() {
        let config = Cli::try_parse_from([
            "courtbench",
            "--questions",
            "/tmp/q.json",
            "--output",
            "out.parquet",
            "--format",
            "parquet",
            "--no-test",
        ])
        .unwrap()
        .into_config();
        assert_eq!(config.sources.questions, Path::new("/tmp/q.json"));
        assert_eq!(config.sources.announced, Path::new("./judges_from_press.json"));
        assert_eq!(config.output, Path::new("out.parquet"));
        assert_eq!(config.format, OutputFormat::Parquet);
        assert!(!config.run_test);
    }

    #[test]
    fn json_columns_format_flag() {
        let cli = Cli::try_parse_from(["courtbench", "--format", "json-columns"]).unwrap();
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::JsonColumns);
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["courtbench", "--format", "csv"]).is_err());
    }
}
