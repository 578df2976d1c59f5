//! FirLens CLI
//!
//! Labels complaint descriptions as criminal-incident reports or
//! administrative requests from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use firlens_classifiers::{
    ComplaintClassifier, JsonLinesRecordSource, TrainingOutcome, UnavailableRecordSource,
    ACCURACY_FLOOR,
};
use firlens_core::Label;
use serde::Serialize;
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

mod config;

use config::{load_examples, CliConfig};

#[derive(Parser, Debug)]
#[command(name = "firlens")]
#[command(author, version, about = "FIR / non-FIR complaint classifier", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FIRLENS_CONFIG", default_value = "firlens.yaml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the normalized tokens of a text
    Tokens {
        /// Text to normalize
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Train, then classify each text (one per line from stdin when none given)
    Classify {
        /// Complaint texts
        texts: Vec<String>,

        /// Stored complaints as JSON lines
        #[arg(short, long)]
        records: Option<PathBuf>,

        /// Labeled examples; takes precedence over records
        #[arg(short, long)]
        examples: Option<PathBuf>,
    },

    /// Train on labeled examples and report training-set accuracy
    Evaluate {
        /// Labeled examples
        #[arg(short, long)]
        examples: Option<PathBuf>,

        /// Fail below this accuracy
        #[arg(long, default_value_t = ACCURACY_FLOOR)]
        min_accuracy: f64,
    },

    /// Run startup training and print a model summary
    Model {
        /// Stored complaints as JSON lines
        #[arg(short, long)]
        records: Option<PathBuf>,
    },
}

/// Model summary printed by `firlens model`
#[derive(Debug, Serialize)]
struct ModelSummary {
    outcome: TrainingOutcome,
    vocab_size: usize,
    fir_total: u64,
    non_fir_total: u64,
    prior_fir: f64,
    prior_non_fir: f64,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = CliConfig::load(&cli.config)?;
    let classifier = ComplaintClassifier::with_config(config.classifier.clone())?;

    match cli.command {
        Commands::Tokens { text } => {
            print_json(&classifier.preprocess(&text.join(" ")))?;
        }
        Commands::Classify {
            texts,
            records,
            examples,
        } => {
            let config = config.with_sources(records, examples);
            train(&classifier, &config).await?;

            let texts = if texts.is_empty() {
                read_stdin_lines()?
            } else {
                texts
            };
            print_json(&classifier.classify_batch(&texts))?;
        }
        Commands::Evaluate {
            examples,
            min_accuracy,
        } => {
            let config = config.with_sources(None, examples);
            let Some(path) = config.examples_path.as_deref() else {
                anyhow::bail!("no examples file given (use --examples or examples_path)");
            };

            let examples = load_examples(path)?;
            classifier.train_from_examples(&examples);
            let evaluation = classifier.evaluate(&examples);
            print_json(&evaluation)?;

            if !evaluation.meets(min_accuracy) {
                warn!(
                    "Accuracy {:.3} below threshold {:.3}",
                    evaluation.accuracy, min_accuracy
                );
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Model { records } => {
            let config = config.with_sources(records, None);
            let outcome = train(&classifier, &config).await?;

            let model = classifier.model();
            print_json(&ModelSummary {
                outcome,
                vocab_size: model.vocab_size(),
                fir_total: model.counts(Label::Fir).total(),
                non_fir_total: model.counts(Label::NonFir).total(),
                prior_fir: model.priors().fir,
                prior_non_fir: model.priors().non_fir,
            })?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Train from examples when configured, otherwise through the init orchestrator
async fn train(classifier: &ComplaintClassifier, config: &CliConfig) -> Result<TrainingOutcome> {
    let outcome = if let Some(path) = &config.examples_path {
        let examples = load_examples(path)?;
        classifier.train_from_examples(&examples)
    } else if let Some(path) = &config.records_path {
        classifier.init(&JsonLinesRecordSource::new(path)).await
    } else {
        classifier.init(&UnavailableRecordSource::default()).await
    };

    info!(
        "Model trained via {} ({} documents, {} tokens)",
        outcome.strategy.as_str(),
        outcome.documents,
        outcome.vocab_size
    );
    Ok(outcome)
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("firlens=debug,firlens_classifiers=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("firlens=info,firlens_classifiers=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
