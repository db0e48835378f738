use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use newscheck::config::Config;
use newscheck::corpus;
use newscheck::features::tfidf::TfidfParams;
use newscheck::inference::Predictor;
use newscheck::model::artifacts;
use newscheck::model::logistic::LogisticParams;
use newscheck::output::terminal;
use newscheck::training::pipeline::{self, TrainingParams};

/// newscheck: fake news detection.
///
/// Trains a TF-IDF + logistic regression model on labeled news corpora and
/// classifies articles as Real or Fake.
#[derive(Parser)]
#[command(name = "newscheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the vectorizer and classifier from True.csv / Fake.csv
    Train {
        /// Real news corpus (default: $NEWSCHECK_DATA_DIR/True.csv)
        #[arg(long)]
        true_csv: Option<PathBuf>,

        /// Fake news corpus (default: $NEWSCHECK_DATA_DIR/Fake.csv)
        #[arg(long)]
        fake_csv: Option<PathBuf>,

        /// Vocabulary size cap (default: 5000)
        #[arg(long, default_value = "5000")]
        max_features: usize,

        /// Minimum document frequency of a term (default: 5)
        #[arg(long, default_value = "5")]
        min_df: usize,

        /// Maximum document fraction of a term (default: 0.7)
        #[arg(long, default_value = "0.7")]
        max_df: f64,

        /// Longest word n-gram (default: 2)
        #[arg(long, default_value = "2")]
        ngram_max: usize,

        /// Fraction held out for evaluation (default: 0.2)
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Seed for the train/test split (default: 42)
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Inverse regularization strength (default: 1.0)
        #[arg(long, default_value = "1.0")]
        c: f64,

        /// Gradient descent iteration cap (default: 1000)
        #[arg(long, default_value = "1000")]
        max_iter: usize,
    },

    /// Classify a piece of text as Real or Fake
    Predict {
        /// Text to classify (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read the text from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Classify every article in a file written by `extract-examples`
        #[arg(long, conflicts_with_all = ["text", "file"])]
        examples: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show model artifact status
    Status,

    /// Write cleaned sample articles from a corpus CSV to a text file
    ExtractExamples {
        /// Corpus CSV to read
        #[arg(long)]
        input: PathBuf,

        /// Text file to write
        #[arg(long)]
        output: PathBuf,

        /// Number of articles to extract (default: 5)
        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// Start the prediction API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: $NEWSCHECK_PORT or 8080)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: $NEWSCHECK_BIND or 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("newscheck=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            true_csv,
            fake_csv,
            max_features,
            min_df,
            max_df,
            ngram_max,
            test_size,
            seed,
            c,
            max_iter,
        } => {
            let config = Config::load()?;
            let true_csv = true_csv.unwrap_or_else(|| config.true_csv());
            let fake_csv = fake_csv.unwrap_or_else(|| config.fake_csv());

            let params = TrainingParams {
                tfidf: TfidfParams {
                    max_features: Some(max_features),
                    ngram_range: (1, ngram_max),
                    min_df,
                    max_df,
                },
                logistic: LogisticParams {
                    c,
                    max_iter,
                    ..LogisticParams::default()
                },
                test_size,
                seed,
            };

            run_train(&config.model_dir, &true_csv, &fake_csv, &params)?;
        }

        Commands::Predict {
            text,
            file,
            examples,
            json,
        } => {
            let config = Config::load()?;
            // JSON callers get an Error-labelled result instead of a hard failure
            if !json {
                config.require_model()?;
            }

            let inputs = match examples {
                Some(path) => corpus::examples::load_examples(&path)?,
                None => vec![read_input(text, file.as_deref())?],
            };
            let predictor = Predictor::load(&config.model_dir);

            for input in &inputs {
                let result = predictor.predict(input);
                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    terminal::display_prediction(input, &result);
                }
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            let predictor = Predictor::load(&config.model_dir);
            newscheck::status::show(&predictor, &config.model_dir);
        }

        Commands::ExtractExamples {
            input,
            output,
            count,
        } => {
            let written = corpus::examples::extract_examples(&input, &output, count)?;
            println!(
                "Wrote {} examples to {}",
                written.to_string().bold(),
                output.display()
            );
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind_addr.clone());

            let predictor = Predictor::load(&config.model_dir);
            newscheck::web::run_server(predictor, port, &bind).await?;
        }
    }

    Ok(())
}

fn run_train(
    model_dir: &Path,
    true_csv: &Path,
    fake_csv: &Path,
    params: &TrainingParams,
) -> Result<()> {
    for path in [true_csv, fake_csv] {
        if !path.exists() {
            anyhow::bail!(
                "Corpus file not found: {}\n\
                 Put True.csv and Fake.csv in $NEWSCHECK_DATA_DIR (default ./data) \
                 or pass --true-csv / --fake-csv.",
                path.display()
            );
        }
    }

    println!("Loading corpora...");
    let documents = corpus::load_corpus(true_csv, fake_csv)?;
    info!(documents = documents.len(), "Training started");

    let outcome = pipeline::train(&documents, params, true)?;
    artifacts::save_artifacts(model_dir, &outcome.vectorizer, &outcome.classifier)?;

    terminal::display_training_summary(&outcome, model_dir);
    Ok(())
}

/// Text from the positional argument, then --file, then stdin.
fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;
    Ok(buf)
}
