//! onsetgrade CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "onsetgrade",
    version,
    about = "Score symptom-onset predictions against labelled cases"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Input locations shared by `evaluate` and `validate`.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Predictions CSV (case,symptom_onset)
    #[arg(long)]
    predictions: Option<PathBuf>,

    /// Labels CSV (case,symptom_onset)
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Directory holding one <case>.csv series per case
    #[arg(long)]
    series_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score predictions and write cohort metrics
    Evaluate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output metrics file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Days before onset that still count as an early detection
        #[arg(long)]
        days_before: Option<u32>,

        /// Days after onset ignored when counting false positives
        #[arg(long)]
        days_after: Option<u32>,

        /// Output format: json, markdown, all
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Check input files without scoring
    Validate {
        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Validate a real/synthetic dataset pair and score it
    Synthetic {
        /// Real dataset CSV
        #[arg(long)]
        real: PathBuf,

        /// Synthetic dataset CSV
        #[arg(long)]
        synthetic: PathBuf,

        /// Schema JSON (defaults to the heart-rate layout)
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Scorer command line, e.g. "python3 score.py"
        #[arg(long)]
        command: Option<String>,

        /// Scorer timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the default dataset schema as JSON
    Schema,

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("onsetgrade=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            inputs,
            output,
            days_before,
            days_after,
            format,
        } => commands::evaluate::execute(inputs, output, days_before, days_after, format),
        Commands::Validate { inputs } => commands::validate::execute(inputs),
        Commands::Synthetic {
            real,
            synthetic,
            schema,
            command,
            timeout_secs,
            config,
        } => {
            commands::synthetic::execute(real, synthetic, schema, command, timeout_secs, config)
                .await
        }
        Commands::Schema => commands::schema::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
