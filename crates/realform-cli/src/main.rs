//! realform CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "realform", version, about = "REAL rating form survey and report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the survey interactively
    Survey {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the category question files
        #[arg(long)]
        questions_dir: Option<PathBuf>,

        /// Responses file, rewritten after every answer
        #[arg(long)]
        responses: Option<PathBuf>,

        /// Start from the answers already in the responses file
        #[arg(long)]
        resume: bool,

        /// Output format: text, markdown, json, html, all
        #[arg(long, default_value = "text")]
        format: String,

        /// Output directory for report files
        #[arg(long)]
        output: Option<PathBuf>,

        /// Add the integer score column to report tables
        #[arg(long)]
        show_scores: bool,
    },

    /// Render a report from a saved responses file
    Report {
        /// Responses CSV file
        #[arg(long)]
        responses: PathBuf,

        /// User details TOML file
        #[arg(long)]
        details: PathBuf,

        /// Output format: text, markdown, json, html, all
        #[arg(long, default_value = "text")]
        format: String,

        /// Output directory for report files
        #[arg(long)]
        output: Option<PathBuf>,

        /// Add the integer score column to report tables
        #[arg(long)]
        show_scores: bool,
    },

    /// Check question files against the category score table
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the category question files
        #[arg(long)]
        questions_dir: Option<PathBuf>,
    },

    /// Create starter config, details file and question files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("realform_core=info".parse().unwrap())
                .add_directive("realform_cli=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Survey {
            config,
            questions_dir,
            responses,
            resume,
            format,
            output,
            show_scores,
        } => commands::survey::execute(
            config,
            questions_dir,
            responses,
            resume,
            format,
            output,
            show_scores,
        ),
        Commands::Report {
            responses,
            details,
            format,
            output,
            show_scores,
        } => commands::report::execute(responses, details, format, output, show_scores),
        Commands::Validate {
            config,
            questions_dir,
        } => commands::validate::execute(config, questions_dir),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
