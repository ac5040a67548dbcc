//! The `studybuddy` command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use studybuddy_core::traits::QuestionCount;

mod commands;

use commands::SaveFormat;

#[derive(Parser)]
#[command(
    name = "studybuddy",
    version,
    about = "AI-generated mock tests and flashcards from your study material"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a study document (PDF or text) and print its document ID
    Upload {
        /// Document to upload
        #[arg(long)]
        file: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate a mock test for an uploaded document and save the payload
    Generate {
        /// Document identifier printed by `studybuddy upload`
        #[arg(long)]
        document_id: String,

        /// Number of questions (10-50, default from config)
        #[arg(long)]
        count: Option<QuestionCount>,

        /// Where to write the payload (default: <output_dir>/mock-test-<id>.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take a mock test interactively, one answer per line on stdin
    Take {
        /// Mock test payload JSON
        #[arg(long)]
        payload: PathBuf,

        /// Directory to save the attempt into
        #[arg(long)]
        output: Option<PathBuf>,

        /// Saved formats
        #[arg(long, value_enum, default_value_t = SaveFormat::Json)]
        format: SaveFormat,
    },

    /// Grade a prepared answers file against a mock test
    Grade {
        /// Mock test payload JSON
        #[arg(long)]
        payload: PathBuf,

        /// Answers JSON: {"0": "B", "1": "C"} or ["B", null, "C"]
        #[arg(long)]
        answers: PathBuf,

        /// Directory to save the attempt into
        #[arg(long)]
        output: Option<PathBuf>,

        /// Saved formats
        #[arg(long, value_enum, default_value_t = SaveFormat::Json)]
        format: SaveFormat,
    },

    /// Validate a mock test payload file
    Validate {
        /// Mock test payload JSON
        #[arg(long)]
        payload: PathBuf,
    },

    /// Generate flashcards for an uploaded document
    Flashcards {
        /// Document identifier
        #[arg(long)]
        document_id: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Ask a question about an uploaded document
    Ask {
        /// Document identifier
        #[arg(long)]
        document_id: String,

        /// The question
        #[arg(long)]
        question: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and a sample mock test
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studybuddy=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Upload { file, config } => commands::upload::execute(file, config).await,
        Commands::Generate {
            document_id,
            count,
            output,
            config,
        } => commands::generate::execute(document_id, count, output, config).await,
        Commands::Take {
            payload,
            output,
            format,
        } => commands::take::execute(payload, output, format),
        Commands::Grade {
            payload,
            answers,
            output,
            format,
        } => commands::grade::execute(payload, answers, output, format),
        Commands::Validate { payload } => commands::validate::execute(payload),
        Commands::Flashcards {
            document_id,
            config,
        } => commands::flashcards::execute(document_id, config).await,
        Commands::Ask {
            document_id,
            question,
            config,
        } => commands::ask::execute(document_id, question, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
