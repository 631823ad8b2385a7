use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use eduforge::{
    AppError, AssignmentInput, MemoryRecordStore, MockModelBackend, ModelRunner, ModelType,
    PromptGenerator, RecordId, ServiceConfig,
};

#[derive(Parser)]
#[command(name = "eduforge")]
#[command(version)]
#[command(about = "Assignment system-prompt generation pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an assignment system prompt from fixture records
    #[clap(visible_alias = "g")]
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// TOML fixture with courses, categories, and sub-categories
    #[arg(long)]
    records: PathBuf,
    /// Assignment title
    #[arg(long)]
    title: String,
    /// Assignment description
    #[arg(long)]
    description: Option<String>,
    /// Learning objectives description
    #[arg(long)]
    objectives: Option<String>,
    /// Course record id (optional context)
    #[arg(long)]
    course_id: Option<String>,
    /// Assignment category record id
    #[arg(long)]
    category_id: String,
    /// Service config file (eduforge.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend model type: gemini-pro or gemini-flash
    #[arg(long)]
    model: Option<String>,
    /// Bound on the generate step in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print the composed prompt without calling a backend
    #[arg(long)]
    dry_run: bool,
    /// Use the canned mock backend instead of the Gemini API
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Generate(args) => generate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn generate(args: GenerateArgs) -> Result<(), AppError> {
    let store = MemoryRecordStore::from_fixture_path(&args.records)?;

    let mut config = match &args.config {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(model) = &args.model {
        config.generation.model = ModelType::from_str(model)?;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.generation.timeout_secs = timeout_secs;
    }

    let input = AssignmentInput {
        title: args.title,
        description: args.description,
        learning_objectives: args.objectives,
        course_id: args.course_id.as_deref().map(RecordId::new).transpose()?,
        assignment_category_id: RecordId::new(&args.category_id)?,
    };

    if args.dry_run {
        let generator = PromptGenerator::new(store, ModelRunner::new(), config.generation)?;
        println!("{}", generator.preview(&input).await?);
        return Ok(());
    }

    let runner = if args.mock {
        ModelRunner::new()
            .with_backend(config.generation.model, Arc::new(MockModelBackend::default()))
    } else {
        ModelRunner::gemini_from_env(&config.gemini)?
    };

    let generator = PromptGenerator::new(store, runner, config.generation)?;
    let prompt = generator.generate(&input).await?;
    println!("{}", prompt.to_stored_payload());
    Ok(())
}
