//! swift-register CLI
//!
//! Validates and submits driver registrations from JSON files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use swift_forms::{FormState, SubmitOutcome};
use swift_register::schema::registration_schema;
use swift_register::{
    CategoryRule, InMemoryAccountService, RegisterConfig, RegisterPage, TracingAlerts,
    TracingNavigator,
};

/// Driver registration form engine.
#[derive(Parser)]
#[command(name = "swift-register")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON settings file.
    #[arg(short, long, env = "SWIFT_REGISTER_CONFIG")]
    config: Option<PathBuf>,

    /// How driver category checkboxes are validated.
    #[arg(long, env = "SWIFT_CATEGORY_RULE", value_enum)]
    category_rule: Option<CategoryRule>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a registration without submitting it.
    Validate {
        /// JSON object of field values.
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Submit registrations, in order, to an in-memory account service.
    Submit {
        /// JSON objects of field values.
        #[arg(short, long, required = true)]
        input: Vec<PathBuf>,
    },
}

fn read_state(path: &Path) -> anyhow::Result<FormState> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &cli.config {
        Some(path) => RegisterConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RegisterConfig::default(),
    };
    if let Some(rule) = cli.category_rule {
        config = config.with_category_rule(rule);
    }

    match cli.command {
        Commands::Validate { input } => {
            let state = read_state(&input)?;
            let errors = registration_schema(config.category_rule).validate(&state);
            if !errors.is_empty() {
                print!("{errors}");
                bail!("{} field(s) failed validation", errors.len());
            }
            info!("{} is valid", input.display());
        }

        Commands::Submit { input } => {
            let accounts = Arc::new(InMemoryAccountService::new());
            let mut failures = 0;

            for path in &input {
                let state = read_state(path)?;
                let mut page = RegisterPage::new(
                    config.clone(),
                    accounts.clone(),
                    Arc::new(TracingAlerts),
                    Arc::new(TracingNavigator),
                );
                page.fill(&state);

                match page.submit().await {
                    SubmitOutcome::Succeeded => info!("{}: registered", path.display()),
                    SubmitOutcome::Invalid(errors) => {
                        failures += 1;
                        println!("{}:", path.display());
                        print!("{errors}");
                    }
                    SubmitOutcome::Failed(_) => failures += 1,
                    SubmitOutcome::AlreadySubmitting | SubmitOutcome::Cancelled => {
                        failures += 1;
                    }
                }
            }

            info!("{} account(s) registered", accounts.len());
            if failures > 0 {
                bail!("{failures} registration(s) failed");
            }
        }
    }

    Ok(())
}
