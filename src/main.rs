use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use kreolguard::config::{AuditBackend, Config};
use kreolguard::db::models::FeedbackReport;
use kreolguard::db::{AuditSink, LogAuditSink};
use kreolguard::error::ModerationError;
use kreolguard::lexicon::Lexicon;
use kreolguard::normalize::NormalizedText;
use kreolguard::output::terminal;
use kreolguard::pipeline::Moderator;
use kreolguard::signals::classifier::HttpClassifier;
use kreolguard::signals::gemini::GeminiJudge;

/// Exit code for requests the caller can fix (empty input).
const EXIT_USER_ERROR: i32 = 2;
/// Exit code for timeouts and internal failures.
const EXIT_FAILURE: i32 = 1;

/// KreolGuard: content moderation for Mauritian Creole, French and English.
///
/// Combines a curated Creole lexicon, a toxicity classifier and an LLM
/// judge into a safe / unsafe / human_review verdict.
#[derive(Parser)]
#[command(name = "kreolguard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the audit database
    Init,

    /// Moderate one piece of text
    Analyze {
        /// The text to moderate
        text: String,

        /// Print the verdict as JSON instead of colored output
        #[arg(long)]
        json: bool,

        /// Overall deadline in seconds (default: KREOLGUARD_REQUEST_TIMEOUT_SECS)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Run only the offline lexicon check (no network calls)
    Check {
        /// The text to check
        text: String,
    },

    /// Report a misclassified verdict
    Report {
        /// The text that was misclassified
        #[arg(long)]
        text: String,

        /// The label KreolGuard gave
        #[arg(long)]
        original_label: String,

        /// The label it should have given
        #[arg(long)]
        suggested_label: String,

        /// Language of the text, if known
        #[arg(long, default_value = "")]
        language: String,
    },

    /// Show audit log status (request counts, latest verdicts)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kreolguard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let config = Config::load()?;
            init_database(&config).await?;
        }

        Commands::Analyze {
            text,
            json,
            timeout,
        } => {
            let config = Config::load()?;
            config.require_judge()?;
            let moderator = build_moderator(&config).await?;
            let deadline = timeout
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(config.request_timeout);

            match moderator.analyze_within(&text, deadline).await {
                Ok(verdict) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&verdict)?);
                    } else {
                        terminal::display_verdict(&verdict);
                    }
                }
                Err(err) => exit_with(err, json),
            }
        }

        Commands::Check { text } => {
            let config = Config::load()?;
            let lexicon = Lexicon::load_or_builtin(config.lexicon_path.as_deref())?;
            let normalized = NormalizedText::from_raw(&text);
            if normalized.is_empty() {
                exit_with(ModerationError::EmptyInput, false);
            }

            println!("Checking against {} lexicon terms...", lexicon.len());
            let matched = lexicon.find_matches(&normalized.matching);
            terminal::display_lexicon_check(&normalized.matching, &matched);
        }

        Commands::Report {
            text,
            original_label,
            suggested_label,
            language,
        } => {
            let config = Config::load()?;
            let moderator = build_moderator(&config).await?;
            let report = FeedbackReport {
                text,
                original_label,
                suggested_label,
                language,
            };

            match moderator.submit_feedback(report).await {
                Ok(()) => println!("{}", "Feedback recorded. Thank you!".green()),
                Err(err) => exit_with(err, false),
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            show_status(&config).await?;
        }
    }

    Ok(())
}

/// Print the caller-facing error and exit. Internal details were already
/// logged by the pipeline; only the public message reaches stdout.
fn exit_with(err: ModerationError, json: bool) -> ! {
    if let ModerationError::Internal(ref inner) = err {
        tracing::error!(error = %inner, "Request failed");
    }

    let response = err.to_response();
    if json {
        match serde_json::to_string(&response) {
            Ok(body) => println!("{body}"),
            Err(_) => println!("{{\"error\":\"{}\"}}", response.error),
        }
    } else {
        eprintln!("{} {}", "Error:".red().bold(), response.error);
    }

    let code = if err.is_user_error() {
        EXIT_USER_ERROR
    } else {
        EXIT_FAILURE
    };
    std::process::exit(code);
}

/// Wire the lexicon, both signal clients and the audit sink into a Moderator.
async fn build_moderator(config: &Config) -> Result<Moderator> {
    let lexicon = Lexicon::load_or_builtin(config.lexicon_path.as_deref())?;
    info!(terms = lexicon.len(), "Lexicon loaded");

    let classifier = HttpClassifier::new(&config.classifier_url, config.signal_timeout)?;
    let judge = GeminiJudge::new(
        config.gemini_api_key.clone(),
        &config.gemini_model,
        config.signal_timeout,
    )?
    .with_base_url(&config.gemini_url);
    let audit = create_audit_sink(config)?;

    Ok(Moderator::new(
        Arc::new(lexicon),
        Arc::new(classifier),
        Arc::new(judge),
        audit,
    )
    .with_request_timeout(config.request_timeout))
}

/// Create the audit sink for the configured backend.
fn create_audit_sink(config: &Config) -> Result<Arc<dyn AuditSink>> {
    match config.audit_backend {
        AuditBackend::Log => {
            info!("Audit records go to the log only");
            Ok(Arc::new(LogAuditSink))
        }
        AuditBackend::Sqlite => open_sqlite_sink(&config.db_path),
    }
}

#[cfg(feature = "sqlite")]
fn open_sqlite_sink(db_path: &str) -> Result<Arc<dyn AuditSink>> {
    let db = kreolguard::db::initialize_sqlite(db_path)?;
    Ok(Arc::new(db))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite_sink(_db_path: &str) -> Result<Arc<dyn AuditSink>> {
    anyhow::bail!(
        "KREOLGUARD_AUDIT=sqlite but the 'sqlite' feature is not compiled in.\n\
         Set KREOLGUARD_AUDIT=log or rebuild with: cargo build --features sqlite"
    )
}

/// Initialize the audit database (create if needed).
#[cfg(feature = "sqlite")]
async fn init_database(config: &Config) -> Result<()> {
    info!("Initializing KreolGuard database...");
    let db = kreolguard::db::initialize_sqlite(&config.db_path)?;
    let table_count = db.table_count().await?;
    println!("Database initialized at: {}", config.db_path);
    println!("Tables created: {table_count}");
    println!("\nKreolGuard is ready. Next step: set up your .env file");
    println!("  (see .env.example for required variables)");
    println!("\nThen run: cargo run -- analyze \"some text\"");
    Ok(())
}

#[cfg(not(feature = "sqlite"))]
async fn init_database(_config: &Config) -> Result<()> {
    anyhow::bail!("`init` needs the 'sqlite' feature. Rebuild with: cargo build --features sqlite")
}

#[cfg(feature = "sqlite")]
async fn show_status(config: &Config) -> Result<()> {
    let db = kreolguard::db::open_sqlite(&config.db_path)?;
    kreolguard::status::show(&db, &config.db_path).await
}

#[cfg(not(feature = "sqlite"))]
async fn show_status(_config: &Config) -> Result<()> {
    anyhow::bail!("`status` needs the 'sqlite' feature. Rebuild with: cargo build --features sqlite")
}
