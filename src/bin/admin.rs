//! CLI administration tool for vanity-shortener.
//!
//! Provides commands for issuing API tokens, viewing statistics, importing
//! data and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Generate a new API token and its digest for API_TOKEN_HASHES
//! cargo run --bin admin -- token generate
//!
//! # Hash an existing token
//! cargo run --bin admin -- token hash "my-token"
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Import exported records
//! cargo run --bin admin -- import urls urls.json
//! cargo run --bin admin -- import clicks clicks.json -y
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection
//!   (not needed for `token` commands)

use vanity_shortener::api::dto::import::{ImportClicksRequest, ImportUrlsRequest};
use vanity_shortener::application::services::auth_service::hash_token;
use vanity_shortener::application::services::{StatsService, UrlService};
use vanity_shortener::config::Config;
use vanity_shortener::domain::entities::{ClickStat, ShortUrl};
use vanity_shortener::infrastructure::persistence::{
    PgClickStatsRepository, PgShortUrlRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing vanity-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Generate and hash API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show record and click counts
    Stats,

    /// Bulk import exported data
    Import {
        #[command(subcommand)]
        action: ImportAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Generate a random token and print its digest
    Generate {
        /// Token length in characters
        #[arg(short, long, default_value_t = 48)]
        length: usize,
    },

    /// Print the digest of an existing token
    Hash {
        /// Token to hash (prompted for when omitted)
        token: Option<String>,
    },
}

/// Import subcommands.
#[derive(Subcommand)]
enum ImportAction {
    /// Import short URLs from a JSON file (`{"items": [...], "next_id": N}`)
    Urls {
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Import click statistics from a JSON file (`{"items": [...]}`)
    Clicks {
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending schema migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { action } => handle_token_action(action)?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Import { action } => handle_import_action(action, &connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Dispatches token commands. These never touch the database.
fn handle_token_action(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Generate { length } => {
            if length < 32 {
                anyhow::bail!("Token length must be at least 32, got {length}");
            }

            let token = generate_token(length);
            print_token(&token, &hash_token(&token));

            println!(
                "{}",
                "IMPORTANT: Save this token now! Only the digest is kept in configuration."
                    .red()
                    .bold()
            );
            println!();
        }
        TokenAction::Hash { token } => {
            let token = match token {
                Some(t) => t,
                None => Input::new().with_prompt("Token").interact_text()?,
            };

            print_token(&token, &hash_token(&token));
        }
    }

    Ok(())
}

fn print_token(token: &str, digest: &str) {
    println!("{}", "API Token".bright_blue().bold());
    println!();
    println!("  Token:  {}", token.bright_yellow().bold());
    println!("  Digest: {}", digest.cyan());
    println!();
    println!("{}", "Add the digest to the server configuration:".bright_white());
    println!("  {}={}", "API_TOKEN_HASHES".bright_cyan(), digest);
    println!();
    println!("{}", "Then send requests with:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();
}

/// Displays record and click counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let active: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM short_urls WHERE is_archived = FALSE")
            .fetch_one(pool)
            .await?;

    let archived: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM short_urls WHERE is_archived = TRUE")
            .fetch_one(pool)
            .await?;

    let stats_service = StatsService::new(Arc::new(PgClickStatsRepository::new(Arc::new(
        pool.clone(),
    ))));
    let click_rows = stats_service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count click records: {e}"))?;

    println!(
        "  Active URLs:    {}",
        active.to_string().bright_green().bold()
    );
    println!(
        "  Archived URLs:  {}",
        archived.to_string().bright_green().bold()
    );
    println!(
        "  Click records:  {}",
        click_rows.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Imports short URLs or click statistics from a JSON file.
async fn handle_import_action(action: ImportAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());

    match action {
        ImportAction::Urls { file, yes } => {
            let request: ImportUrlsRequest = read_import_file(&file)?;
            let next_id = request.next_id;
            let records: Vec<ShortUrl> = request.items.into_iter().map(ShortUrl::from).collect();

            println!("{}", "Import short URLs".bright_blue().bold());
            println!("  File:    {}", file.display().to_string().cyan());
            println!("  Records: {}", records.len().to_string().bright_white());
            if let Some(id) = next_id {
                println!("  Next id: {}", id.to_string().bright_white());
            }
            println!();

            if !confirm_import(yes)? {
                return Ok(());
            }

            let service = UrlService::new(Arc::new(PgShortUrlRepository::new(pool)));
            let imported = service
                .import(&records, next_id)
                .await
                .map_err(|e| anyhow::anyhow!("Import failed: {e}"))?;

            println!(
                "{} {} short URLs imported",
                "Done:".green().bold(),
                imported.to_string().bright_white().bold()
            );
        }
        ImportAction::Clicks { file, yes } => {
            let request: ImportClicksRequest = read_import_file(&file)?;
            let stats: Vec<ClickStat> = request.items.into_iter().map(ClickStat::from).collect();

            println!("{}", "Import click statistics".bright_blue().bold());
            println!("  File:    {}", file.display().to_string().cyan());
            println!("  Records: {}", stats.len().to_string().bright_white());
            println!();

            if !confirm_import(yes)? {
                return Ok(());
            }

            let service = StatsService::new(Arc::new(PgClickStatsRepository::new(pool)));
            let imported = service
                .import(&stats)
                .await
                .map_err(|e| anyhow::anyhow!("Import failed: {e}"))?;

            println!(
                "{} {} click records imported",
                "Done:".green().bold(),
                imported.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

fn read_import_file<T: DeserializeOwned + Validate>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let request: T = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid import file", path.display()))?;

    request
        .validate()
        .with_context(|| format!("{} contains invalid records", path.display()))?;

    Ok(request)
}

fn confirm_import(skip_confirm: bool) -> Result<bool> {
    if skip_confirm {
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt("Existing records with the same keys will be overwritten. Continue?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
    }

    Ok(confirmed)
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "Schema is up to date".green().bold());
        }
    }

    Ok(())
}

/// Generates a random alphanumeric token.
fn generate_token(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
