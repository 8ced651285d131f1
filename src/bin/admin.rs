//! CLI administration tool for telegram-web-auth.
//!
//! Provides maintenance commands for the sign-in token table and the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//!
//! # Token counts by state
//! cargo run --bin admin -- tokens stats
//!
//! # Inspect a token without consuming it
//! cargo run --bin admin -- tokens inspect 0b6f1c1e-3f43-4a8e-9a5c-2f0d1b7a9e11
//!
//! # Delete used and expired tokens
//! cargo run --bin admin -- tokens purge --yes
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)

use telegram_web_auth::config::{Config, mask_connection_string};
use telegram_web_auth::domain::entities::AuthToken;
use telegram_web_auth::domain::repositories::AuthTokenRepository;
use telegram_web_auth::infrastructure::persistence::PgAuthTokenRepository;
use telegram_web_auth::server::run_migrations;
use telegram_web_auth::utils::token::hash_token;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing telegram-web-auth.
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
    /// Manage sign-in tokens
    Tokens {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token maintenance subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Show token counts by state
    Stats,

    /// Show the record behind a raw token without consuming it
    Inspect {
        /// Raw token as it appears in the sign-in link
        token: String,
    },

    /// Delete used and expired tokens
    Purge {
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

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Tokens { action } => handle_token_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches token maintenance commands.
async fn handle_token_action(action: TokenAction, pool: PgPool) -> Result<()> {
    let repo = PgAuthTokenRepository::new(Arc::new(pool));

    match action {
        TokenAction::Stats => show_stats(&repo).await?,
        TokenAction::Inspect { token } => inspect_token(&repo, &token).await?,
        TokenAction::Purge { yes } => purge_tokens(&repo, yes).await?,
    }

    Ok(())
}

/// Displays token counts.
///
/// # Output Format
///
/// ```text
/// 📊 Sign-in tokens
///
///   Total:    12
///   Active:   1
///   Used:     9
///   Expired:  2
/// ```
async fn show_stats(repo: &PgAuthTokenRepository) -> Result<()> {
    println!("{}", "📊 Sign-in tokens".bright_blue().bold());
    println!();

    let stats = repo
        .stats(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!("  Total:    {}", stats.total.to_string().bright_white().bold());
    println!("  Active:   {}", stats.active.to_string().bright_green().bold());
    println!("  Used:     {}", stats.used.to_string().bright_black());
    println!("  Expired:  {}", stats.expired.to_string().yellow());
    println!();

    Ok(())
}

/// Prints the stored record for a raw token.
async fn inspect_token(repo: &PgAuthTokenRepository, raw: &str) -> Result<()> {
    println!("{}", "🔍 Inspect token".bright_blue().bold());
    println!();

    let token = repo
        .find_by_hash(&hash_token(raw.trim()))
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(token) = token else {
        println!("{}", "  Token not found".yellow());
        return Ok(());
    };

    println!("  ID:          {}", token.id.to_string().bright_black());
    println!("  Telegram ID: {}", token.telegram_id.cyan());
    if let Some(username) = &token.telegram_username {
        println!("  Username:    @{}", username.cyan());
    }
    println!(
        "  Created:     {}",
        token.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    println!(
        "  Expires:     {}",
        token.expires_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    println!("  Status:      {}", status_label(&token));
    println!();

    Ok(())
}

fn status_label(token: &AuthToken) -> ColoredString {
    let now = Utc::now();
    if token.used {
        "USED".bright_black()
    } else if token.is_expired_at(now) {
        "EXPIRED".yellow()
    } else {
        "ACTIVE".green()
    }
}

/// Deletes used and expired tokens after confirmation.
async fn purge_tokens(repo: &PgAuthTokenRepository, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Purge tokens".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all used and expired tokens?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .purge(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge tokens: {}", e))?;

    println!(
        "{} {}",
        "✅ Deleted tokens:".green().bold(),
        deleted.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            run_migrations(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
