//! CLI administration tool for shorturl.
//!
//! Provides commands for managing users, inspecting short URLs and checking
//! the store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --username alice
//!
//! # Look up a user by id or username
//! cargo run --bin admin -- user show alice
//!
//! # Most recent short URLs
//! cargo run --bin admin -- urls recent --limit 20
//!
//! # Details of a single short URL
//! cargo run --bin admin -- urls show promo
//!
//! # Check store connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `MONGODB_URI` (or `MONGO_HOST`/`MONGO_PORT`/...),
//! `MONGODB_DATABASE`, `STORE_BACKEND`.

use shorturl::application::services::{UrlService, UserService};
use shorturl::config;
use shorturl::domain::entities::{RecordId, User};
use shorturl::server::build_repositories;
use shorturl::state::{DynUrlService, DynUserService};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect short URLs
    Urls {
        #[command(subcommand)]
        action: UrlsAction,
    },

    /// Store operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        #[arg(short, long)]
        username: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a user by id or username
    Show { id_or_username: String },
}

#[derive(Subcommand)]
enum UrlsAction {
    /// List the most recently created short URLs
    Recent {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show a short URL by code
    Show { short_code: String },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let repositories = build_repositories(&config);

    let url_service = UrlService::new(repositories.urls);
    let user_service = UserService::new(repositories.users);

    match cli.command {
        Commands::User { action } => handle_user_action(action, &user_service).await?,
        Commands::Urls { action } => handle_urls_action(action, &url_service).await?,
        Commands::Db { action } => handle_db_action(action, &url_service).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, service: &DynUserService) -> Result<()> {
    match action {
        UserAction::Create { username, yes } => create_user(service, username, yes).await,
        UserAction::Show { id_or_username } => show_user(service, &id_or_username).await,
    }
}

/// Registers a user with interactive prompts.
///
/// The password is always read from the terminal without echo.
async fn create_user(
    service: &DynUserService,
    username: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create user '{}'?", username))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = service
        .register(username, password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    print_user(&user);

    Ok(())
}

/// Looks up a user.
///
/// Numeric input is tried as an id first, then as a username.
async fn show_user(service: &DynUserService, id_or_username: &str) -> Result<()> {
    let by_id = match id_or_username.parse::<u128>() {
        Ok(id) => service
            .get_user(RecordId::new(id))
            .await
            .map_err(|e| anyhow::anyhow!("Store error: {}", e))?,
        Err(_) => None,
    };

    let user = match by_id {
        Some(user) => Some(user),
        None => service
            .find_by_username(id_or_username)
            .await
            .map_err(|e| anyhow::anyhow!("Store error: {}", e))?,
    };

    let user = user.context("User not found")?;
    print_user(&user);

    Ok(())
}

fn print_user(user: &User) {
    println!();
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!("  Username: {}", user.username.cyan());
    println!();
}

async fn handle_urls_action(action: UrlsAction, service: &DynUrlService) -> Result<()> {
    match action {
        UrlsAction::Recent { limit } => list_recent(service, limit).await,
        UrlsAction::Show { short_code } => show_url(service, &short_code).await,
    }
}

/// Lists recent short URLs, newest first.
///
/// # Output Format
///
/// ```text
/// 🔗 Recent URLs
///
///   Code       Clicks   Created              Long URL
///   ──────────────────────────────────────────────────────────────────────
///   promo      3        2025-01-15 10:30     https://example.com/sale
/// ```
async fn list_recent(service: &DynUrlService, limit: usize) -> Result<()> {
    println!("{}", "🔗 Recent URLs".bright_blue().bold());
    println!();

    let urls = service
        .get_recent_urls(Some(limit))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;

    if urls.is_empty() {
        println!("{}", "  No short URLs yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<8} {:<20} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for url in &urls {
        println!(
            "  {:<10} {:<8} {:<20} {}",
            url.short_code.cyan(),
            url.clicks.to_string().bright_green(),
            url.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            url.long_url
        );
    }

    println!();
    println!("  Total: {}", urls.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_url(service: &DynUrlService, short_code: &str) -> Result<()> {
    let url = service
        .get_url_by_short_code(short_code)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?
        .context("Short URL not found")?;

    println!();
    println!("  ID:       {}", url.id.to_string().bright_black());
    println!("  Code:     {}", url.short_code.cyan());
    println!("  Long URL: {}", url.long_url);
    if let Some(alias) = &url.custom_alias {
        println!("  Alias:    {}", alias.cyan());
    }
    println!(
        "  Created:  {}",
        url.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Clicks:   {}",
        url.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, service: &DynUrlService) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking store connection...".bright_blue());

            service
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Store unreachable: {}", e))?;

            println!("{}", "✅ Store connection OK".green().bold());
        }
    }

    Ok(())
}
