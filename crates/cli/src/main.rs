//! Vitrine CLI - drive the storefront widgets from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Filter the product grid
//! vitrine search "camiseta"
//!
//! # Add a product and show the cart
//! vitrine cart add p1
//! vitrine cart show
//!
//! # Register, then check out
//! vitrine account register --name Ana --cpf 123.456.789-09 --address "Rua A" --password s3nha
//! vitrine cart checkout
//!
//! # Run the carousel for three automatic steps
//! vitrine carousel play --advances 3
//! ```
//!
//! Every command renders the affected fragment as HTML on stdout. Alerts go
//! to stderr, as do logs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_storefront::config::LogFormat;
use vitrine_storefront::{AppError, StorefrontConfig};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine storefront widgets")]
struct Cli {
    /// Store file (overrides `VITRINE_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Page manifest JSON (overrides `VITRINE_PAGE_PATH`)
    #[arg(long, global = true)]
    page: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the product grid by title
    Search {
        /// Search query; empty shows every product
        #[arg(default_value = "")]
        query: String,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage customer accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Submit and list reviews
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Run the slide carousel
    Carousel {
        #[command(subcommand)]
        action: CarouselAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add { product_id: String },
    /// Add one unit to a line item
    Increase { product_id: String },
    /// Remove one unit from a line item
    Decrease { product_id: String },
    /// Remove a line item
    Remove { product_id: String },
    /// Show the cart
    Show,
    /// Check out (requires a logged-in customer)
    Checkout,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Register a new customer and log in
    Register {
        #[arg(short, long)]
        name: String,
        /// National identifier (CPF)
        #[arg(short, long)]
        cpf: String,
        #[arg(short, long)]
        address: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in
    Login {
        /// National identifier (CPF)
        #[arg(short, long)]
        cpf: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the customer sidebar
    Show,
    /// Remove a customer by identifier
    Remove { cpf: String },
    /// Show the other anonymous form (login or registration)
    Toggle,
}

#[derive(Subcommand)]
enum ReviewAction {
    /// Submit a review
    Add {
        #[arg(short, long)]
        name: String,
        /// One to five stars
        #[arg(short, long)]
        rating: u8,
        #[arg(short, long)]
        comment: String,
    },
    /// List reviews, newest first
    List,
}

#[derive(Subcommand)]
enum CarouselAction {
    /// Run autoplay and print the dots after each step
    Play {
        /// Stop after this many steps
        #[arg(long, default_value_t = 1)]
        advances: usize,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine_cli=info,vitrine_storefront=info".into());

    let (pretty, json) = match format {
        LogFormat::Pretty => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            output::alert(&format!("Invalid configuration: {e}"));
            return ExitCode::from(2);
        }
    };
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(page) = cli.page {
        config.page_path = Some(page);
    }

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);

    // The guard flushes Sentry when dropped, so return instead of exiting
    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => failure(e.as_ref()),
    }
}

/// Alert the user, report internal errors, and pick the exit code.
fn failure(e: &(dyn std::error::Error + 'static)) -> ExitCode {
    match e.downcast_ref::<AppError>() {
        Some(app) if app.is_user_facing() => output::alert(&app.user_message()),
        Some(app) => {
            app.report();
            output::alert(&app.user_message());
        }
        None => {
            tracing::error!("Command failed: {e}");
            output::alert(&e.to_string());
        }
    }
    ExitCode::FAILURE
}

async fn run(
    command: Commands,
    config: StorefrontConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut storefront = commands::open(config).await?;

    match command {
        Commands::Search { query } => commands::search::run(&storefront, &query)?,
        Commands::Cart { action } => match action {
            CartAction::Add { product_id } => commands::cart::add(&mut storefront, &product_id)?,
            CartAction::Increase { product_id } => {
                commands::cart::increase(&storefront, &product_id)?;
            }
            CartAction::Decrease { product_id } => {
                commands::cart::decrease(&storefront, &product_id)?;
            }
            CartAction::Remove { product_id } => {
                commands::cart::remove(&storefront, &product_id)?;
            }
            CartAction::Show => commands::cart::show(&storefront)?,
            CartAction::Checkout => commands::cart::checkout(&mut storefront)?,
        },
        Commands::Account { action } => match action {
            AccountAction::Register {
                name,
                cpf,
                address,
                password,
            } => commands::account::register(&mut storefront, name, cpf, address, password)?,
            AccountAction::Login { cpf, password } => {
                commands::account::login(&mut storefront, cpf, password)?;
            }
            AccountAction::Logout => commands::account::logout(&mut storefront)?,
            AccountAction::Show => commands::account::show(&mut storefront)?,
            AccountAction::Remove { cpf } => commands::account::remove(&mut storefront, &cpf)?,
            AccountAction::Toggle => commands::account::toggle(&mut storefront)?,
        },
        Commands::Review { action } => match action {
            ReviewAction::Add {
                name,
                rating,
                comment,
            } => commands::review::add(&mut storefront, name, rating, comment)?,
            ReviewAction::List => commands::review::list(&storefront)?,
        },
        Commands::Carousel { action } => match action {
            CarouselAction::Play { advances } => {
                commands::carousel::play(&storefront, advances).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use vitrine_storefront::services::cart::CartError;
    use vitrine_storefront::store::StoreError;

    use super::*;

    #[test]
    fn test_failure_returns_exit_code() {
        let user = AppError::from(CartError::Empty);
        assert_eq!(failure(&user), ExitCode::FAILURE);

        let internal = AppError::Store(StoreError::Unavailable("Lock poisoned".to_string()));
        assert_eq!(failure(&internal), ExitCode::FAILURE);

        let other: Box<dyn std::error::Error> = "page file missing".into();
        assert_eq!(failure(other.as_ref()), ExitCode::FAILURE);
    }
}
