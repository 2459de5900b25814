//! Country info CLI
//!
//! Runs the API server, or performs a single lookup against the upstream
//! through the same cached service the server uses.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use countries_api::{ApiConfig, ApiServer, AppState};
use countries_core::types::{CountryRecord, FilterQuery};

/// Country info backend
#[derive(Parser)]
#[command(name = "countries")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8000")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// List all countries
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one country by alpha-2 or alpha-3 code
    Show {
        /// Country code, e.g. FR or FRA
        code: String,
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// List countries in a region
    Region {
        /// Region name, e.g. Europe
        region: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search countries by name, capital, region and timezone
    Search {
        /// Name substring
        #[arg(long)]
        name: Option<String>,
        /// Capital substring
        #[arg(long)]
        capital: Option<String>,
        /// Exact region
        #[arg(long)]
        region: Option<String>,
        /// Exact timezone, e.g. UTC+01:00
        #[arg(long)]
        timezone: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "countries=debug,tower_http=debug,info"
    } else {
        "countries=info,warn"
    };

    let (json_layer, text_layer) = if cli.log_json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(json_layer)
        .with(text_layer)
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::List { json } => cmd_list(json).await,
        Commands::Show { code, json } => cmd_show(&code, json).await,
        Commands::Region { region, json } => cmd_region(&region, json).await,
        Commands::Search {
            name,
            capital,
            region,
            timezone,
            json,
        } => {
            let query = FilterQuery {
                name,
                capital,
                region,
                timezone,
            };
            cmd_search(query, json).await
        }
    }
}

fn app_state() -> Result<AppState> {
    AppState::new(ApiConfig::from_env()).context("Failed to configure upstream client")
}

/// Run the API server
async fn cmd_serve(port: u16, bind: &str) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    println!("{}", "🌍 Starting country info API server...".cyan().bold());
    println!("   {} http://{}/health", "Health check:".dimmed(), addr);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(ApiConfig::from_env()).context("Failed to build server")?;
    info!(%addr, "Server configured, binding");
    server.run(addr).await?;

    Ok(())
}

async fn cmd_list(json: bool) -> Result<()> {
    let state = app_state()?;
    let countries = state
        .service
        .get_all_countries()
        .await
        .context("Failed to fetch countries")?;
    print_countries(&countries, json)
}

async fn cmd_show(code: &str, json: bool) -> Result<()> {
    let state = app_state()?;
    let country = state
        .service
        .get_country_by_code(code)
        .await
        .with_context(|| format!("Failed to look up '{}'", code))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&country)?);
        return Ok(());
    }

    println!("{} {}", country.name.bold(), format!("({})", country.code).dimmed());
    println!("   {} {}", "Capital:".green(), country.capital);
    println!("   {} {}", "Region:".green(), country.region);
    println!("   {} {}", "Population:".green(), country.population);
    if !country.currency.is_empty() {
        let currencies: Vec<String> = country
            .currency
            .iter()
            .map(|(code, c)| format!("{} {} ({})", code, c.name, c.symbol))
            .collect();
        println!("   {} {}", "Currency:".green(), currencies.join(", "));
    }
    if !country.timezones.is_empty() {
        println!("   {} {}", "Timezones:".green(), country.timezones.join(", "));
    }
    if !country.flag.is_empty() {
        println!("   {} {}", "Flag:".dimmed(), country.flag);
    }
    Ok(())
}

async fn cmd_region(region: &str, json: bool) -> Result<()> {
    let state = app_state()?;
    let countries = state
        .service
        .get_countries_by_region(region)
        .await
        .with_context(|| format!("Failed to list region '{}'", region))?;
    print_countries(&countries, json)
}

async fn cmd_search(query: FilterQuery, json: bool) -> Result<()> {
    let state = app_state()?;
    let countries = state
        .service
        .search(query)
        .await
        .context("Search failed")?;
    print_countries(&countries, json)
}

fn print_countries(countries: &[CountryRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(countries)?);
        return Ok(());
    }

    if countries.is_empty() {
        println!("{}", "No countries matched.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<5} {:<32} {:<20} {:<10} {:>14}",
            "CODE", "NAME", "CAPITAL", "REGION", "POPULATION"
        )
        .bold()
    );
    for c in countries {
        println!(
            "{:<5} {:<32} {:<20} {:<10} {:>14}",
            c.code, c.name, c.capital, c.region, c.population
        );
    }
    println!("\n{} {}", countries.len().to_string().cyan(), "countries".dimmed());
    Ok(())
}
