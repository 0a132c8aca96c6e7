//! Location resolver CLI
//!
//! Exercises the resolver against the live services:
//!
//!   cargo run --features cli --bin location-resolver -- pincode 411038
//!   cargo run --features cli --bin location-resolver -- resolve --state Maharastra
//!   cargo run --features cli --bin location-resolver -- match Maharastra Maharashtra Gujarat
//!
//! Endpoints come from LOCATION_HUB_API_URL / POSTAL_PINCODE_API_URL (a .env
//! file is honoured). Set RUST_LOG=debug to see each request.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use publiclink_location::{
    closest_match, AdministrativeEntity, LocationHubClient, LocationResolver, PostalPincodeClient,
    ResolverConfig, Tier, TierPhase,
};

#[derive(Parser, Debug)]
#[command(name = "location-resolver")]
#[command(about = "Resolve Indian administrative locations by name or pincode")]
struct Args {
    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill the address from a 6-digit pincode and resolve it
    Pincode { code: String },

    /// Select names top-down and print the auto-corrected result
    Resolve {
        #[arg(long)]
        state: String,
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        taluka: Option<String>,
        #[arg(long)]
        village: Option<String>,
    },

    /// Match a name against candidate names without any network access
    Match {
        target: String,
        #[arg(required = true)]
        candidates: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter(log_filter()).init();

    let args = Args::parse();

    match args.command {
        Command::Match { target, candidates } => {
            run_match(&target, candidates, args.json)?;
        }
        Command::Pincode { code } => {
            let mut resolver = build_resolver()?;
            resolver.settle().await;
            resolver.set_pincode(code);
            if let Err(e) = resolver.lookup_pincode().await {
                eprintln!("{} {}", "ERROR:".red().bold(), e);
                std::process::exit(1);
            }
            resolver.settle().await;
            report(&resolver, args.json)?;
        }
        Command::Resolve {
            state,
            district,
            taluka,
            village,
        } => {
            let mut resolver = build_resolver()?;
            resolver.settle().await;
            let steps = [
                (Tier::State, Some(state)),
                (Tier::District, district),
                (Tier::Taluka, taluka),
                (Tier::Village, village),
            ];
            for (tier, name) in steps {
                let Some(name) = name else { break };
                resolver.select(tier, name);
                resolver.settle().await;
            }
            report(&resolver, args.json)?;
        }
    }

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "warn";

/// RUST_LOG when it parses, otherwise warnings only.
fn log_filter() -> EnvFilter {
    parse_log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn parse_log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn build_resolver() -> Result<LocationResolver> {
    let config = ResolverConfig::from_env()?;
    Ok(LocationResolver::new(
        Arc::new(LocationHubClient::new(&config)?),
        Arc::new(PostalPincodeClient::new(&config)?),
    ))
}

fn run_match(target: &str, candidates: Vec<String>, json: bool) -> Result<()> {
    let entities: Vec<AdministrativeEntity> = candidates
        .into_iter()
        .enumerate()
        .map(|(i, name)| AdministrativeEntity::new(i.to_string(), name))
        .collect();

    let found = closest_match(target, &entities);
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    match found {
        Some(entity) => println!("{} {}", "Match:".green().bold(), entity.name),
        None => println!(
            "{} no candidate close enough to '{}'",
            "No match:".yellow().bold(),
            target
        ),
    }
    Ok(())
}

fn report(resolver: &LocationResolver, json: bool) -> Result<()> {
    if json {
        let tiers: Vec<_> = Tier::ALL
            .iter()
            .map(|tier| {
                serde_json::json!({
                    "tier": tier,
                    "phase": resolver.phase(*tier),
                    "candidates": resolver.candidates(*tier).len(),
                    "error": resolver.tier_error(*tier),
                })
            })
            .collect();
        let output = serde_json::json!({
            "selection": resolver.selection(),
            "tiers": tiers,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Resolved location".cyan().bold());
    let selection = resolver.selection();
    if !selection.pincode.is_empty() {
        println!("  {:<9} {}", "pincode".cyan(), selection.pincode);
    }
    for tier in Tier::ALL {
        let name = selection.get(tier);
        let phase = format!("{:?}", resolver.phase(tier));
        let phase = match resolver.phase(tier) {
            TierPhase::Resolved => phase.green(),
            TierPhase::Unresolved => phase.yellow(),
            _ => phase.dimmed(),
        };
        println!(
            "  {:<9} {:<30} [{}] {} candidates",
            tier.to_string().cyan(),
            if name.is_empty() { "-" } else { name },
            phase,
            resolver.candidates(tier).len()
        );
        if let Some(error) = resolver.tier_error(tier) {
            println!("  {:<9} {} {}", "", "fetch failed:".red(), error);
        }
    }
    Ok(())
}
