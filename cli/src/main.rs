mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    TargetInput, cmd_recipes, cmd_restrictions, cmd_session, cmd_shop, cmd_show, cmd_target,
    load_recipes,
};
use crate::config::Config;
use plated_core::models::CalorieRange;

#[derive(Parser)]
#[command(
    name = "plated",
    version,
    about = "A small meal planner CLI",
    long_about = "Filter healthy recipes by calories and cooking time, collect a \
                  shopping list, and estimate your daily calorie target."
)]
struct Cli {
    /// Recipe catalog (JSON) to use instead of the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes matching a calorie range and time tags
    Recipes {
        /// Minimum calories (default from config, 200)
        #[arg(long)]
        min: Option<u32>,
        /// Maximum calories (default from config, 600)
        #[arg(long)]
        max: Option<u32>,
        /// Time tag: quick (<=15 min), medium (16-30 min), long (>30 min). Repeatable.
        #[arg(short, long)]
        time: Vec<String>,
        /// Only show liked recipes
        #[arg(long)]
        liked: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a recipe with its ingredients
    Show {
        /// Recipe ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a shopping list from one or more recipes
    Shop {
        /// Recipe IDs, in the order their ingredients should be added
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Print one item per line, without numbering
        #[arg(long, conflicts_with = "json")]
        export: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Estimate the recommended daily calorie intake
    Target {
        /// Body weight in kg
        #[arg(long)]
        weight: Option<String>,
        /// Height in cm
        #[arg(long)]
        height: Option<String>,
        /// Age in years
        #[arg(long)]
        age: Option<String>,
        /// Activity level: low, moderate, high
        #[arg(short, long, default_value = "moderate")]
        activity: String,
        /// Goal: lose, maintain, gain
        #[arg(short, long, default_value = "maintain")]
        goal: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the dietary restrictions a profile can select
    Restrictions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start an interactive session (filters, likes, shopping list, profile)
    Session,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    init_logging(if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    });
    tracing::debug!(config_dir = %config.config_dir.display(), "configuration loaded");

    let catalog_path = cli.catalog.or(config.catalog);
    let recipes = load_recipes(catalog_path.as_deref())?;

    match cli.command {
        Commands::Recipes {
            min,
            max,
            time,
            liked,
            json,
        } => {
            let range = CalorieRange::new(
                min.unwrap_or(config.calorie_range.low),
                max.unwrap_or(config.calorie_range.high),
            );
            cmd_recipes(&recipes, range, &time, liked, json)
        }
        Commands::Show { id, json } => cmd_show(&recipes, id, json),
        Commands::Shop { ids, export, json } => cmd_shop(&recipes, &ids, export, json),
        Commands::Target {
            weight,
            height,
            age,
            activity,
            goal,
            json,
        } => cmd_target(
            &TargetInput {
                weight: weight.as_deref(),
                height: height.as_deref(),
                age: age.as_deref(),
                activity: &activity,
                goal: &goal,
            },
            json,
        ),
        Commands::Restrictions { json } => cmd_restrictions(json),
        Commands::Session => cmd_session(recipes, config.calorie_range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_recipes_filters() {
        let cli = Cli::parse_from([
            "plated", "recipes", "--min", "250", "--max", "500", "-t", "quick", "--time", "long",
        ]);
        match cli.command {
            Commands::Recipes { min, max, time, .. } => {
                assert_eq!(min, Some(250));
                assert_eq!(max, Some(500));
                assert_eq!(time, vec!["quick", "long"]);
            }
            _ => panic!("expected recipes"),
        }
    }

    #[test]
    fn test_cli_target_defaults() {
        let cli = Cli::parse_from(["plated", "target", "--weight", "70"]);
        match cli.command {
            Commands::Target {
                weight,
                height,
                activity,
                goal,
                ..
            } => {
                assert_eq!(weight.as_deref(), Some("70"));
                assert!(height.is_none());
                assert_eq!(activity, "moderate");
                assert_eq!(goal, "maintain");
            }
            _ => panic!("expected target"),
        }
    }

    #[test]
    fn test_cli_shop_requires_ids() {
        assert!(Cli::try_parse_from(["plated", "shop"]).is_err());
        assert!(Cli::try_parse_from(["plated", "shop", "1", "--export", "--json"]).is_err());
    }

    #[test]
    fn test_cli_global_catalog_flag() {
        let cli = Cli::parse_from(["plated", "session", "--catalog", "/tmp/c.json"]);
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/c.json")));
    }
}
