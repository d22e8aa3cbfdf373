use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jobboard::{
    initialize, load_config, normalize, reset_and_reseed, resolve_seed_path, Config, Database,
    DatasetStats, OperationOutcome, Operations, Seeder,
};

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "Seed and maintain the job board dataset")]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overrides config and environment
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the startup path: seed when empty or when a re-seed was requested
    Init,

    /// Seed from a document without resetting anything
    Seed {
        /// Seed document (defaults to the configured seed file)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Reset every job position link and seed again
    Reseed {
        /// Seed document (defaults to the configured seed file)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Assign the default position to jobs without any
    Sweep,

    /// Delete every job position link
    ResetAssociations,

    /// Delete all data and re-seed on next startup (not in production)
    ResetAll {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show dataset counts
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical position for each label
    Normalize {
        /// Raw position labels
        #[arg(required = true)]
        labels: Vec<String>,
    },
}

fn load(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    config
        .apply_env_overrides()
        .context("Invalid environment override")?;
    if let Some(db) = &cli.db {
        config.database_path = Some(db.clone());
    }
    Ok(config)
}

fn open_database(config: &Config) -> Result<Database> {
    let path = config.database_path();
    let db = Database::open(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    tracing::info!(path = %path.display(), "database opened");
    Ok(db)
}

fn seed_path(config: &Config, file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(file) => Ok(file),
        None => {
            let cwd = std::env::current_dir().context("Cannot determine working directory")?;
            Ok(resolve_seed_path(config, &cwd))
        }
    }
}

fn finish(outcome: OperationOutcome) -> Result<()> {
    if !outcome.success {
        bail!(outcome.message);
    }
    println!("{}", outcome.message);
    for (key, value) in &outcome.counts {
        println!("  {:<24} {}", key, value);
    }
    Ok(())
}

fn print_stats(label: &str, stats: &DatasetStats) {
    println!("{}", label);
    println!("  companies     {}", stats.companies);
    println!("  jobs          {}", stats.jobs);
    println!("  positions     {}", stats.positions);
    println!("  associations  {}", stats.associations);
    println!("  orphan jobs   {}", stats.orphan_jobs);
}

fn run_seed(db: Database, config: &Config, path: &Path) -> Result<()> {
    let report = Seeder::new(db)
        .with_default_position(&config.default_position)
        .seed_file(path)
        .with_context(|| format!("Failed to seed from {}", path.display()))?;

    println!("{}", report.summary());
    for failure in &report.failures {
        println!("  skipped: {}", failure);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    if let Err(e) = jobboard::logging::init(&config.logging) {
        eprintln!("Logging disabled: {}", e);
    }
    log::debug!("Environment: {:?}", config.environment);

    match cli.command {
        Commands::Normalize { labels } => {
            for label in labels {
                println!("{:<32} -> {}", label, normalize(&label));
            }
        }

        Commands::Init => {
            let db = open_database(&config)?;
            let path = seed_path(&config, None)?;
            let outcome = initialize(&db, &config, &path)?;
            match (&outcome.trigger, &outcome.report, &outcome.seed_error) {
                (None, _, _) => println!("Dataset present, nothing to seed."),
                (Some(trigger), Some(report), _) => {
                    println!("Seeded ({:?}): {}", trigger, report.summary());
                }
                (Some(trigger), None, Some(error)) => {
                    println!("Seeding ({:?}) failed, continuing: {}", trigger, error);
                }
                (Some(trigger), None, None) => println!("Seeding ({:?}) produced no report", trigger),
            }
        }

        Commands::Seed { file } => {
            let db = open_database(&config)?;
            let path = seed_path(&config, file)?;
            run_seed(db, &config, &path)?;
        }

        Commands::Reseed { file } => {
            let db = open_database(&config)?;
            let path = seed_path(&config, file)?;
            let outcome = reset_and_reseed(&db, &config, &path)
                .with_context(|| format!("Failed to re-seed from {}", path.display()))?;
            print_stats("Before:", &outcome.before);
            println!("Removed {} job position links", outcome.links_reset);
            println!("{}", outcome.report.summary());
            print_stats("After:", &outcome.after);
        }

        Commands::Sweep => {
            let db = open_database(&config)?;
            finish(Operations::new(db, &config).fix_missing_positions())?;
        }

        Commands::ResetAssociations => {
            let db = open_database(&config)?;
            finish(Operations::new(db, &config).reset_associations())?;
        }

        Commands::ResetAll { yes } => {
            if !yes {
                bail!("Refusing to delete all data without --yes");
            }
            let db = open_database(&config)?;
            finish(Operations::new(db, &config).reset_and_flag_reseed())?;
        }

        Commands::Stats { json } => {
            let db = open_database(&config)?;
            let stats = jobboard::db::stats_repo::snapshot(&db).context("Failed to read statistics")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats("Dataset:", &stats);
                if !stats.by_position.is_empty() {
                    println!("{:<32} {:>6}", "POSITION", "JOBS");
                    println!("{}", "-".repeat(39));
                    for stat in &stats.by_position {
                        println!("{:<32} {:>6}", stat.name, stat.job_count);
                    }
                }
            }
        }
    }

    Ok(())
}
