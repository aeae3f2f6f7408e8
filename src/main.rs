//! Skillgraph CLI - Command-line interface for the competency extraction engine

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use skillgraph::config::{self, DEFAULT_THRESHOLD, SkillgraphConfig};
use skillgraph::extract::ExtractionOrchestrator;
use skillgraph::storage::RelationStore;
use skillgraph::taxonomy::{self, TaxonomyIndex};
use skillgraph::ui;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "skillgraph")]
#[command(version = "0.1.0")]
#[command(about = "Competency extraction engine - deterministic ESCO skill matching")]
#[command(long_about = r#"
Skillgraph matches free-text course descriptions against the ESCO skill
taxonomy and maintains the course↔competency relation graph, enabling:
  • Reproducible competency extraction from course text
  • Bidirectional course/competency lookups
  • A small HTTP API for the same operations

Example usage:
  skillgraph init --catalog data/esco.json
  skillgraph extract --name data101 --text "Covers project management basics"
  skillgraph serve --port 8080 --catalog data/esco.json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to skillgraph.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the taxonomy catalog and build the index once
    Init {
        /// Path to the ESCO catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Also bulk-load the catalog into the competency table
        #[arg(long)]
        persist: bool,
    },

    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Path to the ESCO catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Extraction confidence threshold
        #[arg(short, long)]
        threshold: Option<f32>,
    },

    /// Create a course and extract its competency relations
    Extract {
        /// Unique course name
        #[arg(short, long)]
        name: String,

        /// Course description text (or use --file)
        #[arg(short = 'x', long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the course description from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Path to the ESCO catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Extraction confidence threshold
        #[arg(short, long)]
        threshold: Option<f32>,
    },

    /// List all courses
    Courses {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// List all competencies
    Competencies {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show table counts
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Init { catalog, database, persist } => {
            let catalog_path = resolve_catalog(catalog, &config)?;
            let entries = taxonomy::load_catalog(&catalog_path)?;
            let index = TaxonomyIndex::build(entries)?;

            println!("📚 Catalog: {:?}", catalog_path);
            println!("✅ Taxonomy index built over {} entries.", index.len());

            if persist {
                let database_path = resolve_database(database, &config);
                config::ensure_db_dir(&database_path)?;
                let mut store = RelationStore::open(&database_path)?;

                let catalog_entries: Vec<_> = index.entries().cloned().collect();
                let created = store.import_taxonomy(&catalog_entries)?;
                println!(
                    "🗄️  Persisted catalog into {:?}: {} competencies created.",
                    database_path, created
                );
            }
        }

        Commands::Serve { port, catalog, database, threshold } => {
            let catalog_path = resolve_catalog(catalog, &config)?;
            let database_path = resolve_database(database, &config);
            let threshold = resolve_threshold(threshold, &config);
            config::ensure_db_dir(&database_path)?;

            println!("🗄️  Database: {:?}", database_path);
            println!("📚 Catalog: {:?} (loaded on POST /initialize)", catalog_path);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(skillgraph::server::start_server(
                port,
                database_path,
                catalog_path,
                threshold,
            ))?;
        }

        Commands::Extract { name, text, file, catalog, database, threshold } => {
            let body = match (text, file) {
                (Some(text), _) => text,
                (None, Some(file)) => std::fs::read_to_string(&file)?,
                (None, None) => anyhow::bail!("provide the course text via --text or --file"),
            };

            let catalog_path = resolve_catalog(catalog, &config)?;
            let database_path = resolve_database(database, &config);
            let threshold = resolve_threshold(threshold, &config);
            config::ensure_db_dir(&database_path)?;

            let index = TaxonomyIndex::build(taxonomy::load_catalog(&catalog_path)?)?;
            let mut store = RelationStore::open(&database_path)?;

            println!("🔍 Extracting competencies for '{}' (threshold: {})...", name, threshold);
            let (course, relations) = ExtractionOrchestrator::new(&mut store)
                .add_course_and_extract(&name, &body, &index, threshold)?;

            if relations.is_empty() {
                println!("∅ No competencies matched; course {} stored without relations.", course.id);
            } else {
                let competencies = store.competencies_by_course(course.id)?;
                println!(
                    "✅ Course {} stored with {} relations:",
                    course.id,
                    relations.len()
                );
                println!(
                    "{}",
                    ui::record_table(
                        competencies
                            .iter()
                            .map(|k| (k.id, k.name.as_str(), k.body.as_str()))
                    )
                );
            }
        }

        Commands::Courses { database } => {
            let store = RelationStore::open(&resolve_database(database, &config))?;
            let courses = store.list_courses()?;

            if courses.is_empty() {
                println!("∅ No courses stored.");
            } else {
                println!(
                    "{}",
                    ui::record_table(
                        courses.iter().map(|c| (c.id, c.name.as_str(), c.body.as_str()))
                    )
                );
            }
        }

        Commands::Competencies { database } => {
            let store = RelationStore::open(&resolve_database(database, &config))?;
            let competencies = store.list_competencies()?;

            if competencies.is_empty() {
                println!("∅ No competencies stored.");
            } else {
                println!(
                    "{}",
                    ui::record_table(
                        competencies
                            .iter()
                            .map(|k| (k.id, k.name.as_str(), k.body.as_str()))
                    )
                );
            }
        }

        Commands::Stats { database } => {
            let database_path = resolve_database(database, &config);
            let store = RelationStore::open(&database_path)?;
            let stats = store.stats()?;

            println!("📊 Skillgraph Statistics ({:?})", database_path);
            println!("{}", ui::stats_table(&stats));
        }
    }

    Ok(())
}

fn resolve_catalog(cli: Option<PathBuf>, config: &SkillgraphConfig) -> anyhow::Result<PathBuf> {
    cli.or_else(|| config.catalog.as_ref().map(PathBuf::from))
        .ok_or_else(|| anyhow::anyhow!("no catalog file given (use --catalog or skillgraph.toml)"))
}

fn resolve_database(cli: Option<PathBuf>, config: &SkillgraphConfig) -> PathBuf {
    cli.or_else(|| config.database.as_ref().map(PathBuf::from))
        .unwrap_or_else(config::default_database_path)
}

fn resolve_threshold(cli: Option<f32>, config: &SkillgraphConfig) -> f32 {
    cli.or(config.threshold).unwrap_or(DEFAULT_THRESHOLD)
}
