use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use trainee_registry::config::{self, Config};
use trainee_registry::constants::PLACEHOLDER;
use trainee_registry::logging;
use trainee_registry::observability;
use trainee_registry::pipeline::processing::resolve::ordered_details;
use trainee_registry::pipeline::storage::JsonFileStore;
use trainee_registry::{RegistryError, RowBatch, TraineeDirectory, TraineeProfile};

#[derive(Parser)]
#[command(name = "trainee-registry")]
#[command(about = "Publish and search training-program trainee profiles")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print collected metrics in Prometheus text format before exiting
    #[arg(long)]
    dump_metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a tabulated upload and replace the stored collection with it
    Publish {
        /// JSON row source: {"headers": [...], "rows": [{...}]}
        #[arg(long)]
        rows: PathBuf,
    },
    /// Find one trainee by training id, name or phone number
    Search {
        query: String,
    },
    /// Show what is currently published
    List,
}

fn print_profile(profile: &TraineeProfile) {
    println!("\n👤 {} ({})", profile.name, profile.id);
    for (key, value) in ordered_details(&profile.details) {
        println!("   {}: {}", key.trim(), value);
    }

    println!("\n📚 Courses: {}", profile.courses.len());
    for course in profile.sorted_courses() {
        let credits = course
            .credits
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        println!(
            "   {:<10} {} | credits: {} | completed: {}{}",
            course.course_code.as_deref().unwrap_or(PLACEHOLDER),
            course.course_name,
            credits,
            course.is_completed.label(),
            if course.production_project { " | not counted in plan" } else { "" }
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load_from(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let _log_guard = logging::init_logging(&config.logging);

    if let Err(e) = observability::init() {
        warn!("Metrics disabled: {}", e);
    }

    let store = Arc::new(JsonFileStore::new(config.store.path.clone()));
    let directory = TraineeDirectory::new(store.clone());

    let outcome = match cli.command {
        Commands::Publish { rows } => {
            let batch = RowBatch::load_json(&rows).await?;
            match directory.publish(&batch).await {
                Ok(published) => {
                    println!("✅ Published {} profiles to {}", published.profiles.len(), store.path().display());
                    if !published.rejected_rows.is_empty() {
                        println!("⚠️  Rows without a training id were skipped: {:?}", published.rejected_rows);
                    }
                    if published.merged_rows > 0 {
                        println!("   {} rows were merged into earlier rows of the same trainee", published.merged_rows);
                    }
                    Ok(())
                }
                Err(RegistryError::EmptyBatch) => {
                    println!("❌ No valid trainee data found in the upload. Check that id and name columns exist.");
                    Err(RegistryError::EmptyBatch)
                }
                Err(e) => {
                    println!("❌ Upload could not be saved; the previously published data is still in effect.");
                    Err(e)
                }
            }
        }
        Commands::Search { query } => {
            directory.refresh().await?;
            match directory.search(&query).await {
                Ok(Some(hit)) => {
                    info!(rule = %hit.rule, "Trainee found");
                    print_profile(&hit.profile);
                    Ok(())
                }
                Ok(None) => {
                    println!("🔍 No trainee matches '{}' (training id, name or phone).", query.trim());
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Commands::List => match store.snapshot().await? {
            Some(snapshot) => {
                println!(
                    "📦 Batch {} published at {} with {} profiles",
                    snapshot.batch_id,
                    snapshot.published_at.to_rfc3339(),
                    snapshot.profiles.len()
                );
                for profile in &snapshot.profiles {
                    println!("   {}  {}", profile.id, profile.name);
                }
                Ok(())
            }
            None => {
                println!("📦 Nothing has been published yet.");
                Ok(())
            }
        },
    };

    if cli.dump_metrics {
        if let Some(rendered) = observability::render() {
            println!("\n{}", rendered);
        }
    }

    outcome.map_err(Into::into)
}
