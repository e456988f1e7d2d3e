pub mod color;
pub mod config;
pub mod data;
pub mod geometry;
pub mod normalize;
pub mod processing;
pub mod render;
pub mod server;
pub mod types;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the spreadsheet and write a GeoJSON snapshot
    Generate {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        #[arg(short, long, value_name = "FILE", default_value = "umkm.geojson")]
        output: PathBuf,
    },
    /// Serve the dataset and the static map assets
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate { config, output } => {
            let app_config = config::AppConfig::load_from_file(config)?;

            // 1. Fetch raw rows
            let rows = data::fetch_rows(&app_config.source).await?;

            // 2. Normalize and parse
            let mut state = processing::MapState::default();
            processing::rebuild(&mut state, &app_config, &rows);
            println!(
                "{} rows: {} locations, {} areas, {} categories",
                state.stats.total_rows,
                state.stats.valid_locations,
                state.stats.valid_areas,
                state.stats.distinct_categories
            );

            // 3. Write the snapshot
            render::write_snapshot(output, &state)?;
            println!("Generation complete!");
        }
        Commands::Serve { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;

            // Initial load; the server still starts on failure so the
            // front-end can surface the error state and retry via refresh.
            let mut state = processing::MapState::default();
            match data::fetch_rows(&app_config.source).await {
                Ok(rows) => processing::rebuild(&mut state, &app_config, &rows),
                Err(err) => tracing::error!("Initial load failed, starting empty: {}", err),
            }

            server::start_server(app_config, state).await?;
        }
    }

    Ok(())
}
