//! Olist Features - Per-Order Feature Engineering for E-Commerce Data
//!
//! Command-line entry point: load the Olist CSV datasets, inspect them, and
//! export the assembled per-order training table.

use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use olist_features::{load_datasets, OrderFeatures, TrainingOptions};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "olist_features")]
#[command(about = "Per-order feature engineering for the Olist e-commerce dataset")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the tool is alive
    Ping,

    /// Load the datasets and print per-table row counts
    Summary {
        /// Directory containing the Olist CSV files
        #[arg(short, long)]
        data_dir: PathBuf,
    },

    /// Build the training table and export it as CSV
    Export {
        /// Directory containing the Olist CSV files
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Keep orders regardless of delivery status
        #[arg(long)]
        keep_undelivered: bool,

        /// Include the seller-customer distance column
        #[arg(long)]
        with_distance: bool,
    },
}

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ping => {
            println!("pong");
        }

        Commands::Summary { data_dir } => {
            let data = load_datasets(&data_dir)?;

            println!("\nDataset Summary");
            println!("===============");
            for (name, rows) in data.row_counts() {
                println!("{:<16} {:>8} rows", name, rows);
            }
        }

        Commands::Export {
            data_dir,
            output,
            keep_undelivered,
            with_distance,
        } => {
            info!("Loading datasets from {:?}", data_dir);
            let data = load_datasets(&data_dir)?;

            let options = TrainingOptions {
                is_delivered: !keep_undelivered,
                with_distance_seller_customer: with_distance,
            };
            let table = OrderFeatures::new(&data).training_table(options);

            info!("Writing {} rows to {:?}", table.len(), output);
            table.write_csv(File::create(&output)?)?;

            println!("\nTraining Table");
            println!("==============");
            println!("Rows:    {}", table.len());
            println!("Columns: {}", table.column_names().join(", "));
        }
    }

    Ok(())
}
