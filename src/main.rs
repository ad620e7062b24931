// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "smart-camera")]
#[command(about = "Geotagged photo capture for the civic complaint portal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reverse-geocode a coordinate pair to an address
    Resolve {
        /// Latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long)]
        lng: f64,
    },

    /// Stamp an existing photo with a geotag watermark
    Stamp {
        /// Input image path
        #[arg(short, long)]
        input: PathBuf,

        /// Latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long)]
        lng: f64,

        /// Address line for the stamp (reverse-geocoded when omitted)
        #[arg(short, long)]
        address: Option<String>,

        /// Output file path (default: <input>_stamped.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the full capture pipeline against a file-backed camera
    Capture {
        /// Image file standing in for the live camera feed
        #[arg(short, long)]
        source: PathBuf,

        /// Latitude reported by the location provider
        #[arg(long)]
        lat: f64,

        /// Longitude reported by the location provider
        #[arg(long)]
        lng: f64,

        /// Output file path (default: ~/Pictures/smart-camera/capture_TIMESTAMP.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Submit a stamped photo as a complaint to the portal API
    Submit {
        /// Stamped image path
        #[arg(short, long)]
        image: PathBuf,

        /// Latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long)]
        lng: f64,

        /// Resolved address (reverse-geocoded when omitted)
        #[arg(short, long)]
        address: Option<String>,

        /// Complaint title
        #[arg(short, long)]
        title: String,

        /// Complaint description
        #[arg(short, long)]
        description: String,

        /// Complaint category
        #[arg(short, long, default_value = "General")]
        category: String,

        /// Bearer token for the portal API
        #[arg(long)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=smart_camera=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { lat, lng } => cli::resolve(lat, lng).await,
        Commands::Stamp {
            input,
            lat,
            lng,
            address,
            output,
        } => cli::stamp(input, lat, lng, address, output).await,
        Commands::Capture {
            source,
            lat,
            lng,
            output,
        } => cli::capture(source, lat, lng, output).await,
        Commands::Submit {
            image,
            lat,
            lng,
            address,
            title,
            description,
            category,
            token,
        } => {
            cli::submit(
                image,
                lat,
                lng,
                address,
                title,
                description,
                category,
                token,
            )
            .await
        }
    }
}
