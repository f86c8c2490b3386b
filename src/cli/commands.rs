//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "khetguru")]
#[command(about = "KhetGuru agricultural assistant: chatbot, crop planner and mandi prices")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve {
        /// Host to bind to (default: server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (default: server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable CORS (default: server.enable_cors)
        #[arg(long)]
        cors: bool,
    },
    /// Ask KhetGuru a question
    Ask {
        /// Question in English or Hindi
        message: String,
        /// Use the configured chat model, falling back to the knowledge base
        #[arg(long)]
        llm: bool,
        /// Show which catalog entry matched
        #[arg(long)]
        explain: bool,
    },
    /// Recommend crops for a season and field
    Plan {
        /// Season: kharif, rabi or zaid
        #[arg(short, long)]
        season: String,
        /// Field area in acres
        #[arg(short, long)]
        area: f64,
        /// Soil pH (3.5 - 9.0)
        #[arg(long)]
        ph: Option<f64>,
        /// Water availability: low, medium or high
        #[arg(short, long)]
        water: Option<String>,
        /// State, used for regional preferences
        #[arg(long)]
        state: Option<String>,
        /// District
        #[arg(long)]
        district: Option<String>,
        /// Skip the database and price with the fallback table
        #[arg(long)]
        offline: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Initialize database schema
    Init,
    /// Insert demo mandi prices, weather alerts and input suppliers
    Seed,
    /// Show current configuration
    Config,
}
