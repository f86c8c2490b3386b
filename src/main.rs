use clap::Parser;
use khetguru::cli::handle_ask;
use khetguru::cli::handle_config;
use khetguru::cli::handle_init;
use khetguru::cli::handle_plan;
use khetguru::cli::handle_seed;
use khetguru::cli::handle_serve;
use khetguru::cli::print_warning;
use khetguru::cli::Cli;
use khetguru::cli::Commands;
use khetguru::cli::PlanArgs;
use khetguru::AppConfig;
use khetguru::KhetGuruError;
use khetguru::Result;
use tracing::info;

fn load_config(cli: &Cli) -> Result<AppConfig> {
    match AppConfig::load_from(cli.config.as_deref()) {
        Ok(config) => Ok(config),
        // Without an explicit --config the built-in defaults are good enough
        Err(KhetGuruError::Io(e)) if cli.config.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            print_warning("No config.toml found, using built-in defaults");
            Ok(AppConfig::from_env_defaults())
        }
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(&cli)?;

    // Initialize logging
    if cli.verbose {
        khetguru::logging::init_logging_with_level("debug")?;
    } else {
        khetguru::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Serve { host, port, cors } => {
            handle_serve(&config, host, port, cors).await?;
        }
        Commands::Ask {
            message,
            llm,
            explain,
        } => {
            handle_ask(&config, &message, llm, explain).await?;
        }
        Commands::Plan {
            season,
            area,
            ph,
            water,
            state,
            district,
            offline,
            json,
        } => {
            handle_plan(
                &config,
                PlanArgs {
                    season,
                    area,
                    ph,
                    water,
                    state,
                    district,
                    offline,
                    json,
                },
            )
            .await?;
        }
        Commands::Init => {
            handle_init(&config).await?;
        }
        Commands::Seed => {
            handle_seed(&config).await?;
        }
        Commands::Config => {
            handle_config(&config)?;
        }
    }

    Ok(())
}
