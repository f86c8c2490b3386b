//! Database setup handlers

use crate::cli::output::*;
use crate::database::Database;
use crate::AppConfig;
use crate::Result;

pub async fn handle_init(config: &AppConfig) -> Result<()> {
    print_info("Initializing database schema...");
    let database = Database::from_config(config).await?;
    database.init_schema().await?;
    print_success("Database schema ready");
    Ok(())
}

pub async fn handle_seed(config: &AppConfig) -> Result<()> {
    let database = Database::from_config(config).await?;
    database.verify_schema_or_error().await?;

    report_seed("mandi prices", database.seed_demo_prices().await?);
    report_seed("weather alerts", database.seed_weather_alerts().await?);
    report_seed("input suppliers", database.seed_demo_suppliers().await?);
    Ok(())
}

fn report_seed(what: &str, inserted: usize) {
    if inserted == 0 {
        print_info(&format!("Demo {what} already present"));
    } else {
        print_success(&format!("Inserted {inserted} demo {what}"));
    }
}
