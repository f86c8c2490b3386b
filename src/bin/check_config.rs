use khetguru::cli::output::mask_database_url;
use khetguru::AppConfig;
use khetguru::KnowledgeBase;
use khetguru::PlannerCatalog;
use khetguru::Result;

fn main() -> Result<()> {
    println!("🔍 Checking configuration...");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            println!("❌ Configuration error: {e}");
            println!("\n💡 To fix this:");
            println!("  1. Copy config.example.toml to config.toml");
            println!("  2. Edit config.toml with your database connection details");
            println!("  3. Run this check again");
            return Err(e);
        }
    };

    println!("✅ Configuration loaded successfully!");
    println!("📋 Configuration details:");
    println!("  Database URL: {}", mask_database_url(config.database_url()));
    println!("  Max connections: {}", config.max_connections());
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  LLM: {}",
        if config.llm_enabled() {
            config.llm_model()
        } else {
            "disabled"
        }
    );

    let kb = KnowledgeBase::load(&config.knowledge)?;
    println!("  Knowledge base entries: {}", kb.len());

    let catalog = PlannerCatalog::load(&config.planner)?;
    println!(
        "  Planner crops: {} ({} region rules)",
        catalog.crops.len(),
        catalog.region_bias.len()
    );
    for crop in &catalog.crops {
        if !catalog.fallback_prices.contains_key(&crop.crop) {
            println!(
                "  ⚠️  {} has no fallback price, default {} applies",
                crop.crop, catalog.default_price_per_quintal
            );
        }
    }

    println!("\n🎉 Configuration check completed successfully!");
    Ok(())
}
