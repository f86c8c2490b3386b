//! CLI output formatting utilities

use crate::kb::KbMatch;
use crate::planner::PriceSource;
use crate::planner::Recommendation;
use crate::AppConfig;

/// Safely truncate a string at character boundary (not byte boundary)
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Whole-rupee amount with comma thousands separators, e.g. `₹59,200`
#[must_use]
pub fn format_rupees(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Print crop recommendations as a table
pub fn print_recommendations(recs: &[Recommendation]) {
    if recs.is_empty() {
        print_warning("No suitable crop found for these constraints");
        return;
    }

    println!("🌾 {} recommended crops:", recs.len());
    println!();
    println!(
        "  {:<3} {:<10} {:>6} {:>12} {:>14} {:>14}  Reason",
        "#", "Crop", "Score", "Price/qtl", "Profit/acre", "Profit total"
    );
    println!("  {:-<96}", "");
    for (i, rec) in recs.iter().enumerate() {
        let price_marker = match rec.price_source {
            PriceSource::Market => "",
            PriceSource::Fallback => "*",
        };
        println!(
            "  {:<3} {:<10} {:>6.2} {:>12} {:>14} {:>14}  {}",
            i + 1,
            rec.crop,
            rec.score,
            format!("{}{price_marker}", format_rupees(rec.assumed_price_per_quintal)),
            format_rupees(rec.estimated_profit_per_acre),
            format_rupees(rec.estimated_profit_total),
            truncate_str(&rec.reason, 60)
        );
    }
    if recs.iter().any(|r| r.price_source == PriceSource::Fallback) {
        println!();
        println!("  * reference price, no mandi price recorded");
    }
}

/// Print which catalog entry answered a question
pub fn print_kb_match(found: Option<&KbMatch<'_>>) {
    match found {
        Some(m) => println!(
            "🔎 Knowledge base entry #{} (score {}, {})",
            m.entry_index, m.score, m.language
        ),
        None => println!("🔎 No knowledge base entry matched"),
    }
}

/// Print configuration with secrets masked
pub fn print_config(config: &AppConfig) {
    println!("📋 KhetGuru Configuration:");
    println!();

    println!("🗄️  Database:");
    println!("  URL: {}", mask_database_url(config.database_url()));
    println!("  Max connections: {}", config.max_connections());
    println!("  Min connections: {}", config.min_connections());
    println!("  Connection timeout: {}s", config.connection_timeout());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("🌐 Server:");
    println!("  Address: {}:{}", config.server.host, config.server.port);
    println!("  CORS: {}", config.server.enable_cors);
    println!(
        "  API key: {}",
        config.backend_api_key().map_or("not set", |_| "***set***")
    );
    println!();

    println!("🤖 LLM:");
    println!("  Endpoint: {}", config.llm_endpoint());
    println!("  Model: {}", config.llm_model());
    println!(
        "  Key: {}",
        config.llm_key().map_or("not set (knowledge base only)", |_| "***set***")
    );
    println!();

    println!("📚 Catalogs:");
    println!(
        "  Knowledge base: {}",
        config
            .knowledge
            .catalog_path
            .as_ref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
    );
    println!(
        "  Planner: {}",
        config
            .planner
            .catalog_path
            .as_ref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
    );
    println!("  Max recommendations: {}", config.planner_max_results());
}

/// Mask database URL for display (hide password)
#[must_use]
pub fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            format!(
                "{}://{}@{}:{}{}",
                parsed.scheme(),
                parsed.username(),
                host,
                parsed.port().unwrap_or(5432),
                parsed.path()
            )
        } else {
            "***masked***".to_string()
        }
    } else {
        "***invalid***".to_string()
    }
}

/// Print colored output functions
pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
