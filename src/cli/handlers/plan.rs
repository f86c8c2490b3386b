//! Crop planning from the command line

use crate::api::types::PlannerRequest;
use crate::cli::output::*;
use crate::database::Database;
use crate::planner::recommend_crops;
use crate::planner::PlannerCatalog;
use crate::planner::PriceSnapshot;
use crate::AppConfig;
use crate::Result;

/// Arguments of `khetguru plan`
#[derive(Debug, Clone)]
pub struct PlanArgs {
    pub season: String,
    pub area: f64,
    pub ph: Option<f64>,
    pub water: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub offline: bool,
    pub json: bool,
}

pub async fn handle_plan(config: &AppConfig, args: PlanArgs) -> Result<()> {
    let input = PlannerRequest {
        season: args.season,
        area_acres: args.area,
        ph: args.ph,
        water_availability: args.water,
        state: args.state,
        district: args.district,
    }
    .validate()?;

    let catalog = PlannerCatalog::load(&config.planner)?;

    let prices = if args.offline {
        PriceSnapshot::new()
    } else {
        match Database::from_config(config).await {
            Ok(db) => db.price_snapshot(&catalog.crop_names()).await,
            Err(e) => {
                print_warning(&format!("Database unavailable ({e}), using reference prices"));
                PriceSnapshot::new()
            }
        }
    };

    let recs = recommend_crops(&catalog, &input, &prices, config.planner_max_results());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recs)?);
    } else {
        print_info(&format!(
            "Season {} | {} acres{}",
            input.season,
            input.area_acres,
            input
                .state
                .as_deref()
                .map(|s| format!(" | {s}"))
                .unwrap_or_default()
        ));
        print_recommendations(&recs);
    }
    Ok(())
}
