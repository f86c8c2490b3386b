//! Crop scoring and ranking

use tracing::debug;

use super::PlannerCatalog;
use super::PlannerInput;
use super::PriceLookup;
use super::PriceSource;
use super::Recommendation;
use super::ReferenceCrop;
use super::DEFAULT_MAX_RESULTS;

const SEASON_SCORE: f64 = 2.0;
const PH_IN_RANGE_SCORE: f64 = 2.0;
/// pH outside the range earns this minus the distance to the nearest bound
const PH_NEAR_MISS_SCORE: f64 = 1.5;
const WATER_MATCH_SCORE: f64 = 1.5;
const WATER_PARTIAL_SCORE: f64 = 0.5;

/// Suitability score of one crop, 0 when nothing fits
pub fn score_crop(catalog: &PlannerCatalog, crop: &ReferenceCrop, input: &PlannerInput) -> f64 {
    let mut score = 0.0;

    if crop.grows_in(&input.season) {
        score += SEASON_SCORE;
    }

    if let Some(ph) = input.ph {
        score += ph_score(crop.ph_range, ph);
    }

    if let Some(water) = input.water_availability {
        score += if water == crop.water {
            WATER_MATCH_SCORE
        } else {
            WATER_PARTIAL_SCORE
        };
    }

    score + region_bonus(catalog, crop, input)
}

fn ph_score((low, high): (f64, f64), ph: f64) -> f64 {
    if (low..=high).contains(&ph) {
        PH_IN_RANGE_SCORE
    } else {
        let distance = (ph - low).abs().min((ph - high).abs());
        (PH_NEAR_MISS_SCORE - distance).max(0.0)
    }
}

// Every matching rule adds its bonus
fn region_bonus(catalog: &PlannerCatalog, crop: &ReferenceCrop, input: &PlannerInput) -> f64 {
    let Some(state) = input.state.as_deref() else {
        return 0.0;
    };
    let state = state.to_lowercase();
    catalog
        .region_bias
        .iter()
        .filter(|rule| rule.applies(&state, &crop.crop))
        .map(|rule| rule.bonus)
        .sum()
}

fn reason(crop: &ReferenceCrop, input: &PlannerInput, region_applied: bool) -> String {
    let mut bits = Vec::new();
    if crop.grows_in(&input.season) {
        bits.push("season match".to_string());
    }
    if input.ph.is_some_and(|ph| crop.ph_suitable(ph)) {
        bits.push("pH suitable".to_string());
    }
    if input.water_availability == Some(crop.water) {
        bits.push("water availability match".to_string());
    }
    if region_applied {
        if let Some(state) = &input.state {
            bits.push(format!("region: {state}"));
        }
    }

    if bits.is_empty() {
        "balanced choice".to_string()
    } else {
        bits.join(", ")
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rank the catalog crops for `input`, best first
///
/// Crops scoring zero or less are left out. Equal scores keep catalog order.
/// At most `DEFAULT_MAX_RESULTS` records are returned whatever `max_results` asks for.
pub fn recommend_crops(
    catalog: &PlannerCatalog,
    input: &PlannerInput,
    prices: &impl PriceLookup,
    max_results: usize,
) -> Vec<Recommendation> {
    let mut scored: Vec<(f64, &ReferenceCrop)> = catalog
        .crops
        .iter()
        .map(|crop| (score_crop(catalog, crop, input), crop))
        .filter(|(score, _)| *score > 0.0)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(max_results.min(DEFAULT_MAX_RESULTS));

    debug!(
        "Planner: {} candidates for season '{}'",
        scored.len(),
        input.season
    );

    scored
        .into_iter()
        .map(|(score, crop)| {
            let (price, price_source) = match prices.latest_price(&crop.crop) {
                Some(price) => (price, PriceSource::Market),
                None => (catalog.fallback_price(&crop.crop), PriceSource::Fallback),
            };
            let revenue_per_acre = crop.yield_quintal_per_acre * price;
            let profit_per_acre = revenue_per_acre - crop.base_cost_per_acre;
            let region_applied = region_bonus(catalog, crop, input) > 0.0;

            Recommendation {
                crop: crop.crop.clone(),
                score: round2(score),
                season: input.season.clone(),
                ph_fit: crop.ph_range,
                water_need: crop.water,
                duration_days: crop.duration_days,
                estimated_yield_quintal_per_acre: crop.yield_quintal_per_acre,
                assumed_price_per_quintal: price,
                price_source,
                estimated_profit_per_acre: round2(profit_per_acre),
                estimated_profit_total: round2(profit_per_acre * input.area_acres),
                seed_rate_kg_per_acre: crop.seed_rate_kg_per_acre,
                base_cost_per_acre: crop.base_cost_per_acre,
                reason: reason(crop, input, region_applied),
            }
        })
        .collect()
}
