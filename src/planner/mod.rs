//! Heuristic crop planner
//!
//! Ranks the reference crops for a season, soil pH, water availability and
//! state, and attaches a rough per-acre profit estimate. The agronomic
//! constants, the fallback price table and the regional preferences are data
//! (`data/planner.toml`), so they can be replaced without touching the scorer.

pub mod prices;
pub mod scorer;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use tracing::info;

pub use prices::NoMarketData;
pub use prices::PriceLookup;
pub use prices::PriceSnapshot;
pub use scorer::recommend_crops;
pub use scorer::score_crop;

use crate::config::PlannerConfig;
use crate::KhetGuruError;
use crate::Result;

/// Maximum number of recommendations returned
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// Lowest accepted soil pH
pub const MIN_PH: f64 = 3.5;
/// Highest accepted soil pH
pub const MAX_PH: f64 = 9.0;

const BUILTIN_CATALOG: &str = include_str!("../../data/planner.toml");

/// Irrigation water available to (or needed by) a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterTier {
    Low,
    Medium,
    High,
}

impl WaterTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for WaterTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaterTier {
    type Err = KhetGuruError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(KhetGuruError::InvalidInput(format!(
                "unknown water availability '{other}', expected low, medium or high"
            ))),
        }
    }
}

/// Agronomic reference values for one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCrop {
    pub crop: String,
    pub seasons: Vec<String>,
    /// Inclusive (low, high)
    pub ph_range: (f64, f64),
    pub water: WaterTier,
    pub duration_days: u32,
    pub seed_rate_kg_per_acre: f64,
    pub base_cost_per_acre: f64,
    pub yield_quintal_per_acre: f64,
}

impl ReferenceCrop {
    /// Case-insensitive season membership
    pub fn grows_in(&self, season: &str) -> bool {
        let season = season.trim();
        self.seasons.iter().any(|s| s.eq_ignore_ascii_case(season))
    }

    pub fn ph_suitable(&self, ph: f64) -> bool {
        let (low, high) = self.ph_range;
        (low..=high).contains(&ph)
    }
}

/// Score bonus for crops traditionally grown in some states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBias {
    /// Lowercase fragments searched for in the supplied state name
    pub states: Vec<String>,
    pub crops: Vec<String>,
    pub bonus: f64,
}

impl RegionBias {
    /// `state` must already be lowercased
    pub fn applies(&self, state: &str, crop: &str) -> bool {
        self.states.iter().any(|s| state.contains(s.as_str()))
            && self.crops.iter().any(|c| c == crop)
    }
}

/// Validated planner reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerCatalog {
    pub crops: Vec<ReferenceCrop>,
    #[serde(default)]
    pub fallback_prices: HashMap<String, f64>,
    #[serde(default)]
    pub region_bias: Vec<RegionBias>,
    #[serde(default = "default_price_per_quintal")]
    pub default_price_per_quintal: f64,
}

const fn default_price_per_quintal() -> f64 {
    2000.0
}

impl PlannerCatalog {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut catalog: Self = toml::from_str(content)?;
        catalog.normalize_names();
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Configured replacement catalog, or the built-in one
    pub fn load(config: &PlannerConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                info!("Loading planner catalog from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::builtin()?,
        };
        info!(
            "Planner catalog ready: {} crops, {} region rules",
            catalog.crops.len(),
            catalog.region_bias.len()
        );
        Ok(catalog)
    }

    // Crop ids and state fragments are compared in lowercase
    fn normalize_names(&mut self) {
        for crop in &mut self.crops {
            crop.crop = crop.crop.trim().to_lowercase();
        }
        for rule in &mut self.region_bias {
            for state in &mut rule.states {
                *state = state.trim().to_lowercase();
            }
            for crop in &mut rule.crops {
                *crop = crop.trim().to_lowercase();
            }
        }
        self.fallback_prices = std::mem::take(&mut self.fallback_prices)
            .into_iter()
            .map(|(crop, price)| (crop.trim().to_lowercase(), price))
            .collect();
    }

    /// Reject catalogs the scorer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.crops.is_empty() {
            return Err(KhetGuruError::Catalog("planner catalog has no crops".to_string()));
        }

        for crop in &self.crops {
            if crop.crop.is_empty() {
                return Err(KhetGuruError::Catalog("crop with empty name".to_string()));
            }
            let (low, high) = crop.ph_range;
            if low > high {
                return Err(KhetGuruError::Catalog(format!(
                    "{}: ph_range low {low} exceeds high {high}",
                    crop.crop
                )));
            }
            let numbers = [
                low,
                high,
                crop.seed_rate_kg_per_acre,
                crop.base_cost_per_acre,
                crop.yield_quintal_per_acre,
            ];
            if numbers.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(KhetGuruError::Catalog(format!(
                    "{}: numeric values must be finite and non-negative",
                    crop.crop
                )));
            }
        }

        for (crop, price) in &self.fallback_prices {
            if !price.is_finite() || *price < 0.0 {
                return Err(KhetGuruError::Catalog(format!(
                    "fallback price for {crop} must be non-negative"
                )));
            }
        }

        if !self.default_price_per_quintal.is_finite() || self.default_price_per_quintal < 0.0 {
            return Err(KhetGuruError::Catalog(
                "default_price_per_quintal must be non-negative".to_string(),
            ));
        }

        for rule in &self.region_bias {
            if rule.states.iter().any(String::is_empty) {
                return Err(KhetGuruError::Catalog(
                    "region rule with an empty state fragment".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn crop(&self, name: &str) -> Option<&ReferenceCrop> {
        let name = name.trim().to_lowercase();
        self.crops.iter().find(|c| c.crop == name)
    }

    /// Crop ids in catalog order
    pub fn crop_names(&self) -> Vec<String> {
        self.crops.iter().map(|c| c.crop.clone()).collect()
    }

    /// Reference price used when no market price is known
    pub fn fallback_price(&self, crop: &str) -> f64 {
        self.fallback_prices
            .get(crop)
            .copied()
            .unwrap_or(self.default_price_per_quintal)
    }
}

/// One planning request, already validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerInput {
    pub season: String,
    pub area_acres: f64,
    pub ph: Option<f64>,
    pub water_availability: Option<WaterTier>,
    pub state: Option<String>,
    pub district: Option<String>,
}

impl PlannerInput {
    pub fn new(season: impl Into<String>, area_acres: f64) -> Self {
        Self {
            season: season.into(),
            area_acres,
            ph: None,
            water_availability: None,
            state: None,
            district: None,
        }
    }

    #[must_use]
    pub fn with_ph(mut self, ph: f64) -> Self {
        self.ph = Some(ph);
        self
    }

    #[must_use]
    pub fn with_water(mut self, water: WaterTier) -> Self {
        self.water_availability = Some(water);
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

/// Where the price behind a profit estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Latest recorded mandi price
    Market,
    /// Reference price table
    Fallback,
}

/// One ranked crop with its explanation and economics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub crop: String,
    pub score: f64,
    pub season: String,
    pub ph_fit: (f64, f64),
    pub water_need: WaterTier,
    pub duration_days: u32,
    pub estimated_yield_quintal_per_acre: f64,
    pub assumed_price_per_quintal: f64,
    pub price_source: PriceSource,
    pub estimated_profit_per_acre: f64,
    pub estimated_profit_total: f64,
    pub seed_rate_kg_per_acre: f64,
    pub base_cost_per_acre: f64,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = PlannerCatalog::builtin().unwrap();
        assert_eq!(catalog.crops.len(), 9);
        assert_eq!(catalog.crops[0].crop, "rice");
        assert_eq!(catalog.region_bias.len(), 4);
        assert!((catalog.fallback_price("wheat") - 2200.0).abs() < f64::EPSILON);
        assert!((catalog.fallback_price("quinoa") - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_water_tier_parsing() {
        assert_eq!("Medium".parse::<WaterTier>().unwrap(), WaterTier::Medium);
        assert_eq!(" HIGH ".parse::<WaterTier>().unwrap(), WaterTier::High);
        let err = "plenty".parse::<WaterTier>().unwrap_err();
        assert!(matches!(err, KhetGuruError::InvalidInput(_)));
    }

    #[test]
    fn test_season_is_case_insensitive() {
        let catalog = PlannerCatalog::builtin().unwrap();
        let wheat = catalog.crop("Wheat").unwrap();
        assert!(wheat.grows_in("RABI"));
        assert!(!wheat.grows_in("kharif"));
    }

    #[test]
    fn test_rejects_inverted_ph_range() {
        let err = PlannerCatalog::from_toml_str(
            r#"
[[crops]]
crop = "okra"
seasons = ["zaid"]
ph_range = [7.0, 6.0]
water = "medium"
duration_days = 60
seed_rate_kg_per_acre = 4.0
base_cost_per_acre = 6000.0
yield_quintal_per_acre = 40.0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, KhetGuruError::Catalog(_)));
    }

    #[test]
    fn test_rejects_negative_cost() {
        let err = PlannerCatalog::from_toml_str(
            r#"
[[crops]]
crop = "okra"
seasons = ["zaid"]
ph_range = [6.0, 6.8]
water = "medium"
duration_days = 60
seed_rate_kg_per_acre = 4.0
base_cost_per_acre = -1.0
yield_quintal_per_acre = 40.0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_names_are_lowercased() {
        let catalog = PlannerCatalog::from_toml_str(
            r#"
[[crops]]
crop = "Okra"
seasons = ["zaid"]
ph_range = [6.0, 6.8]
water = "medium"
duration_days = 60
seed_rate_kg_per_acre = 4.0
base_cost_per_acre = 6000.0
yield_quintal_per_acre = 40.0

[fallback_prices]
OKRA = 1800.0

[[region_bias]]
states = ["Gujarat"]
crops = ["Okra"]
bonus = 0.5
"#,
        )
        .unwrap();
        assert_eq!(catalog.crops[0].crop, "okra");
        assert!((catalog.fallback_price("okra") - 1800.0).abs() < f64::EPSILON);
        assert!(catalog.region_bias[0].applies("north gujarat", "okra"));
    }
}
