use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;

use crate::KhetGuruError;
use crate::Result;

/// Default recommendation stored with a soil test that carries no notes
pub const DEFAULT_SOIL_RECOMMENDATION: &str = "Balanced fertilizer schedule suggested.";

/// Trend threshold in percent
pub const TREND_THRESHOLD_PERCENT: f64 = 2.0;

/// Mandi price sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MarketPrice {
    pub id: i64,
    pub crop: String,
    pub mandi: String,
    pub price_per_quintal: f64,
    pub quality: String,
    pub unit: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMarketPriceRequest {
    pub crop: String,
    pub mandi: String,
    pub price_per_quintal: f64,
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_quality() -> String {
    "A".to_string()
}

fn default_unit() -> String {
    "quintal".to_string()
}

impl CreateMarketPriceRequest {
    pub fn new(crop: impl Into<String>, mandi: impl Into<String>, price_per_quintal: f64) -> Self {
        Self {
            crop: crop.into(),
            mandi: mandi.into(),
            price_per_quintal,
            quality: default_quality(),
            unit: default_unit(),
        }
    }
}

/// Query filter for mandi rates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MandiRateQuery {
    pub crop: Option<String>,
    pub mandi: Option<String>,
    pub limit: Option<i64>,
}

/// Direction of a crop's price against its recent average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent > TREND_THRESHOLD_PERCENT {
            Self::Up
        } else if change_percent < -TREND_THRESHOLD_PERCENT {
            Self::Down
        } else {
            Self::Stable
        }
    }
}

/// Latest price of a crop compared with its recent average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTrend {
    pub crop: String,
    pub current_price: f64,
    pub average_price: f64,
    pub change_percent: f64,
    pub trend: Trend,
    pub data_points: usize,
}

impl MarketTrend {
    /// Build from prices ordered newest first; `None` for an empty slice
    pub fn from_recent(crop: impl Into<String>, prices: &[f64]) -> Option<Self> {
        let current_price = *prices.first()?;
        let average_price = prices.iter().sum::<f64>() / prices.len() as f64;
        let change_percent = if average_price == 0.0 {
            0.0
        } else {
            ((current_price - average_price) / average_price * 1000.0).round() / 10.0
        };

        Some(Self {
            crop: crop.into(),
            current_price,
            average_price: (average_price * 100.0).round() / 100.0,
            change_percent,
            trend: Trend::from_change(change_percent),
            data_points: prices.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SoilTest {
    pub id: i64,
    pub user_id: i64,
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub recommendation: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSoilTestRequest {
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub notes: Option<String>,
}

impl CreateSoilTestRequest {
    /// Notes become the recommendation; blank notes get the default advice
    pub fn recommendation(&self) -> &str {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_SOIL_RECOMMENDATION)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FarmField {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub area_acres: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFieldRequest {
    pub name: String,
    pub area_acres: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub notes: Option<String>,
}

/// Crop a farmer chose to grow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CropPlan {
    pub id: i64,
    pub user_id: i64,
    pub crop: String,
    pub season: String,
    pub start_date: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCropPlanRequest {
    pub crop: String,
    pub season: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InsurancePolicy {
    pub id: i64,
    pub user_id: i64,
    pub policy_number: String,
    pub crop: String,
    pub coverage_amount: f64,
    pub premium: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePolicyRequest {
    pub policy_number: String,
    pub crop: String,
    pub coverage_amount: f64,
    pub premium: f64,
}

/// Severity of a weather alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Danger,
}

impl AlertSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl FromStr for AlertSeverity {
    type Err = KhetGuruError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "danger" => Ok(Self::Danger),
            other => Err(KhetGuruError::InvalidInput(format!(
                "severity must be info, warning or danger, got '{other}'"
            ))),
        }
    }
}

/// Alerts inserted by `seed_weather_alerts` into an empty table: (title, severity, message)
pub const DEMO_WEATHER_ALERTS: [(&str, AlertSeverity, &str); 3] = [
    (
        "Heavy Rainfall Alert",
        AlertSeverity::Warning,
        "Heavy rains expected in the next 24 hours. Drain excess water.",
    ),
    (
        "High Wind Advisory",
        AlertSeverity::Info,
        "Gusty winds likely. Secure farm structures and nets.",
    ),
    (
        "Heatwave Warning",
        AlertSeverity::Danger,
        "Severe heatwave conditions. Irrigate in evening, avoid mid-day work.",
    ),
];

/// Weather alert; `user_id` is `None` for alerts shown to every farmer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WeatherAlert {
    pub id: i64,
    pub user_id: Option<i64>,
    pub title: String,
    pub severity: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWeatherAlertRequest {
    pub title: String,
    pub severity: String,
    pub message: String,
    /// `"user"` keeps the alert private to the author, anything else is global
    #[serde(default)]
    pub scope: Option<String>,
}

impl CreateWeatherAlertRequest {
    pub fn is_user_scoped(&self) -> bool {
        self.scope
            .as_deref()
            .is_some_and(|scope| scope.trim().eq_ignore_ascii_case("user"))
    }

    /// Owner stored with the alert
    pub fn owner(&self, user_id: i64) -> Option<i64> {
        self.is_user_scoped().then_some(user_id)
    }
}

/// How a farmer wants to talk to an expert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    Call,
    Video,
    Chat,
}

impl ConsultationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Video => "video",
            Self::Chat => "chat",
        }
    }
}

impl FromStr for ConsultationType {
    type Err = KhetGuruError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(Self::Call),
            "video" => Ok(Self::Video),
            "chat" => Ok(Self::Chat),
            other => Err(KhetGuruError::InvalidInput(format!(
                "consultation_type must be call, video or chat, got '{other}'"
            ))),
        }
    }
}

/// Status of a freshly booked consultation
pub const CONSULTATION_PENDING: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ExpertConsultation {
    pub id: i64,
    pub user_id: i64,
    pub expert_name: String,
    pub topic: String,
    pub consultation_type: String,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConsultationRequest {
    pub expert_name: String,
    pub topic: String,
    #[serde(default = "default_consultation_type")]
    pub consultation_type: String,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub description: Option<String>,
}

fn default_consultation_type() -> String {
    ConsultationType::Call.as_str().to_string()
}

/// Suppliers inserted by `seed_demo_suppliers` into an empty table: (name, category, contact, location)
pub const DEMO_SUPPLIERS: [(&str, &str, &str, &str); 5] = [
    ("AgriSeeds Pro", "Seeds", "9876543210", "Delhi"),
    ("FarmTech Solutions", "Fertilizers", "9876543211", "Mumbai"),
    ("Green Harvest", "Equipment", "9876543212", "Bangalore"),
    ("Organic Plus", "Pesticides", "9876543213", "Pune"),
    ("KisanMart", "Seeds", "9876543214", "Hyderabad"),
];

/// Farm input supplier row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InputSupplier {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub contact: String,
    pub location: String,
}

/// Supplier as listed to farmers, with what its category usually covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierProfile {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub contact: String,
    pub location: String,
    pub specializations: Vec<String>,
    pub description: String,
}

/// Typical product lines of a supplier category
pub fn supplier_specializations(category: &str) -> &'static [&'static str] {
    match category.trim().to_lowercase().as_str() {
        "seeds" => &["Hybrid Varieties", "Organic Seeds", "Disease Resistant", "High Yield"],
        "fertilizers" => &["NPK Complex", "Organic Compost", "Micronutrients", "Bio-fertilizers"],
        "equipment" => &[
            "Irrigation Systems",
            "Harvesting Tools",
            "Soil Preparation",
            "Spraying Equipment",
        ],
        "pesticides" => &["Bio-pesticides", "Fungicides", "Herbicides", "Insecticides"],
        _ => &["General Agricultural Inputs"],
    }
}

impl From<InputSupplier> for SupplierProfile {
    fn from(supplier: InputSupplier) -> Self {
        let specializations = supplier_specializations(&supplier.category)
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let description = format!(
            "Supplier of quality {} for farmers in {}.",
            supplier.category.to_lowercase(),
            supplier.location
        );
        Self {
            id: supplier.id,
            name: supplier.name,
            category: supplier.category,
            contact: supplier.contact,
            location: supplier.location,
            specializations,
            description,
        }
    }
}

/// Escape `%`, `_` and `\` so user text matches literally inside an ILIKE pattern
pub fn like_contains(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
