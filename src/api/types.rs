//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::llm::ChatMessage;
use crate::models::MarketPrice;
use crate::planner::PlannerInput;
use crate::planner::Recommendation;
use crate::planner::WaterTier;
use crate::planner::MAX_PH;
use crate::planner::MIN_PH;
use crate::KhetGuruError;
use crate::Result;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub knowledge_entries: usize,
    pub llm_enabled: bool,
}

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Chat response
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub timestamp: String,
    pub assistant: String,
}

/// Crop planner request
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerRequest {
    pub season: String,
    pub area_acres: f64,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub water_availability: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl PlannerRequest {
    /// Check the request and turn it into scorer input
    pub fn validate(self) -> Result<PlannerInput> {
        let season = self.season.trim().to_lowercase();
        if season.is_empty() {
            return Err(KhetGuruError::InvalidInput("season is required".to_string()));
        }

        if !self.area_acres.is_finite() || self.area_acres <= 0.0 {
            return Err(KhetGuruError::InvalidInput(
                "area_acres must be greater than 0".to_string(),
            ));
        }

        if let Some(ph) = self.ph {
            if !(MIN_PH..=MAX_PH).contains(&ph) {
                return Err(KhetGuruError::InvalidInput(format!(
                    "ph must be between {MIN_PH} and {MAX_PH}"
                )));
            }
        }

        let water_availability = non_blank(self.water_availability)
            .map(|w| w.parse::<WaterTier>())
            .transpose()?;

        Ok(PlannerInput {
            season,
            area_acres: self.area_acres,
            ph: self.ph,
            water_availability,
            state: non_blank(self.state),
            district: non_blank(self.district),
        })
    }
}

/// Crop planner response
#[derive(Debug, Serialize, Deserialize)]
pub struct PlannerResponse {
    pub count: usize,
    pub recommendations: Vec<Recommendation>,
}

/// Mandi rates response
#[derive(Debug, Serialize, Deserialize)]
pub struct MandiRatesResponse {
    pub count: usize,
    pub items: Vec<MarketPrice>,
}

/// Demo seeding response
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub inserted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlannerRequest {
        PlannerRequest {
            season: " Rabi ".to_string(),
            area_acres: 2.0,
            ph: Some(6.5),
            water_availability: Some("Medium".to_string()),
            state: Some("  ".to_string()),
            district: None,
        }
    }

    #[test]
    fn test_validate_normalizes() {
        let input = request().validate().unwrap();
        assert_eq!(input.season, "rabi");
        assert_eq!(input.water_availability, Some(WaterTier::Medium));
        assert_eq!(input.state, None);
    }

    #[test]
    fn test_validate_rejects_bad_area() {
        for area in [0.0, -1.0, f64::NAN] {
            let err = PlannerRequest {
                area_acres: area,
                ..request()
            }
            .validate()
            .unwrap_err();
            assert!(matches!(err, KhetGuruError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_validate_rejects_missing_season() {
        let err = PlannerRequest {
            season: "   ".to_string(),
            ..request()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("season"));
    }

    #[test]
    fn test_validate_ph_bounds() {
        assert!(PlannerRequest {
            ph: Some(3.5),
            ..request()
        }
        .validate()
        .is_ok());
        assert!(PlannerRequest {
            ph: Some(9.1),
            ..request()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_validate_water_tier() {
        assert!(PlannerRequest {
            water_availability: Some("plenty".to_string()),
            ..request()
        }
        .validate()
        .is_err());

        let input = PlannerRequest {
            water_availability: Some(String::new()),
            ..request()
        }
        .validate()
        .unwrap();
        assert_eq!(input.water_availability, None);
    }

    #[test]
    fn test_chat_request_history_optional() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert!(request.history.is_empty());
    }
}
