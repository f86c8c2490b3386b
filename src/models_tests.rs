//! Unit tests for data models
//!
//! Tests request defaults, serialization, and trend computation.

#[cfg(test)]
mod tests {
    use crate::models::*;

    // ====== Market Price Tests ======

    #[test]
    fn test_market_price_request_defaults() {
        let request: CreateMarketPriceRequest =
            serde_json::from_str(r#"{"crop": "wheat", "mandi": "Delhi", "price_per_quintal": 2250.0}"#)
                .unwrap();
        assert_eq!(request.quality, "A");
        assert_eq!(request.unit, "quintal");
    }

    #[test]
    fn test_market_price_request_new() {
        let request = CreateMarketPriceRequest::new("rice", "Kolkata", 2300.0);
        assert_eq!(request.crop, "rice");
        assert_eq!(request.quality, "A");
    }

    // ====== Trend Tests ======

    #[test]
    fn test_trend_thresholds() {
        assert_eq!(Trend::from_change(2.1), Trend::Up);
        assert_eq!(Trend::from_change(2.0), Trend::Stable);
        assert_eq!(Trend::from_change(-2.0), Trend::Stable);
        assert_eq!(Trend::from_change(-2.5), Trend::Down);
    }

    #[test]
    fn test_market_trend_from_recent() {
        // newest first: latest 2400 against an average of 2200
        let trend = MarketTrend::from_recent("wheat", &[2400.0, 2100.0, 2100.0]).unwrap();
        assert!((trend.average_price - 2200.0).abs() < 1e-9);
        assert!((trend.change_percent - 9.1).abs() < 1e-9);
        assert_eq!(trend.trend, Trend::Up);
        assert_eq!(trend.data_points, 3);
    }

    #[test]
    fn test_market_trend_single_point_is_stable() {
        let trend = MarketTrend::from_recent("bajra", &[2520.0]).unwrap();
        assert!(trend.change_percent.abs() < 1e-9);
        assert_eq!(trend.trend, Trend::Stable);
    }

    #[test]
    fn test_market_trend_empty() {
        assert!(MarketTrend::from_recent("rice", &[]).is_none());
    }

    #[test]
    fn test_trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Down).unwrap(), "\"down\"");
    }

    // ====== Soil Test Tests ======

    #[test]
    fn test_soil_recommendation_default() {
        let mut request = CreateSoilTestRequest {
            ph: 6.8,
            nitrogen: 240.0,
            phosphorus: 18.0,
            potassium: 150.0,
            notes: None,
        };
        assert_eq!(request.recommendation(), DEFAULT_SOIL_RECOMMENDATION);

        request.notes = Some("   ".to_string());
        assert_eq!(request.recommendation(), DEFAULT_SOIL_RECOMMENDATION);

        request.notes = Some("Add gypsum before sowing".to_string());
        assert_eq!(request.recommendation(), "Add gypsum before sowing");
    }

    // ====== Weather Alert Tests ======

    #[test]
    fn test_alert_severity_parse() {
        assert_eq!(" Danger ".parse::<AlertSeverity>().unwrap(), AlertSeverity::Danger);
        assert_eq!("info".parse::<AlertSeverity>().unwrap().as_str(), "info");
        let err = "severe".parse::<AlertSeverity>().unwrap_err();
        assert!(matches!(err, crate::KhetGuruError::InvalidInput(_)));
    }

    #[test]
    fn test_alert_scope() {
        let mut request: CreateWeatherAlertRequest = serde_json::from_str(
            r#"{"title": "Frost", "severity": "warning", "message": "Cover nursery beds"}"#,
        )
        .unwrap();
        assert_eq!(request.owner(42), None);

        request.scope = Some("USER".to_string());
        assert_eq!(request.owner(42), Some(42));

        request.scope = Some("district".to_string());
        assert_eq!(request.owner(42), None);
    }

    #[test]
    fn test_demo_alerts_cover_every_severity() {
        for severity in [AlertSeverity::Info, AlertSeverity::Warning, AlertSeverity::Danger] {
            assert!(DEMO_WEATHER_ALERTS.iter().any(|(_, s, _)| *s == severity));
        }
    }

    // ====== Expert and Supplier Tests ======

    #[test]
    fn test_consultation_type_defaults_to_call() {
        let request: CreateConsultationRequest =
            serde_json::from_str(r#"{"expert_name": "Dr. Sharma", "topic": "soil salinity"}"#)
                .unwrap();
        assert_eq!(request.consultation_type, "call");
        assert_eq!(
            request.consultation_type.parse::<ConsultationType>().unwrap(),
            ConsultationType::Call
        );
        assert!("fax".parse::<ConsultationType>().is_err());
    }

    #[test]
    fn test_supplier_profile_specializations() {
        let profile = SupplierProfile::from(InputSupplier {
            id: 7,
            name: "KisanMart".to_string(),
            category: "Seeds".to_string(),
            contact: "9876543214".to_string(),
            location: "Hyderabad".to_string(),
        });
        assert_eq!(profile.specializations.len(), 4);
        assert!(profile.specializations.contains(&"High Yield".to_string()));
        assert!(profile.description.contains("seeds"));

        assert_eq!(supplier_specializations("Drones"), ["General Agricultural Inputs"]);
        assert_eq!(supplier_specializations(" PESTICIDES ")[0], "Bio-pesticides");
    }

    #[test]
    fn test_like_contains_escapes_wildcards() {
        assert_eq!(like_contains(" whe "), "%whe%");
        assert_eq!(like_contains("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }
}
