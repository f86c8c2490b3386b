//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::KhetGuruError;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = KhetGuruError::Custom("Test error message".to_string());
        assert_eq!(format!("{error}"), "Test error message");
    }

    #[test]
    fn test_invalid_input_error() {
        let error = KhetGuruError::InvalidInput("area_acres must be greater than 0".to_string());
        let display = format!("{error}");
        assert!(display.starts_with("Invalid input"));
        assert!(display.contains("area_acres"));
    }

    #[test]
    fn test_config_error() {
        let error = KhetGuruError::ConfigError("Invalid configuration".to_string());
        assert!(matches!(error, KhetGuruError::ConfigError(_)));
        assert!(format!("{error}").contains("configuration"));
    }

    #[test]
    fn test_catalog_error() {
        let error = KhetGuruError::Catalog("entry 3 has no patterns".to_string());
        assert_eq!(format!("{error}"), "Catalog error: entry 3 has no patterns");
    }

    // ====== Classification Tests ======

    #[test]
    fn test_client_errors() {
        assert!(KhetGuruError::NotFound("plan".into()).is_client_error());
        assert!(KhetGuruError::Conflict("policy exists".into()).is_client_error());
        assert!(KhetGuruError::InvalidInput("season".into()).is_client_error());
    }

    #[test]
    fn test_server_errors() {
        assert!(!KhetGuruError::LlmError("timeout".into()).is_client_error());
        assert!(!KhetGuruError::HttpError("refused".into()).is_client_error());
        assert!(!KhetGuruError::Custom("boom".into()).is_client_error());
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: KhetGuruError = io_err.into();
        assert!(matches!(err, KhetGuruError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: KhetGuruError = json_err.into();
        assert!(matches!(err, KhetGuruError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: KhetGuruError = toml_err.into();
        assert!(matches!(err, KhetGuruError::TomlParsing(_)));
    }
}
