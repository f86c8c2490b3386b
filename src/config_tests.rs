//! Unit tests for configuration module
//!
//! These tests validate configuration parsing and defaults.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::config::*;

    // ====== Default Value Tests ======

    #[test]
    fn test_default_server() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert!(config.enable_cors);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_default_llm() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.max_tokens, 300);
        assert_eq!(config.history_turns, 8);
    }

    #[test]
    fn test_default_planner() {
        let config = PlannerConfig::default();
        assert_eq!(config.max_results, 8);
        assert!(config.catalog_path.is_none());
    }

    // ====== Parsing Tests ======

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.max_connections(), 10);
        assert_eq!(config.planner_max_results(), 8);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [database]
            url = "postgresql://farmer:secret@db:5432/agri"

            [server]
            port = 9090
            api_key = "s3cret"

            [planner]
            max_results = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.database_url(), "postgresql://farmer:secret@db:5432/agri");
        // unspecified fields in a present section keep their defaults
        assert_eq!(config.max_connections(), 10);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.backend_api_key(), Some("s3cret"));
        assert_eq!(config.planner_max_results(), 3);
    }

    #[test]
    fn test_max_results_out_of_range_rejected() {
        for value in [0, 9, 20] {
            let err = AppConfig::from_toml_str(&format!("[planner]\nmax_results = {value}"))
                .unwrap_err();
            assert!(
                matches!(err, crate::KhetGuruError::ConfigError(_)),
                "max_results = {value} accepted"
            );
        }
        let config = AppConfig::from_toml_str("[planner]\nmax_results = 8").unwrap();
        assert_eq!(config.planner_max_results(), 8);
    }

    #[test]
    fn test_explicit_llm_key_wins() {
        let config = AppConfig::from_toml_str(
            r#"
            [llm]
            api_key = "sk-from-file"
            model = "gpt-3.5-turbo"
            "#,
        )
        .unwrap();

        assert!(config.llm_enabled());
        assert_eq!(config.llm_key(), Some("sk-from-file"));
        assert_eq!(config.llm_model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_empty_backend_key_means_open() {
        let config = AppConfig::from_toml_str("[server]\napi_key = \"\"").unwrap();
        assert!(config.backend_api_key().is_none());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = AppConfig::from_toml_str("[server\nport = 1");
        assert!(matches!(result, Err(crate::KhetGuruError::TomlParsing(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::from_file("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(crate::KhetGuruError::Io(_))));
    }
}
