//! Configuration loading tests

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use invoice_validator::config::Config;
    use invoice_validator::core::batch::BatchConfig;
    use invoice_validator::core::validation::HttpValidationClient;
    use invoice_validator::utils::error::ValidatorError;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn example_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/invoice-validator.yaml.example")
    }

    #[tokio::test]
    async fn test_example_config_matches_defaults() {
        let config = assert_ok!(Config::from_file(example_path()).await);
        let defaults = Config::default();

        assert_eq!(config.server.base_url, defaults.server.base_url);
        assert_eq!(config.batch.settle_delay_ms, 100);
        assert_eq!(config.batch.completion_delay_ms, 500);
        assert_eq!(config.batch.item_timeout_secs, 120);
        assert_eq!(config.form.save_debounce_ms, 300);
    }

    #[tokio::test]
    async fn test_file_then_overrides_feed_the_runtime() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  base_url: \"https://erp.example.com/\"\nbatch:\n  settle_delay_ms: 20"
        )
        .unwrap();

        let mut config = assert_ok!(Config::from_file(file.path()).await);
        let overrides: HashMap<&str, &str> = [
            ("INVOICE_ITEM_TIMEOUT_SECS", "30"),
            ("INVOICE_API_KEY", "k"),
            ("INVOICE_API_SECRET", "s"),
        ]
        .into();
        assert_ok!(config.apply_overrides(|key| overrides.get(key).map(|v| v.to_string())));

        assert_ok!(config.validate());
        assert_eq!(config.server.authorization().as_deref(), Some("token k:s"));

        let batch = BatchConfig::from(&config.batch);
        assert_eq!(batch.settle_delay, Duration::from_millis(20));
        assert_eq!(batch.item_timeout, Duration::from_secs(30));

        let client = assert_ok!(HttpValidationClient::new(&config.server));
        assert_eq!(
            client.endpoint(),
            "https://erp.example.com/api/method/invoice.api.invoice_ai_validation.recheck_invoice_with_ai"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_a_config_error() {
        let err = assert_err!(Config::from_file("/nonexistent/invoice-validator.yaml").await);
        assert!(matches!(err, ValidatorError::Config(_)));
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  base_url: \"not a url\"").unwrap();

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, ValidatorError::Config(_)));
    }
}
