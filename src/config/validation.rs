use crate::config::types::{Config, CrawlerConfig, FetcherConfig, SinkConfig, SinkKind};
use crate::ConfigError;

/// Upper bound for the admission gate
const MAX_CONCURRENT_FETCHES_LIMIT: u32 = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_sink_config(&config.sink)?;
    Ok(())
}

/// Validates a crawl depth, whether it came from the file or the command line
pub fn validate_max_depth(max_depth: i64) -> Result<(), ConfigError> {
    if max_depth < 0 {
        return Err(ConfigError::Validation(format!(
            "max_depth must be >= 0, got {}",
            max_depth
        )));
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_max_depth(config.max_depth)?;

    if config.max_concurrent_fetches < 1
        || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES_LIMIT
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES_LIMIT, config.max_concurrent_fetches
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates sink configuration
fn validate_sink_config(config: &SinkConfig) -> Result<(), ConfigError> {
    if config.kind == SinkKind::Directory && config.destination.trim().is_empty() {
        return Err(ConfigError::Validation(
            "destination cannot be empty for the directory sink".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_negative_depth_rejected() {
        assert!(validate_max_depth(-1).is_err());
        assert!(validate_max_depth(0).is_ok());
    }

    #[test]
    fn test_concurrency_bounds() {
        let mut config = Config::default();
        config.crawler.max_concurrent_fetches = 0;
        assert!(validate(&config).is_err());

        config.crawler.max_concurrent_fetches = 257;
        assert!(validate(&config).is_err());

        config.crawler.max_concurrent_fetches = 1;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.fetcher.timeout_secs = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_blank_user_agent_rejected() {
        let mut config = Config::default();
        config.fetcher.user_agent = "   ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_destination_only_required_for_directory() {
        let mut config = Config::default();
        config.sink.destination = String::new();
        assert!(validate(&config).is_err());

        config.sink.kind = SinkKind::Discard;
        assert!(validate(&config).is_ok());
    }
}
