use crate::config::types::{
    Config, CrawlerConfig, RiotApiConfig, SeedConfig, StorageConfig, MAX_MATCHES_PER_ACCOUNT,
};
use crate::ConfigError;
use std::path::Path;

/// Validates the entire configuration
///
/// `path` is the file the configuration came from and only appears in
/// missing-field errors.
pub fn validate(config: &Config, path: &Path) -> Result<(), ConfigError> {
    validate_riot_api_config(&config.riot_api, path)?;
    validate_seed_config(&config.seed, path)?;
    config.platform()?;
    validate_storage_config(&config.storage)?;
    validate_crawler_config(&config.crawler)?;
    Ok(())
}

fn require(value: &str, field: &'static str, path: &Path) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField {
            field,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn validate_riot_api_config(config: &RiotApiConfig, path: &Path) -> Result<(), ConfigError> {
    require(&config.key, "riot-api.key", path)?;
    require(&config.platform, "riot-api.platform", path)
}

fn validate_seed_config(config: &SeedConfig, path: &Path) -> Result<(), ConfigError> {
    require(&config.game_name, "seed.game-name", path)?;
    require(&config.tag_line, "seed.tag-line", path)
}

fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.failure_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "failure_limit must be >= 1, got {}",
            config.failure_limit
        )));
    }

    if config.matches_per_account < 1 || config.matches_per_account > MAX_MATCHES_PER_ACCOUNT {
        return Err(ConfigError::Validation(format!(
            "matches_per_account must be between 1 and {}, got {}",
            MAX_MATCHES_PER_ACCOUNT, config.matches_per_account
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.riot_api.key = "RGAPI-test".to_string();
        config.riot_api.platform = "euw1".to_string();
        config.seed.game_name = "Faker".to_string();
        config.seed.tag_line = "KR1".to_string();
        config
    }

    fn missing_field(config: &Config) -> Option<&'static str> {
        match validate(config, Path::new("crawler.toml")) {
            Err(ConfigError::MissingField { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config(), Path::new("crawler.toml")).is_ok());
    }

    #[test]
    fn test_missing_fields_are_named() {
        let mut config = valid_config();
        config.riot_api.key.clear();
        assert_eq!(missing_field(&config), Some("riot-api.key"));

        let mut config = valid_config();
        config.riot_api.platform = "   ".to_string();
        assert_eq!(missing_field(&config), Some("riot-api.platform"));

        let mut config = valid_config();
        config.seed.game_name.clear();
        assert_eq!(missing_field(&config), Some("seed.game-name"));

        let mut config = valid_config();
        config.seed.tag_line.clear();
        assert_eq!(missing_field(&config), Some("seed.tag-line"));
    }

    #[test]
    fn test_missing_field_message_names_file() {
        let mut config = valid_config();
        config.seed.tag_line.clear();

        let err = validate(&config, Path::new("conf/crawler.toml")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing field 'seed.tag-line' in conf/crawler.toml"
        );
    }

    #[test]
    fn test_unknown_platform() {
        let mut config = valid_config();
        config.riot_api.platform = "euw9".to_string();

        let result = validate(&config, Path::new("crawler.toml"));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidField {
                field: "riot-api.platform",
                ..
            })
        ));
    }

    #[test]
    fn test_crawler_ranges() {
        let mut config = valid_config();
        config.crawler.max_attempts = 0;
        assert!(matches!(
            validate(&config, Path::new("crawler.toml")),
            Err(ConfigError::Validation(_))
        ));

        let mut config = valid_config();
        config.crawler.failure_limit = 0;
        assert!(validate(&config, Path::new("crawler.toml")).is_err());

        let mut config = valid_config();
        config.crawler.matches_per_account = 101;
        assert!(validate(&config, Path::new("crawler.toml")).is_err());

        let mut config = valid_config();
        config.crawler.matches_per_account = 100;
        assert!(validate(&config, Path::new("crawler.toml")).is_ok());
    }

    #[test]
    fn test_empty_database_path() {
        let mut config = valid_config();
        config.storage.database_path.clear();
        assert!(matches!(
            validate(&config, Path::new("crawler.toml")),
            Err(ConfigError::Validation(_))
        ));
    }
}
