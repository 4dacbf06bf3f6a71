use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Written when no configuration file exists yet
const CONFIG_TEMPLATE: &str = r#"[riot-api]
key = ""
platform = ""

[seed]
game-name = ""
tag-line = ""

[storage]
database-path = "crawler.sqlite"

[crawler]
max-attempts = 3
failure-limit = 5
matches-per-account = 100
"#;

/// Loads and parses a configuration file from the given path
///
/// A missing file is replaced by a template with empty required fields, so
/// the first run fails with a missing-field error pointing at the new file.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use rift_crawler::config::load_config;
///
/// let config = load_config(Path::new("crawler.toml")).unwrap();
/// println!("Seed: {}#{}", config.seed.game_name, config.seed.tag_line);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::warn!(
            "Config file {} not found, writing a template",
            path.display()
        );
        write_config_template(path)?;
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    validate(&config, path)?;

    Ok(config)
}

/// Writes the configuration template, creating parent directories
pub fn write_config_template(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, CONFIG_TEMPLATE)?;
    Ok(())
}
