//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use rift_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will retry each fetch {} times", config.crawler.max_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, RiotApiConfig, SeedConfig, StorageConfig, DEFAULT_DATABASE_PATH,
    MAX_MATCHES_PER_ACCOUNT,
};

// Re-export parser functions
pub use parser::{load_config, write_config_template};
