use crate::errors::{Error, Result};
use std::env;

/// Process-wide settings, resolved once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub aws_region: String,
    pub table_name: String,
    pub http_addr: String,
    /// Answer malformed-but-parseable bodies with a 400 instead of an empty reply
    pub strict_validation: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let flag = |key: &str| lookup(key).and_then(|v| parse_flag(&v)).unwrap_or(false);

        let config = Self {
            aws_region: var("AWS_REGION", "us-east-2"),
            table_name: var("DDB_TABLE_NAME", "iot"),
            http_addr: var("HTTP_ADDR", "0.0.0.0:8080"),
            strict_validation: flag("STRICT_VALIDATION"),
            log_level: var("LOG_LEVEL", "info"),
            log_json: flag("LOG_JSON"),
        };

        if config.table_name.trim().is_empty() {
            return Err(Error::Config("DDB_TABLE_NAME must not be empty".to_string()));
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
