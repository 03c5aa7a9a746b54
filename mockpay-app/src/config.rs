//! Configuration loading from environment.

use std::env;
use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;

/// Conventional port for the mock provider.
pub const DEFAULT_PORT: u16 = 50051;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unknown LOG_FORMAT: {}", other),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub initial_balance: Decimal,
    pub seed_fixtures: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().context("PORT must be a port number")?,
            None => DEFAULT_PORT,
        };

        let initial_balance = match lookup("INITIAL_BALANCE") {
            Some(raw) => raw
                .parse::<Decimal>()
                .context("INITIAL_BALANCE must be a decimal number")?,
            None => mockpay_store::default_initial_balance(),
        };
        if initial_balance.is_sign_negative() {
            anyhow::bail!("INITIAL_BALANCE must not be negative");
        }

        let seed_fixtures = match lookup("SEED_FIXTURES") {
            Some(raw) => parse_flag(&raw).context("SEED_FIXTURES must be true or false")?,
            None => true,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::Pretty,
        };

        Ok(Self {
            port,
            initial_balance,
            seed_fixtures,
            log_format,
        })
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: {}", other),
    }
}
