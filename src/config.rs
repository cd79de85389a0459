//! Runtime configuration read from the environment.
//!
//! `.env` files are loaded by `main` through dotenvy before [`Config::from_env`]
//! is called, so every key below may live in either place.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::booking::PricingConfig;

/// Longest accepted draft idle time or insight TTL (one year)
pub const MAX_EXPIRY_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuration error raised while reading the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("TAX_RATE must be between 0 and 1, got {0}")]
    TaxRateOutOfRange(Decimal),

    #[error("ADD_ON_COST must not be negative, got {0}")]
    NegativeAddOnCost(Decimal),

    #[error("{key} must be between 1 and {max} seconds, got {value}")]
    ExpiryOutOfRange { key: &'static str, value: u64, max: u64 },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub pricing: PricingConfig,
    /// Drafts untouched for this long are dropped
    pub draft_idle: Duration,
    pub insight_ttl: Duration,
    pub insight_timeout: Duration,
    /// Synthetic latency of the in-memory booking store
    pub submit_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            pricing: PricingConfig::default(),
            draft_idle: Duration::from_secs(30 * 60),
            insight_ttl: Duration::from_secs(60 * 60),
            insight_timeout: Duration::from_millis(4000),
            submit_delay: Duration::ZERO,
        }
    }
}

impl Config {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to [`Config::default`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tax_rate = parse_or(&lookup, "TAX_RATE", defaults.pricing.tax_rate)?;
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(ConfigError::TaxRateOutOfRange(tax_rate));
        }

        let add_on_cost = parse_or(&lookup, "ADD_ON_COST", defaults.pricing.add_on_cost)?;
        if add_on_cost < Decimal::ZERO {
            return Err(ConfigError::NegativeAddOnCost(add_on_cost));
        }

        let currency = lookup("CURRENCY")
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or(defaults.pricing.currency);

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            pricing: PricingConfig {
                tax_rate,
                add_on_cost,
                currency,
            },
            draft_idle: expiry_or(&lookup, "DRAFT_IDLE_SECS", defaults.draft_idle)?,
            insight_ttl: expiry_or(&lookup, "INSIGHT_TTL_SECS", defaults.insight_ttl)?,
            insight_timeout: Duration::from_millis(parse_or(
                &lookup,
                "INSIGHT_TIMEOUT_MS",
                defaults.insight_timeout.as_millis() as u64,
            )?),
            submit_delay: Duration::from_millis(parse_or(
                &lookup,
                "SUBMIT_DELAY_MS",
                defaults.submit_delay.as_millis() as u64,
            )?),
        })
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            key: "HOST",
            value: raw.clone(),
            reason: e.to_string(),
        })
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: dec!(0.18),
            add_on_cost: dec!(1200),
            currency: "INR".to_string(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            value: raw,
            reason: e.to_string(),
        }),
    }
}

/// Cache expiry in whole seconds, within `1..=MAX_EXPIRY_SECS`
fn expiry_or<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = parse_or(lookup, key, default.as_secs())?;
    if !(1..=MAX_EXPIRY_SECS).contains(&secs) {
        return Err(ConfigError::ExpiryOutOfRange {
            key,
            value: secs,
            max: MAX_EXPIRY_SECS,
        });
    }
    Ok(Duration::from_secs(secs))
}
