use std::{env, ffi::OsString, str::FromStr};

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_VAR: &str = "LOXIDE_LOG";
pub const STACK_RED_ZONE_VAR: &str = "LOXIDE_STACK_RED_ZONE";
pub const STACK_GROWTH_VAR: &str = "LOXIDE_STACK_GROWTH";

/// Byte counts handed to `stacker` when the evaluator recurses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackConfig {
    /// Grow once less than this much stack remains.
    pub red_zone: usize,
    /// Size of each new stack segment.
    pub growth: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        StackConfig {
            red_zone: 100 * 1024,
            growth: 1024 * 1024,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
    pub stack: StackConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: "warn".to_string(),
            stack: StackConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|name| env::var_os(name))
    }

    /// Build a config from an arbitrary variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Config> {
        let mut config = Config::default();
        if let Some(filter) = read_var::<String>(&lookup, LOG_VAR)? {
            config.log_filter = filter;
        }
        if let Some(red_zone) = read_var(&lookup, STACK_RED_ZONE_VAR)? {
            config.stack.red_zone = red_zone;
        }
        if let Some(growth) = read_var(&lookup, STACK_GROWTH_VAR)? {
            config.stack.growth = growth;
        }
        Ok(config)
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<OsString>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let raw = raw
        .into_string()
        .map_err(|_| anyhow!("{} is not valid unicode", name))?;
    let value = raw
        .trim()
        .parse::<T>()
        .with_context(|| format!("invalid value for {}: {:?}", name, raw))?;
    Ok(Some(value))
}

/// Install a stderr `tracing` subscriber filtered by `config.log_filter`.
/// A subscriber that is already installed is left in place.
pub fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter {:?}", config.log_filter))?;
    // If a subscriber is already set, we don't care
    _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}
