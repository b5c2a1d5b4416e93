use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::{DEFAULT_EXTRA_WINDOWS, DEFAULT_MAX_PAGES, DEFAULT_PAGE_TIMEOUT_SECS, MAX_WINDOW_HOURS};

/// Where window filtering happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowMode {
    /// One `after`-filtered fetch per window.
    #[default]
    Server,
    /// A single all-time fetch, windows cut locally.
    Client,
}

impl FromStr for WindowMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "server" => Ok(WindowMode::Server),
            "client" => Ok(WindowMode::Client),
            other => Err(Error::Config(format!("Unknown STATS_WINDOW_MODE: {}", other))),
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowMode::Server => write!(f, "server"),
            WindowMode::Client => write!(f, "client"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraWindow {
    pub name: String,
    pub hours: i64,
}

#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub max_pages: usize,
    pub page_timeout_secs: u64,
    pub window_mode: WindowMode,
    pub extra_windows: Vec<ExtraWindow>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            page_timeout_secs: DEFAULT_PAGE_TIMEOUT_SECS,
            window_mode: WindowMode::default(),
            // DEFAULT_EXTRA_WINDOWS always parses.
            extra_windows: parse_extra_windows(DEFAULT_EXTRA_WINDOWS).unwrap_or_default(),
        }
    }
}

/// Parses `name=hours` pairs separated by commas, e.g. `7d=168,30d=720`.
pub fn parse_extra_windows(raw: &str) -> Result<Vec<ExtraWindow>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, hours) = entry
                .split_once('=')
                .ok_or_else(|| Error::Config(format!("Invalid window entry: {}", entry)))?;
            let hours: i64 = hours
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("Invalid window hours: {}", entry)))?;
            if name.trim().is_empty() || hours <= 0 || hours > MAX_WINDOW_HOURS {
                return Err(Error::Config(format!("Invalid window entry: {}", entry)));
            }
            Ok(ExtraWindow {
                name: name.trim().to_string(),
                hours,
            })
        })
        .collect()
}

fn parse_positive<T>(raw: Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .ok()
            .filter(|value| *value > T::default())
            .ok_or_else(|| Error::Config(format!("Invalid {} format", name))),
        None => Ok(default),
    }
}

impl StatsConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            max_pages: parse_positive(lookup("STATS_MAX_PAGES"), "STATS_MAX_PAGES", defaults.max_pages)?,
            page_timeout_secs: parse_positive(
                lookup("STATS_PAGE_TIMEOUT_SECS"),
                "STATS_PAGE_TIMEOUT_SECS",
                defaults.page_timeout_secs,
            )?,
            window_mode: match lookup("STATS_WINDOW_MODE") {
                Some(raw) => raw.parse()?,
                None => defaults.window_mode,
            },
            extra_windows: match lookup("STATS_EXTRA_WINDOWS") {
                Some(raw) => parse_extra_windows(&raw)?,
                None => defaults.extra_windows,
            },
        })
    }
}
