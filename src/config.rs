//! Configuration management for the portfolio pages

use std::str::FromStr;

use url::Url;
use worker::Env;

use crate::error::{DashboardError, Result};

/// Worker log verbosity, least to most verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl FromStr for LogLevel {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(DashboardError::Config(format!("unknown log level '{other}'"))),
        }
    }
}

/// Page rendering configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Messages less severe than this are not logged
    pub log_level: LogLevel,

    /// Flash messages remove themselves after this many milliseconds
    pub flash_dismiss_ms: u32,

    /// Clear a table target before rendering into it (idempotent re-render)
    pub clear_before_render: bool,

    /// Prefix leaderboard tables with a `#` index column
    pub number_leaderboard_rows: bool,

    /// Chart styling
    pub chart_font_color: String,
    pub chart_line_color: String,

    /// First option of every ticker dropdown
    pub dropdown_placeholder: String,

    /// Backend that executes confirmed trades (`<base>/buy`, `<base>/sell`)
    pub trade_backend_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            log_level: LogLevel::Info,
            flash_dismiss_ms: 3000,
            clear_before_render: true,
            number_leaderboard_rows: false,
            chart_font_color: "#FFFFFF".to_string(),
            chart_line_color: "#17BECF".to_string(),
            dropdown_placeholder: "Select ticker".to_string(),
            trade_backend_url: None,
        }
    }
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        let config = Self::from_lookup(|key| env.var(key).ok().map(|v| v.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from any key lookup. Missing values and
    /// unparsable numbers fall back to defaults; an unknown log level is an
    /// error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key).map_or(default, |v| v.trim().eq_ignore_ascii_case("true"))
        };

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: match lookup("LOG_LEVEL") {
                Some(level) => level.parse()?,
                None => defaults.log_level,
            },

            flash_dismiss_ms: lookup("FLASH_DISMISS_MS")
                .map(|v| v.trim().parse().unwrap_or(defaults.flash_dismiss_ms))
                .unwrap_or(defaults.flash_dismiss_ms),

            clear_before_render: flag("CLEAR_BEFORE_RENDER", defaults.clear_before_render),

            number_leaderboard_rows: flag(
                "NUMBER_LEADERBOARD_ROWS",
                defaults.number_leaderboard_rows,
            ),

            chart_font_color: lookup("CHART_FONT_COLOR").unwrap_or(defaults.chart_font_color),

            chart_line_color: lookup("CHART_LINE_COLOR").unwrap_or(defaults.chart_line_color),

            dropdown_placeholder: lookup("DROPDOWN_PLACEHOLDER")
                .unwrap_or(defaults.dropdown_placeholder),

            trade_backend_url: lookup("TRADE_BACKEND_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Whether messages at `level` should be logged
    pub fn logs(&self, level: LogLevel) -> bool {
        level <= self.log_level
    }

    /// Where a confirmed trade is forwarded, if a backend is configured
    pub fn trade_url(&self, path: &str) -> Result<Option<Url>> {
        let Some(base) = &self.trade_backend_url else {
            return Ok(None);
        };
        Url::parse(&format!("{base}/{path}"))
            .map(Some)
            .map_err(|e| DashboardError::Config(format!("trade_backend_url: {e}")))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.flash_dismiss_ms == 0 {
            return Err(DashboardError::Config("flash_dismiss_ms must be positive".into()));
        }
        if self.dropdown_placeholder.trim().is_empty() {
            return Err(DashboardError::Config(
                "dropdown_placeholder must not be empty".into(),
            ));
        }
        let trade_url = self.trade_url("buy")?;
        if trade_url.is_some_and(|url| !matches!(url.scheme(), "http" | "https")) {
            return Err(DashboardError::Config(
                "trade_backend_url must be http or https".into(),
            ));
        }
        Ok(())
    }
}
