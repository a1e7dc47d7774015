//! Inventory manager configuration.

use serde::{Deserialize, Serialize};

use freshstock_core::{DomainError, DomainResult};

pub const ENV_MIN_FRESHNESS: &str = "FRESHSTOCK_MIN_FRESHNESS";
pub const ENV_MAX_FRESHNESS: &str = "FRESHSTOCK_MAX_FRESHNESS";
pub const ENV_DEFAULT_FRESHNESS: &str = "FRESHSTOCK_DEFAULT_FRESHNESS";
pub const ENV_SPOILED_THRESHOLD: &str = "FRESHSTOCK_SPOILED_THRESHOLD";
pub const ENV_REMOVE_ON_DISTRIBUTE: &str = "FRESHSTOCK_REMOVE_ON_DISTRIBUTE";
pub const ENV_LOG_MISSING_REMOVALS: &str = "FRESHSTOCK_LOG_MISSING_REMOVALS";

/// Tunables for an [`crate::InventoryManager`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Lowest freshness accepted by `add_item` (inclusive).
    pub min_freshness: f64,
    /// Highest freshness accepted by `add_item` (inclusive).
    pub max_freshness: f64,
    /// Freshness used by `add_default_item`.
    pub default_freshness: f64,
    /// Items at or below this freshness are spoiled.
    pub spoiled_threshold: f64,
    /// Take distributed items out of stock.
    pub remove_on_distribute: bool,
    /// Record a `REMOVE` entry even when the id was not in stock.
    pub log_missing_removals: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            min_freshness: 0.0,
            max_freshness: 10.0,
            default_freshness: 10.0,
            spoiled_threshold: 0.0,
            remove_on_distribute: false,
            log_missing_removals: true,
        }
    }
}

impl InventoryConfig {
    pub fn with_freshness_range(mut self, min: f64, max: f64) -> Self {
        self.min_freshness = min;
        self.max_freshness = max;
        self
    }

    pub fn with_default_freshness(mut self, freshness: f64) -> Self {
        self.default_freshness = freshness;
        self
    }

    pub fn with_spoiled_threshold(mut self, threshold: f64) -> Self {
        self.spoiled_threshold = threshold;
        self
    }

    pub fn with_remove_on_distribute(mut self, remove: bool) -> Self {
        self.remove_on_distribute = remove;
        self
    }

    pub fn with_log_missing_removals(mut self, log: bool) -> Self {
        self.log_missing_removals = log;
        self
    }

    /// Defaults overlaid with `FRESHSTOCK_*` environment variables.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values returned by `lookup`, keyed by the
    /// `FRESHSTOCK_*` variable names. The result is validated.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup(ENV_MIN_FRESHNESS) {
            config.min_freshness = parse_number(ENV_MIN_FRESHNESS, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_FRESHNESS) {
            config.max_freshness = parse_number(ENV_MAX_FRESHNESS, &v)?;
        }
        if let Some(v) = lookup(ENV_DEFAULT_FRESHNESS) {
            config.default_freshness = parse_number(ENV_DEFAULT_FRESHNESS, &v)?;
        }
        if let Some(v) = lookup(ENV_SPOILED_THRESHOLD) {
            config.spoiled_threshold = parse_number(ENV_SPOILED_THRESHOLD, &v)?;
        }
        if let Some(v) = lookup(ENV_REMOVE_ON_DISTRIBUTE) {
            config.remove_on_distribute = parse_flag(ENV_REMOVE_ON_DISTRIBUTE, &v)?;
        }
        if let Some(v) = lookup(ENV_LOG_MISSING_REMOVALS) {
            config.log_missing_removals = parse_flag(ENV_LOG_MISSING_REMOVALS, &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let bounds = [
            ("min_freshness", self.min_freshness),
            ("max_freshness", self.max_freshness),
            ("default_freshness", self.default_freshness),
            ("spoiled_threshold", self.spoiled_threshold),
        ];
        for (name, value) in bounds {
            if !value.is_finite() {
                return Err(DomainError::validation(format!("{name} must be finite")));
            }
        }
        if self.min_freshness > self.max_freshness {
            return Err(DomainError::validation(
                "min_freshness cannot exceed max_freshness",
            ));
        }
        if !self.accepts(self.default_freshness) {
            return Err(DomainError::validation(format!(
                "default_freshness must be between {} and {}",
                self.min_freshness, self.max_freshness
            )));
        }
        Ok(())
    }

    /// Whether `freshness` is inside the accepted range. NaN never is.
    pub fn accepts(&self, freshness: f64) -> bool {
        (self.min_freshness..=self.max_freshness).contains(&freshness)
    }
}

fn parse_number(key: &str, raw: &str) -> DomainResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| DomainError::validation(format!("{key}: {e}")))
}

fn parse_flag(key: &str, raw: &str) -> DomainResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DomainError::validation(format!(
            "{key}: expected a boolean, got {other:?}"
        ))),
    }
}
