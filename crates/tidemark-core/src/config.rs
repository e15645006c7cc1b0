use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TidemarkError;

/// Forecast tuning knobs loaded from `tidemark.json`.
///
/// Every field is optional in the file and falls back to its default.
/// CLI flags override file values; the merged struct is passed into the
/// forecaster explicitly rather than read as ambient state.
///
/// # Examples
///
/// ```
/// use tidemark_core::ForecastConfig;
///
/// let config = ForecastConfig::default();
/// assert_eq!(config.window_size, 3);
/// assert_eq!(config.forecast_weeks, 4);
/// assert_eq!(config.alpha, 0.3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Window size for the moving-average model (default: 3).
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Number of weeks to forecast ahead (default: 4).
    #[serde(default = "default_forecast_weeks")]
    pub forecast_weeks: usize,
    /// Smoothing factor for the EWMA model (default: 0.3).
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_window_size() -> usize {
    3
}

fn default_forecast_weeks() -> usize {
    4
}

fn default_alpha() -> f64 {
    0.3
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            forecast_weeks: default_forecast_weeks(),
            alpha: default_alpha(),
        }
    }
}

impl ForecastConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TidemarkError::Io`] if the file cannot be read, or
    /// [`TidemarkError::Serialization`] if the content is not valid JSON.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use tidemark_core::ForecastConfig;
    ///
    /// let config = ForecastConfig::from_file(Path::new("tidemark.json")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, TidemarkError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`TidemarkError::Serialization`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidemark_core::ForecastConfig;
    ///
    /// let config = ForecastConfig::from_json(r#"{"window_size": 5}"#).unwrap();
    /// assert_eq!(config.window_size, 5);
    /// assert_eq!(config.forecast_weeks, 4);
    /// ```
    pub fn from_json(content: &str) -> Result<Self, TidemarkError> {
        let config: Self = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, TidemarkError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check that all knobs are inside their valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`TidemarkError::Config`] when `window_size < 2`, `alpha` is
    /// outside the open interval (0, 1), or `forecast_weeks` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidemark_core::ForecastConfig;
    ///
    /// let mut config = ForecastConfig::default();
    /// assert!(config.validate().is_ok());
    /// config.alpha = 1.0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), TidemarkError> {
        if self.window_size < 2 {
            return Err(TidemarkError::Config(format!(
                "window_size must be at least 2, got {}",
                self.window_size
            )));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(TidemarkError::Config(format!(
                "alpha must be strictly between 0 and 1, got {}",
                self.alpha
            )));
        }
        if self.forecast_weeks == 0 {
            return Err(TidemarkError::Config(
                "forecast_weeks must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = ForecastConfig::default();
        assert_eq!(config.window_size, 3);
        assert_eq!(config.forecast_weeks, 4);
        assert_eq!(config.alpha, 0.3);
    }

    #[test]
    fn empty_json_gives_defaults() {
        let config = ForecastConfig::from_json("{}").unwrap();
        assert_eq!(config.window_size, 3);
        assert_eq!(config.forecast_weeks, 4);
        assert_eq!(config.alpha, 0.3);
    }

    #[test]
    fn parse_full_json() {
        let config =
            ForecastConfig::from_json(r#"{"window_size": 4, "forecast_weeks": 6, "alpha": 0.5}"#)
                .unwrap();
        assert_eq!(config.window_size, 4);
        assert_eq!(config.forecast_weeks, 6);
        assert_eq!(config.alpha, 0.5);
    }

    #[test]
    fn invalid_json_returns_error() {
        assert!(ForecastConfig::from_json("{not json}").is_err());
    }

    #[test]
    fn load_or_default_with_missing_file() {
        let config = ForecastConfig::load_or_default(Path::new("/no/such/tidemark.json")).unwrap();
        assert_eq!(config.window_size, 3);
    }

    #[test]
    fn validate_rejects_small_window() {
        let config = ForecastConfig {
            window_size: 1,
            ..ForecastConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_alpha_bounds() {
        for alpha in [0.0, 1.0, -0.2, 1.5] {
            let config = ForecastConfig {
                alpha,
                ..ForecastConfig::default()
            };
            assert!(config.validate().is_err(), "alpha {alpha} should be rejected");
        }
    }

    #[test]
    fn validate_rejects_zero_horizon() {
        let config = ForecastConfig {
            forecast_weeks: 0,
            ..ForecastConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
