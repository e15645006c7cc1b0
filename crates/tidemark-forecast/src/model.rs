//! The four extrapolation models, selected by name.

use std::fmt;
use std::str::FromStr;

use tidemark_core::{ForecastConfig, TidemarkError};

/// Forecasting model selector.
///
/// Implements [`FromStr`] over the names `naive`, `moving_average`, `ewma`,
/// and `linear` so it can be used directly with `clap` argument parsing.
///
/// # Examples
///
/// ```
/// use tidemark_forecast::model::ForecastMethod;
///
/// let method: ForecastMethod = "moving_average".parse().unwrap();
/// assert_eq!(method, ForecastMethod::MovingAverage);
/// assert_eq!(method.to_string(), "moving_average");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastMethod {
    /// Repeat the last observed value.
    Naive,
    /// Rolling mean with forecast feedback.
    MovingAverage,
    /// Exponentially weighted moving average.
    Ewma,
    /// First-degree least-squares extrapolation.
    Linear,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMethod::Naive => write!(f, "naive"),
            ForecastMethod::MovingAverage => write!(f, "moving_average"),
            ForecastMethod::Ewma => write!(f, "ewma"),
            ForecastMethod::Linear => write!(f, "linear"),
        }
    }
}

impl FromStr for ForecastMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "naive" => Ok(ForecastMethod::Naive),
            "moving_average" => Ok(ForecastMethod::MovingAverage),
            "ewma" => Ok(ForecastMethod::Ewma),
            "linear" => Ok(ForecastMethod::Linear),
            other => Err(format!(
                "unknown method: {other} (expected naive, moving_average, ewma, or linear)"
            )),
        }
    }
}

impl ForecastMethod {
    /// Produce exactly `horizon` forecast values from the historical series.
    ///
    /// Values are unrounded; for the feedback models each forecast value
    /// re-enters the working series at full precision. Rounding happens at
    /// presentation time only.
    ///
    /// # Errors
    ///
    /// Returns [`TidemarkError::Parse`] when `history` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidemark_core::ForecastConfig;
    /// use tidemark_forecast::model::ForecastMethod;
    ///
    /// let config = ForecastConfig::default();
    /// let forecast = ForecastMethod::Naive.forecast(&[1.0, 2.0, 3.0], 3, &config).unwrap();
    /// assert_eq!(forecast, vec![3.0, 3.0, 3.0]);
    /// ```
    pub fn forecast(
        self,
        history: &[f64],
        horizon: usize,
        config: &ForecastConfig,
    ) -> Result<Vec<f64>, TidemarkError> {
        let Some(&last) = history.last() else {
            return Err(TidemarkError::Parse(
                "cannot forecast from an empty series".into(),
            ));
        };

        let forecast = match self {
            ForecastMethod::Naive => vec![last; horizon],
            ForecastMethod::MovingAverage => moving_average(history, horizon, config.window_size),
            ForecastMethod::Ewma => ewma(history, horizon, config.alpha),
            ForecastMethod::Linear => linear(history, horizon),
        };
        Ok(forecast)
    }
}

/// Rolling mean over the last `window` elements of a growing working
/// series; each forecast value feeds back as an observation. Falls back to
/// the mean of everything available when the series is shorter than the
/// window.
fn moving_average(history: &[f64], horizon: usize, window: usize) -> Vec<f64> {
    let mut data = history.to_vec();
    let mut forecast = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        let take = window.min(data.len());
        let mean = data[data.len() - take..].iter().sum::<f64>() / take as f64;
        forecast.push(mean);
        data.push(mean);
    }
    forecast
}

/// Standard incremental EWMA: seed at the first observation, fold forward
/// with `alpha`. Feeding the smoothed value back into the recurrence leaves
/// it fixed, so every forecast step emits the same smoothed level.
fn ewma(history: &[f64], horizon: usize, alpha: f64) -> Vec<f64> {
    let mut smoothed = history[0];
    for &value in &history[1..] {
        smoothed = alpha * value + (1.0 - alpha) * smoothed;
    }
    vec![smoothed; horizon]
}

/// Least-squares line over (index, value), evaluated at the `horizon`
/// indices after the series. A single-point series degrades to a flat line.
fn linear(history: &[f64], horizon: usize) -> Vec<f64> {
    let n = history.len();
    let (slope, intercept) = if n < 2 {
        (0.0, history[0])
    } else {
        let nf = n as f64;
        let sum_x: f64 = (0..n).map(|i| i as f64).sum();
        let sum_y: f64 = history.iter().sum();
        let sum_xy: f64 = history.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
        let sum_x2: f64 = (0..n).map(|i| (i as f64) * (i as f64)).sum();
        let slope = (nf * sum_xy - sum_x * sum_y) / (nf * sum_x2 - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / nf;
        (slope, intercept)
    };
    (n..n + horizon)
        .map(|i| slope * i as f64 + intercept)
        .collect()
}
