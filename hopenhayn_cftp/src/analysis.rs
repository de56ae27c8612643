use crate::batch::DrawRecord;

/// Compute mean of a series
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute standard deviation of a series
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Fraction of values strictly below `threshold`
pub fn fraction_below(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|&&v| v < threshold).count() as f64 / values.len() as f64
}

/// Empirical quantile (lower order statistic) at level q in [0, 1]
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().filter(|x| x.is_finite()).copied().collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let idx = ((q.clamp(0.0, 1.0) * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Descriptive summary of a batch of draws
///
/// Meant as a sanity check on stationarity and on the depth bound, not as
/// an estimator of the distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub num_draws: usize,
    pub num_failures: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Share of successful draws below the exit threshold
    pub below_threshold: f64,
    /// Mean horizon at which coalescence was confirmed
    pub mean_horizon: f64,
    pub max_horizon: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[DrawRecord], exit_threshold: f64) -> Self {
        let values: Vec<f64> = records
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok().map(|c| c.value))
            .collect();
        let horizons: Vec<f64> = records
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok().map(|c| c.horizon as f64))
            .collect();
        let max_horizon = records
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok().map(|c| c.horizon))
            .max()
            .unwrap_or(0);

        let (min, max) = if values.is_empty() {
            (0.0, 0.0)
        } else {
            (
                values.iter().cloned().fold(f64::INFINITY, f64::min),
                values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            )
        };

        BatchSummary {
            num_draws: records.len(),
            num_failures: records.len() - values.len(),
            mean: mean(&values),
            std_dev: std_dev(&values),
            median: quantile(&values, 0.5),
            min,
            max,
            below_threshold: fraction_below(&values, exit_threshold),
            mean_horizon: mean(&horizons),
            max_horizon,
        }
    }

    /// Share of draws that hit the depth bound
    pub fn failure_rate(&self) -> f64 {
        if self.num_draws == 0 {
            return 0.0;
        }
        self.num_failures as f64 / self.num_draws as f64
    }

    /// Print summary
    pub fn print_summary(&self) {
        eprintln!("Batch Summary:");
        eprintln!(
            "  Draws: {} ({} failed, rate {:.4})",
            self.num_draws,
            self.num_failures,
            self.failure_rate()
        );
        eprintln!("  Mean: {:.4}, Std: {:.4}", self.mean, self.std_dev);
        eprintln!(
            "  Min: {:.4}, Median: {:.4}, Max: {:.4}",
            self.min, self.median, self.max
        );
        eprintln!("  Below exit threshold: {:.4}", self.below_threshold);
        eprintln!(
            "  Horizon: mean {:.1}, max {}",
            self.mean_horizon, self.max_horizon
        );
    }
}
