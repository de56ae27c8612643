//! Repeated independent draws with consecutive seeds

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::{SamplerError, FAILURE_SENTINEL};
use crate::sampler::{Coalesced, PerfectSampler};

/// One draw of a batch and the seed that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub seed: u64,
    pub outcome: Result<Coalesced, SamplerError>,
}

impl DrawRecord {
    /// Sample value, or the failure sentinel
    pub fn value_or_sentinel(&self) -> f64 {
        match &self.outcome {
            Ok(c) => c.value,
            Err(_) => FAILURE_SENTINEL,
        }
    }
}

/// CSV row for a draw; failed draws leave the diagnostics empty
#[derive(Debug, Serialize)]
struct CsvRow {
    seed: u64,
    value: f64,
    horizon: Option<usize>,
    sigma: Option<usize>,
    rounds: Option<usize>,
}

impl From<&DrawRecord> for CsvRow {
    fn from(record: &DrawRecord) -> Self {
        let (horizon, sigma, rounds) = match &record.outcome {
            Ok(c) => (Some(c.horizon), Some(c.sigma), Some(c.rounds)),
            Err(SamplerError::DepthExhausted { max_depth, rounds }) => {
                (Some(*max_depth), None, Some(*rounds))
            }
            Err(SamplerError::ShockBufferFull { .. }) => (None, None, None),
        };
        CsvRow {
            seed: record.seed,
            value: record.value_or_sentinel(),
            horizon,
            sigma,
            rounds,
        }
    }
}

/// Draw `num_draws` samples, draw `i` seeded with `base_seed + i`
///
/// Seeds wrap around on overflow.
pub fn run_batch(sampler: &PerfectSampler, base_seed: u64, num_draws: usize) -> Vec<DrawRecord> {
    (0..num_draws as u64)
        .map(|i| {
            let seed = base_seed.wrapping_add(i);
            DrawRecord {
                seed,
                outcome: sampler.draw(seed),
            }
        })
        .collect()
}

/// Format a value the way printf's `%g` does: six significant digits,
/// trailing zeros dropped, exponent form for very large or small magnitudes
pub fn format_g(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let exponent = value.abs().log10().floor() as i32;
    if !(-4..6).contains(&exponent) {
        let formatted = format!("{:.5e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(exponent);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
            }
            None => formatted,
        }
    } else {
        let decimals = (5 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Write one value per line, failures as the sentinel
pub fn write_values<W: Write>(
    out: &mut W,
    records: &[DrawRecord],
    full_precision: bool,
) -> std::io::Result<()> {
    for record in records {
        let value = record.value_or_sentinel();
        if full_precision {
            writeln!(out, "{}", value)?;
        } else {
            writeln!(out, "{}", format_g(value))?;
        }
    }
    Ok(())
}

/// Export the batch with per-draw diagnostics to CSV
pub fn write_csv(records: &[DrawRecord], path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}
