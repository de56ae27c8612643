use rand_distr::Beta;
use tracing::{debug, trace, warn};

use crate::coalescence::{compute_singleton, find_sigma};
use crate::error::{ConfigError, SamplerError, FAILURE_SENTINEL};
use crate::params::ModelParams;
use crate::shocks::{beta_law, ShockSource};

/// A confirmed draw from the stationary distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coalesced {
    /// The sampled productivity
    pub value: f64,
    /// Horizon at which coalescence was confirmed
    pub horizon: usize,
    /// Certified exit depth at that horizon
    pub sigma: usize,
    /// Rounds tried, including the successful one
    pub rounds: usize,
}

/// Coupling-from-the-past sampler for the entry-exit productivity chain
///
/// Holds only immutable parameters. Each call to [`PerfectSampler::draw`]
/// owns its own generator and shock buffers, so one sampler can be shared
/// freely.
#[derive(Debug, Clone)]
pub struct PerfectSampler {
    params: ModelParams,
    incumbent: Beta<f64>,
    entrant: Beta<f64>,
}

impl PerfectSampler {
    pub fn new(params: ModelParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let incumbent = beta_law(params.incumbent_shape, "incumbent")?;
        let entrant = beta_law(params.entrant_shape, "entrant")?;
        Ok(PerfectSampler {
            params,
            incumbent,
            entrant,
        })
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Fresh shock source for `seed`, capped at the depth bound
    pub fn shock_source(&self, seed: u64) -> ShockSource {
        ShockSource::with_laws(
            self.incumbent.clone(),
            self.entrant.clone(),
            self.params.max_depth + 1,
            seed,
        )
    }

    /// Run the growing-horizon search for one seed
    ///
    /// Each round recomputes σ at the current horizon and, if it exists,
    /// checks the σ+1 candidate histories. On failure the horizon grows by
    /// the increment (clamped to the depth bound) and only the new indices
    /// are drawn. A round at the depth bound that still fails ends the
    /// search with [`SamplerError::DepthExhausted`].
    pub fn draw(&self, seed: u64) -> Result<Coalesced, SamplerError> {
        let x = self.params.exit_threshold;
        let max_depth = self.params.max_depth;

        let mut shocks = self.shock_source(seed);
        let mut horizon = self.params.base_horizon;
        shocks.extend_to(horizon)?;

        let mut rounds = 0;
        loop {
            rounds += 1;
            let sigma = find_sigma(horizon, shocks.paths(), x);

            if let Some(sigma) = sigma {
                if let Some(value) = compute_singleton(sigma, horizon, shocks.paths(), x) {
                    debug!(seed, horizon, sigma, rounds, value, "coalesced");
                    return Ok(Coalesced {
                        value,
                        horizon,
                        sigma,
                        rounds,
                    });
                }
            }
            trace!(seed, horizon, ?sigma, "no coalescence, extending horizon");

            if horizon >= max_depth {
                warn!(
                    seed,
                    max_depth, rounds, "max depth reached without coalescence; increase max_depth"
                );
                return Err(SamplerError::DepthExhausted { max_depth, rounds });
            }

            horizon = (horizon + self.params.horizon_increment).min(max_depth);
            shocks.extend_to(horizon)?;
        }
    }

    /// The sampled value alone
    pub fn sample(&self, seed: u64) -> Result<f64, SamplerError> {
        self.draw(seed).map(|c| c.value)
    }

    /// The sampled value, or [`FAILURE_SENTINEL`] if the search was exhausted
    pub fn sample_or_sentinel(&self, seed: u64) -> f64 {
        self.sample(seed).unwrap_or(FAILURE_SENTINEL)
    }
}
