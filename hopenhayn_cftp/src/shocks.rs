//! Shock sequences indexed by steps into the past
//!
//! Storage index `i` holds the shocks of mathematical time `-i`: index 0 is
//! the present, larger indices lie further back. Buffers only ever grow at
//! the far (past) end, so a value once drawn keeps its index for the rest
//! of the run.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Beta, Distribution};

use crate::error::{ConfigError, SamplerError};
use crate::params::{BetaShape, ModelParams};

/// Survival and entrant shocks for times 0, -1, ..., -(len - 1)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShockPaths {
    survival: Vec<f64>,
    entrant: Vec<f64>,
}

impl ShockPaths {
    fn with_capacity(capacity: usize) -> Self {
        ShockPaths {
            survival: Vec::with_capacity(capacity),
            entrant: Vec::with_capacity(capacity),
        }
    }

    /// Build paths from explicit draws, index 0 being the present
    ///
    /// # Panics
    /// Panics if the two sequences differ in length.
    pub fn from_draws(survival: Vec<f64>, entrant: Vec<f64>) -> Self {
        assert_eq!(
            survival.len(),
            entrant.len(),
            "survival and entrant paths must have equal length"
        );
        ShockPaths { survival, entrant }
    }

    /// Survival shock `steps_back` periods into the past
    pub fn survival(&self, steps_back: usize) -> f64 {
        self.survival[steps_back]
    }

    /// Entrant productivity `steps_back` periods into the past
    pub fn entrant(&self, steps_back: usize) -> f64 {
        self.entrant[steps_back]
    }

    /// Number of shock pairs held
    pub fn len(&self) -> usize {
        self.survival.len()
    }

    pub fn is_empty(&self) -> bool {
        self.survival.is_empty()
    }

    /// Append one pair one step further into the past
    pub fn push(&mut self, survival: f64, entrant: f64) {
        self.survival.push(survival);
        self.entrant.push(entrant);
    }
}

/// Seeded generator that lazily extends a pair of shock paths
///
/// Survival and entrant draws alternate from a single generator, survival
/// first, in order of increasing index. The same seed therefore always
/// yields the same value at the same index, however the horizon is grown.
pub struct ShockSource {
    rng: StdRng,
    incumbent: Beta<f64>,
    entrant: Beta<f64>,
    paths: ShockPaths,
    cap: usize,
}

impl ShockSource {
    /// Create an empty source holding at most `cap` shock pairs
    pub fn new(
        incumbent: BetaShape,
        entrant: BetaShape,
        cap: usize,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Ok(ShockSource::with_laws(
            beta_law(incumbent, "incumbent")?,
            beta_law(entrant, "entrant")?,
            cap,
            seed,
        ))
    }

    /// Create an empty source from already constructed distributions
    pub fn with_laws(incumbent: Beta<f64>, entrant: Beta<f64>, cap: usize, seed: u64) -> Self {
        ShockSource {
            rng: StdRng::seed_from_u64(seed),
            incumbent,
            entrant,
            paths: ShockPaths::with_capacity(cap.min(1024)),
            cap,
        }
    }

    /// Source for a model, capped at `max_depth + 1` pairs (indices 0..=max_depth)
    pub fn for_model(params: &ModelParams, seed: u64) -> Result<Self, ConfigError> {
        ShockSource::new(
            params.incumbent_shape,
            params.entrant_shape,
            params.max_depth + 1,
            seed,
        )
    }

    /// Draw until index `horizon` exists, i.e. `horizon + 1` pairs are held
    ///
    /// Existing draws are left untouched.
    pub fn extend_to(&mut self, horizon: usize) -> Result<(), SamplerError> {
        let requested = horizon + 1;
        if requested > self.cap {
            return Err(SamplerError::ShockBufferFull {
                cap: self.cap,
                requested,
            });
        }
        while self.paths.len() < requested {
            let u = self.incumbent.sample(&mut self.rng);
            let z = self.entrant.sample(&mut self.rng);
            self.paths.push(u, z);
        }
        Ok(())
    }

    pub fn paths(&self) -> &ShockPaths {
        &self.paths
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

pub(crate) fn beta_law(shape: BetaShape, which: &'static str) -> Result<Beta<f64>, ConfigError> {
    Beta::new(shape.alpha, shape.beta).map_err(|e| ConfigError::InvalidShape {
        which,
        alpha: shape.alpha,
        beta: shape.beta,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_source(seed: u64) -> ShockSource {
        ShockSource::for_model(&ModelParams::baseline(), seed).unwrap()
    }

    #[test]
    fn extend_draws_inclusive_horizon() {
        let mut source = baseline_source(42);
        assert!(source.paths().is_empty());

        source.extend_to(100).unwrap();
        assert_eq!(source.paths().len(), 101);

        source.extend_to(150).unwrap();
        assert_eq!(source.paths().len(), 151);

        // Shrinking request is a no-op
        source.extend_to(10).unwrap();
        assert_eq!(source.paths().len(), 151);
    }

    #[test]
    fn draws_lie_in_unit_interval() {
        let mut source = baseline_source(7);
        source.extend_to(500).unwrap();
        let paths = source.paths();
        for i in 0..paths.len() {
            assert!((0.0..=1.0).contains(&paths.survival(i)));
            assert!((0.0..=1.0).contains(&paths.entrant(i)));
        }
    }

    #[test]
    fn growth_preserves_existing_draws() {
        // Growing in two steps must match drawing everything at once
        let mut stepped = baseline_source(123);
        stepped.extend_to(100).unwrap();
        let before = stepped.paths().clone();
        stepped.extend_to(150).unwrap();

        let mut direct = baseline_source(123);
        direct.extend_to(150).unwrap();

        assert_eq!(stepped.paths(), direct.paths());
        for i in 0..before.len() {
            assert_eq!(before.survival(i), stepped.paths().survival(i));
            assert_eq!(before.entrant(i), stepped.paths().entrant(i));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = baseline_source(1);
        let mut b = baseline_source(2);
        a.extend_to(10).unwrap();
        b.extend_to(10).unwrap();
        assert_ne!(a.paths(), b.paths());
    }

    #[test]
    fn cap_is_enforced() {
        let params = ModelParams {
            max_depth: 120,
            ..ModelParams::baseline()
        };
        let mut source = ShockSource::for_model(&params, 5).unwrap();
        assert_eq!(source.cap(), 121);

        assert!(source.extend_to(120).is_ok());
        assert_eq!(
            source.extend_to(121),
            Err(SamplerError::ShockBufferFull {
                cap: 121,
                requested: 122
            })
        );
        // Failed request leaves the buffers alone
        assert_eq!(source.paths().len(), 121);
    }

    #[test]
    fn invalid_shape_is_reported() {
        let result = ShockSource::new(BetaShape::new(-1.0, 1.0), BetaShape::default(), 10, 0);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidShape {
                which: "incumbent",
                ..
            })
        ));
    }

    #[test]
    fn explicit_paths_accessors() {
        let paths = ShockPaths::from_draws(vec![0.1, 0.2], vec![0.3, 0.4]);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths.survival(1), 0.2);
        assert_eq!(paths.entrant(0), 0.3);
    }

    #[test]
    #[should_panic]
    fn mismatched_paths_panic() {
        ShockPaths::from_draws(vec![0.1], vec![]);
    }
}
