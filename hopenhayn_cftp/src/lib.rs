//! Perfect sampling for the Hopenhayn entry-exit model
//!
//! Draws exact samples from the stationary distribution of firm
//! productivity by coupling from the past (Stachurski & Kamihigashi, 2012).
//!
//! Each period an incumbent with productivity φ at or above the exit
//! threshold x survives and becomes φ·U with U ~ Beta(α₁, β₁). Below x it
//! exits and is replaced by an entrant with productivity Z ~ Beta(α₂, β₂).
//!
//! Key pieces:
//! - `shocks`: seeded, append-only survival and entrant shock paths
//! - `dynamics`: the one-step law of motion and its backward composition
//! - `coalescence`: the σ test and the singleton check
//! - `sampler`: the growing-horizon CFTP loop
//!
//! ```
//! use hopenhayn_cftp::{ModelParams, PerfectSampler};
//!
//! let sampler = PerfectSampler::new(ModelParams::baseline()).unwrap();
//! let value = sampler.sample(42).unwrap();
//! assert!(value >= 0.0);
//! assert_eq!(value, sampler.sample(42).unwrap());
//! ```

pub mod analysis;
pub mod batch;
pub mod coalescence;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod params;
pub mod sampler;
pub mod shocks;

pub use analysis::BatchSummary;
pub use batch::{run_batch, DrawRecord};
pub use config::{BatchSettings, RunConfig};
pub use error::{ConfigError, SamplerError, FAILURE_SENTINEL};
pub use params::{BetaShape, ModelParams};
pub use sampler::{Coalesced, PerfectSampler};
pub use shocks::{ShockPaths, ShockSource};
