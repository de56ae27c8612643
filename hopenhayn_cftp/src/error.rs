use thiserror::Error;

/// Numeric sentinel written in place of a sample when coalescence fails.
///
/// Valid productivity values are non-negative, so -1 can never be confused
/// with a real draw.
pub const FAILURE_SENTINEL: f64 = -1.0;

/// Errors raised while drawing a perfect sample
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    /// The horizon reached the depth bound without coalescence
    #[error(
        "no coalescence within max depth {max_depth} after {rounds} rounds; \
         if this happens repeatedly, increase max_depth"
    )]
    DepthExhausted { max_depth: usize, rounds: usize },

    /// A request to grow the shock buffers past their hard cap
    #[error("shock buffer cap of {cap} draws exceeded (requested {requested})")]
    ShockBufferFull { cap: usize, requested: usize },
}

impl SamplerError {
    /// Returns true if the caller could retry with a larger depth bound
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, SamplerError::DepthExhausted { .. })
    }
}

/// Errors in model parameters or run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Beta shape parameters rejected by the distribution
    #[error("invalid {which} shock shape (alpha={alpha}, beta={beta}): {reason}")]
    InvalidShape {
        which: &'static str,
        alpha: f64,
        beta: f64,
        reason: String,
    },

    /// Exit threshold must be finite and non-negative
    #[error("exit threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),

    /// Horizon settings that cannot produce a valid search
    #[error("invalid horizon settings: {0}")]
    InvalidHorizon(String),

    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
