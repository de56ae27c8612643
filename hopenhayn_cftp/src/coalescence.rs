//! Backward coalescence test and extraction of the coalesced value
//!
//! The dynamics are monotone in the starting state, so the path started from
//! the maximal state 1.0 bounds every other path from above. Once that path
//! falls below the exit threshold, every firm alive at the start of the
//! window has exited. The remaining uncertainty is only *when* the last
//! exit happened, which leaves σ+1 candidate restart points to check.

use crate::dynamics::{incumbent_growth, iterate};
use crate::shocks::ShockPaths;

/// Number of backward steps after which the maximal path has exited
///
/// Starting from 1.0 at time -horizon, multiply by the survival shocks at
/// indices `horizon - 1`, `horizon - 2`, … and return the first `k` (in
/// `1..horizon`) at which the state drops below `exit_threshold`. Only
/// survival shocks are read. Returns `None` if the path stays at or above
/// the threshold for the whole window.
///
/// `paths` must hold at least `horizon` pairs.
pub fn find_sigma(horizon: usize, paths: &ShockPaths, exit_threshold: f64) -> Option<usize> {
    let mut state = 1.0;
    for k in 1..horizon {
        state = incumbent_growth(state, paths.survival(horizon - k));
        if state < exit_threshold {
            return Some(k);
        }
    }
    None
}

/// The common value of the σ+1 candidate histories, if they all agree
///
/// Candidate `k` (for `k = 1..=sigma + 1`) restarts with the entrant drawn at
/// index `horizon - k` and runs the dynamics forward to the present. The
/// candidates share every shock once their index ranges overlap, so a true
/// coalescence makes them bit-identical. Agreement is tested with exact
/// `==`; any difference, however small, means no coalescence.
///
/// Requires `sigma < horizon` and `paths` holding at least `horizon` pairs.
pub fn compute_singleton(
    sigma: usize,
    horizon: usize,
    paths: &ShockPaths,
    exit_threshold: f64,
) -> Option<f64> {
    debug_assert!(sigma >= 1 && sigma < horizon);

    let candidate = |k: usize| {
        let restart = horizon - k;
        iterate(
            0,
            restart as isize - 1,
            paths.entrant(restart),
            paths,
            exit_threshold,
        )
    };

    // Deepest restart first, then compare the rest against it
    let value = candidate(sigma + 1);
    if (1..=sigma).all(|k| candidate(k) == value) {
        Some(value)
    } else {
        None
    }
}
