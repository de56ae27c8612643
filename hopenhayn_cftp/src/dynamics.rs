//! Law of motion for a single firm slot
//!
//! An incumbent with productivity at or above the exit threshold survives
//! and is hit by a multiplicative shock. Below the threshold it exits and
//! the slot is taken by an entrant:
//!
//!   h(φ, z, u) = φ·u   if φ ≥ x
//!              = z     if φ < x

use crate::shocks::ShockPaths;

/// Productivity of a surviving incumbent after one period: g(φ, u) = φ·u
pub fn incumbent_growth(state: f64, survival_shock: f64) -> f64 {
    state * survival_shock
}

/// One period of the entry-exit dynamics
///
/// A state exactly at the threshold survives.
pub fn step(state: f64, entrant_value: f64, survival_shock: f64, exit_threshold: f64) -> f64 {
    if state >= exit_threshold {
        incumbent_growth(state, survival_shock)
    } else {
        entrant_value
    }
}

/// Compute h_j ∘ h_{j+1} ∘ … ∘ h_k (initial)
///
/// Steps run from index `k` down to index `j`, i.e. from the past towards
/// the present. An empty range (`j > k`) returns `initial` untouched.
/// `k` is signed so that callers can express the empty range `k = j - 1`
/// at `j = 0`.
pub fn iterate(j: usize, k: isize, initial: f64, paths: &ShockPaths, exit_threshold: f64) -> f64 {
    if k < j as isize {
        return initial;
    }
    (j..=k as usize).rev().fold(initial, |state, i| {
        step(state, paths.entrant(i), paths.survival(i), exit_threshold)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: f64 = 0.35;

    #[test]
    fn survivor_is_scaled() {
        assert_eq!(step(0.8, 0.9, 0.5, X), 0.4);
        assert_eq!(incumbent_growth(0.8, 0.5), 0.4);
    }

    #[test]
    fn exiter_is_replaced() {
        assert_eq!(step(0.2, 0.9, 0.5, X), 0.9);
        assert_eq!(step(0.0, 0.7, 1.0, X), 0.7);
    }

    #[test]
    fn threshold_state_survives() {
        assert_eq!(step(X, 0.9, 0.5, X), X * 0.5);
    }

    #[test]
    fn zero_threshold_never_exits() {
        assert_eq!(step(0.0, 0.9, 0.5, 0.0), 0.0);
    }

    #[test]
    fn empty_range_is_identity() {
        let paths = ShockPaths::from_draws(vec![0.5; 4], vec![0.9; 4]);
        assert_eq!(iterate(2, 1, 0.123, &paths, X), 0.123);
        assert_eq!(iterate(0, -1, 0.123, &paths, X), 0.123);
        assert_eq!(iterate(3, 0, 0.123, &paths, X), 0.123);
    }

    #[test]
    fn single_index_range_is_one_step() {
        let paths = ShockPaths::from_draws(vec![0.5, 0.25], vec![0.9, 0.8]);
        assert_eq!(iterate(1, 1, 0.6, &paths, X), step(0.6, 0.8, 0.25, X));
    }

    #[test]
    fn iterates_from_past_to_present() {
        // index:     0     1     2
        // survival: 0.5   0.5   0.9
        // entrant:  0.7   0.6   0.9
        let paths = ShockPaths::from_draws(vec![0.5, 0.5, 0.9], vec![0.7, 0.6, 0.9]);

        // Start 1.0 at index 2: 0.9 -> 0.45 -> 0.225
        let expected = 1.0 * 0.9 * 0.5 * 0.5;
        assert_eq!(iterate(0, 2, 1.0, &paths, X), expected);

        // Start 0.5 at index 2: 0.45 -> 0.225 (exits) -> entrant at 0 = 0.7
        // Order matters: applying the present first would give a different path
        assert_eq!(iterate(0, 2, 0.5, &paths, X), 0.7);
    }

    #[test]
    fn partial_ranges_compose() {
        let paths = ShockPaths::from_draws(
            vec![0.9, 0.8, 0.95, 0.6, 0.99],
            vec![0.85, 0.9, 0.7, 0.95, 0.8],
        );
        let full = iterate(0, 4, 0.6, &paths, X);
        let inner = iterate(2, 4, 0.6, &paths, X);
        let composed = iterate(0, 1, inner, &paths, X);
        assert_eq!(full, composed);
    }
}
