//! Action-selection strategies

use rand::{Rng, RngCore};

use crate::{Result, error::ensure_in_range, ports::ActionSelector, q_learning::first_argmax};

/// ε-greedy selection
///
/// With probability `epsilon` picks a uniformly random action, otherwise the
/// action with the highest Q-estimate (lowest index on ties).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub const DEFAULT_EPSILON: f64 = 0.5;

    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfRange`] unless `0 <= epsilon <= 1`.
    pub fn new(epsilon: f64) -> Result<Self> {
        ensure_in_range("epsilon", epsilon, 0.0, 1.0)?;
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
        }
    }
}

impl ActionSelector for EpsilonGreedy {
    fn select(
        &mut self,
        _step: u64,
        q_row: &[f64],
        _counts_row: &[u64],
        rng: &mut dyn RngCore,
    ) -> usize {
        if rng.random::<f64>() < self.epsilon {
            rng.random_range(0..q_row.len())
        } else {
            first_argmax(q_row)
        }
    }

    fn name(&self) -> &str {
        "epsilon-greedy"
    }
}

/// Exploration that decays with the number of visits to a state
///
/// Explores with probability `1 / max(1, n)` where `n` is the total number of
/// actions already taken from the current state, so a fresh state is always
/// explored and well-known states are almost always exploited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecayingExploration;

impl DecayingExploration {
    pub fn explore_probability(counts_row: &[u64]) -> f64 {
        let taken: u64 = counts_row.iter().sum();
        1.0 / taken.max(1) as f64
    }
}

impl ActionSelector for DecayingExploration {
    fn select(
        &mut self,
        _step: u64,
        q_row: &[f64],
        counts_row: &[u64],
        rng: &mut dyn RngCore,
    ) -> usize {
        if rng.random::<f64>() < Self::explore_probability(counts_row) {
            rng.random_range(0..q_row.len())
        } else {
            first_argmax(q_row)
        }
    }

    fn name(&self) -> &str {
        "decaying"
    }
}
