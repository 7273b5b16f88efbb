//! Learning-rate schedules

use rand::{Rng, RngCore};

use crate::{
    Error, Result,
    error::ensure_in_range,
    ports::{LearningRateSchedule, RateContext},
};

/// Count-based step size with an exploration branch
///
/// With probability `explore_probability` the update uses `explore_rate`
/// (full replacement at the default of 1.0). Otherwise it uses
/// `1 / n(s, a)`, which shrinks as the state-action pair is revisited and so
/// satisfies the usual stochastic-approximation conditions for the visited
/// entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountBased {
    explore_probability: f64,
    explore_rate: f64,
}

impl CountBased {
    pub const DEFAULT_EXPLORE_PROBABILITY: f64 = 0.5;
    pub const DEFAULT_EXPLORE_RATE: f64 = 1.0;

    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] unless `explore_probability` is in `[0, 1]`
    /// and `explore_rate` is in `(0, 1]`.
    pub fn new(explore_probability: f64, explore_rate: f64) -> Result<Self> {
        ensure_in_range("explore_probability", explore_probability, 0.0, 1.0)?;
        ensure_in_range("explore_rate", explore_rate, f64::MIN_POSITIVE, 1.0)?;
        Ok(Self {
            explore_probability,
            explore_rate,
        })
    }

    /// Pure `1 / n(s, a)` with no exploration branch.
    pub fn inverse_count() -> Self {
        Self {
            explore_probability: 0.0,
            explore_rate: Self::DEFAULT_EXPLORE_RATE,
        }
    }

    pub fn explore_probability(&self) -> f64 {
        self.explore_probability
    }

    pub fn explore_rate(&self) -> f64 {
        self.explore_rate
    }
}

impl Default for CountBased {
    fn default() -> Self {
        Self {
            explore_probability: Self::DEFAULT_EXPLORE_PROBABILITY,
            explore_rate: Self::DEFAULT_EXPLORE_RATE,
        }
    }
}

impl LearningRateSchedule for CountBased {
    fn step_size(&mut self, ctx: &RateContext<'_>, rng: &mut dyn RngCore) -> Result<f64> {
        if rng.random::<f64>() < self.explore_probability {
            return Ok(self.explore_rate);
        }
        match ctx.counts_before.get(ctx.action).copied() {
            Some(count) if count > 0 => Ok(1.0 / count as f64),
            _ => Err(Error::ZeroChoiceCount {
                state: ctx.state,
                action: ctx.action,
            }),
        }
    }

    fn name(&self) -> &str {
        "count-based"
    }
}

/// The same step size for every update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRate {
    rate: f64,
}

impl ConstantRate {
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] unless `rate` is in `(0, 1]`.
    pub fn new(rate: f64) -> Result<Self> {
        ensure_in_range("learning_rate", rate, f64::MIN_POSITIVE, 1.0)?;
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl LearningRateSchedule for ConstantRate {
    fn step_size(&mut self, _ctx: &RateContext<'_>, _rng: &mut dyn RngCore) -> Result<f64> {
        Ok(self.rate)
    }

    fn name(&self) -> &str {
        "constant"
    }
}
