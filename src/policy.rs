//! Built-in adapters for the policy ports
//!
//! - [`EpsilonGreedy`]: fixed-rate exploration (the default)
//! - [`DecayingExploration`]: exploration that fades as a state is revisited
//! - [`CountBased`]: mixes full replacement with a `1/n` step size (the default)
//! - [`ConstantRate`]: the same step size every update

pub mod action;
pub mod learning_rate;

pub use action::{DecayingExploration, EpsilonGreedy};
pub use learning_rate::{ConstantRate, CountBased};
