//! Analysis tools for learning runs
//!
//! Turns the raw reward trace into plot-ready curves and summary statistics.

pub mod reward_curve;

pub use reward_curve::{CurvePoint, RewardSummary, bucket_averages};
