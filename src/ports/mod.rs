//! Ports (trait boundaries) between the learning core and its collaborators.
//!
//! The learning core owns these traits. Exploration strategies, step-size
//! schedules and reporting sinks are adapters that implement them, so any of
//! them can be swapped without touching the update loop.

pub mod observer;
pub mod policy;

pub use observer::Observer;
pub use policy::{ActionSelector, LearningRateSchedule, RateContext};
