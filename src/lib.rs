//! Tabular Q-learning for a cat-and-mouse pursuit grid
//!
//! A mouse and a cat move simultaneously on a rectangular grid. The mouse
//! learns by temporal-difference Q-learning to keep its distance; the cat
//! wanders at random (or on a fixed course). This crate provides:
//! - The grid world: state encoding, clamped dynamics, Chebyshev rewards
//! - Pluggable action-selection and learning-rate policies
//! - A single-agent Q-learner with visit and choice counters
//! - A training pipeline with observers, reward-curve analysis and exports

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod q_learning;
pub mod world;

pub use config::{LearnerConfig, RunConfig};
pub use error::{Error, Result};
pub use pipeline::{TrainingPipeline, TrainingResult};
pub use q_learning::{QLearningAgent, StepRecord};
pub use world::{Action, GridDims, State};
