//! Training pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Driving a learner for a fixed step budget
//! - Recording observations during training

pub mod observers;
pub mod training;

// Re-export observer implementations (adapters)
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver, Snapshot, SnapshotObserver};
pub use training::{TrainingPipeline, TrainingResult, train};

pub use crate::ports::Observer;
