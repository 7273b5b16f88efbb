//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the learning loop to specific output formats.

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::TrainingResult;
use crate::{
    Result,
    config::SnapshotCadence,
    ports::Observer,
    q_learning::StepRecord,
    world::{GridDims, State},
};

/// How many steps pass between progress bar refreshes
const PROGRESS_REFRESH: u64 = 1_000;

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    reward_sum: f64,
    steps: u64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            reward_sum: 0.0,
            steps: 0,
        }
    }

    fn average(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.reward_sum / self.steps as f64
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_steps: u64, _dims: GridDims) -> Result<()> {
        let pb = ProgressBar::new(total_steps);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} steps (avg reward {msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_step(&mut self, record: &StepRecord) -> Result<()> {
        self.reward_sum += record.reward;
        self.steps += 1;

        if let Some(pb) = &self.progress_bar
            && self.steps.is_multiple_of(PROGRESS_REFRESH)
        {
            pb.set_position(self.steps);
            pb.set_message(format!("{:.3}", self.average()));
        }
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(self.steps);
            pb.finish_with_message(format!("{:.3}", self.average()));
        }
        Ok(())
    }
}

/// Metrics observer - Tracks reward statistics while training
pub struct MetricsObserver {
    steps: u64,
    reward_sum: f64,
    /// Steps on which the cat shared the mouse's cell
    caught: u64,
    window: usize,
    recent: VecDeque<f64>,
}

impl MetricsObserver {
    pub const DEFAULT_WINDOW: usize = 1_000;

    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Track the moving average over the last `window` rewards
    pub fn with_window(window: usize) -> Self {
        Self {
            steps: 0,
            reward_sum: 0.0,
            caught: 0,
            window: window.max(1),
            recent: VecDeque::with_capacity(window.max(1)),
        }
    }

    /// Mean reward over all observed steps
    pub fn mean_reward(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.reward_sum / self.steps as f64
        }
    }

    /// Mean reward over the most recent window
    pub fn recent_mean_reward(&self) -> f64 {
        if self.recent.is_empty() {
            0.0
        } else {
            self.recent.iter().sum::<f64>() / self.recent.len() as f64
        }
    }

    /// Share of steps spent on the cat's cell
    pub fn caught_rate(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.caught as f64 / self.steps as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            steps: self.steps,
            mean_reward: self.mean_reward(),
            recent_mean_reward: self.recent_mean_reward(),
            caught: self.caught,
            caught_rate: self.caught_rate(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub steps: u64,
    pub mean_reward: f64,
    pub recent_mean_reward: f64,
    pub caught: u64,
    pub caught_rate: f64,
}

impl Observer for MetricsObserver {
    fn on_step(&mut self, record: &StepRecord) -> Result<()> {
        self.steps += 1;
        self.reward_sum += record.reward;
        if record.reward == 0.0 {
            self.caught += 1;
        }
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(record.reward);
        Ok(())
    }
}

/// A frame for an external renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub step: u64,
    /// State after the step's move
    pub state: State,
    pub reward: f64,
    /// Mean reward over all steps so far
    pub average_reward: f64,
    /// Plot extents `[x_min, x_max]`
    pub x_bounds: (i64, i64),
    /// Plot extents `[y_min, y_max]`
    pub y_bounds: (i64, i64),
}

/// Snapshot observer - Writes renderer frames to JSON Lines
///
/// Only steps for which the cadence is due are written, one JSON object per
/// line.
pub struct SnapshotObserver {
    writer: BufWriter<File>,
    cadence: SnapshotCadence,
    bounds: ((i64, i64), (i64, i64)),
    reward_sum: f64,
    steps: u64,
    written: u64,
}

impl SnapshotObserver {
    /// Create a new snapshot observer
    pub fn new<P: AsRef<Path>>(path: P, cadence: SnapshotCadence) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            cadence,
            bounds: GridDims::default().plot_bounds(),
            reward_sum: 0.0,
            steps: 0,
            written: 0,
        })
    }

    /// Number of snapshots written so far
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl Observer for SnapshotObserver {
    fn on_training_start(&mut self, _total_steps: u64, dims: GridDims) -> Result<()> {
        self.bounds = dims.plot_bounds();
        Ok(())
    }

    fn on_step(&mut self, record: &StepRecord) -> Result<()> {
        self.reward_sum += record.reward;
        self.steps += 1;

        if !self.cadence.is_due(record.step) {
            return Ok(());
        }

        let (x_bounds, y_bounds) = self.bounds;
        let snapshot = Snapshot {
            step: record.step,
            state: record.next_state,
            reward: record.reward,
            average_reward: self.reward_sum / self.steps as f64,
            x_bounds,
            y_bounds,
        };
        serde_json::to_writer(&mut self.writer, &snapshot)?;
        writeln!(&mut self.writer)?;
        self.written += 1;
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
