//! Observer port - abstraction for watching a learning run
//!
//! Observers receive read-only snapshots of every time-step. They can render,
//! record or summarize, but nothing they do flows back into the Q-table.

use crate::{
    Result,
    pipeline::training::TrainingResult,
    q_learning::agent::StepRecord,
    world::GridDims,
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_steps, dims)` - Once at the beginning
/// 2. `on_step(record)` - After every completed time-step
/// 3. `on_training_end(result)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use catmouse::{ports::Observer, q_learning::StepRecord};
///
/// struct CaughtCounter {
///     caught: usize,
/// }
///
/// impl Observer for CaughtCounter {
///     fn on_step(&mut self, record: &StepRecord) -> catmouse::Result<()> {
///         if record.reward == 0.0 {
///             self.caught += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first step.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_start(&mut self, _total_steps: u64, _dims: GridDims) -> Result<()> {
        Ok(())
    }

    /// Called after each step's TD update has been applied.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_step(&mut self, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called once after the last step.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to flush files or print summaries.
    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        Ok(())
    }
}
