//! Policy ports - action selection and learning-rate schedules
//!
//! Both capabilities receive their random source from the caller so that a
//! seeded learner reproduces the same trajectory run after run.

use rand::RngCore;

use crate::Result;

/// Chooses which action the mouse takes in the current state
///
/// # Examples
///
/// ```
/// use catmouse::ports::ActionSelector;
/// use rand::RngCore;
///
/// /// Always picks the same action.
/// struct Always(usize);
///
/// impl ActionSelector for Always {
///     fn select(
///         &mut self,
///         _step: u64,
///         _q_row: &[f64],
///         _counts_row: &[u64],
///         _rng: &mut dyn RngCore,
///     ) -> usize {
///         self.0
///     }
///
///     fn name(&self) -> &str {
///         "always"
///     }
/// }
/// ```
pub trait ActionSelector: Send {
    /// Pick an action index in `[0, q_row.len())`.
    ///
    /// # Parameters
    ///
    /// * `step` - Current time-step (0-based)
    /// * `q_row` - Current Q-estimates for every action in this state
    /// * `counts_row` - How often each action has been taken in this state so far
    /// * `rng` - Random source owned by the learner
    fn select(
        &mut self,
        step: u64,
        q_row: &[f64],
        counts_row: &[u64],
        rng: &mut dyn RngCore,
    ) -> usize;

    /// Short identifier used in logs and summaries.
    fn name(&self) -> &str;
}

/// Everything a learning-rate schedule may look at for one update
///
/// `counts_before[action]` already includes the choice being updated, so it is
/// at least 1. When the transition loops back to the same state the "after"
/// rows alias the "before" rows.
#[derive(Debug, Clone, Copy)]
pub struct RateContext<'a> {
    /// Current time-step (0-based)
    pub step: u64,
    /// Index of the state the action was taken from
    pub state: usize,
    /// Index of the action that was taken
    pub action: usize,
    /// Q-row of the state the action was taken from
    pub q_before: &'a [f64],
    /// Choice counts of the state the action was taken from
    pub counts_before: &'a [u64],
    /// Q-row of the state the transition landed in
    pub q_after: &'a [f64],
    /// Choice counts of the state the transition landed in
    pub counts_after: &'a [u64],
}

/// Produces the step size for a TD update
pub trait LearningRateSchedule: Send {
    /// Step size for this update, expected to lie in `(0, 1]`.
    ///
    /// # Errors
    ///
    /// Implementations return [`crate::Error::ZeroChoiceCount`] when they divide by a
    /// choice count that is zero; the learner treats any error as fatal.
    fn step_size(&mut self, ctx: &RateContext<'_>, rng: &mut dyn RngCore) -> Result<f64>;

    fn name(&self) -> &str;
}
