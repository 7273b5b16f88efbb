//! Configuration types for learners and training runs.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Error, Result,
    error::ensure_in_range,
    policy::{ConstantRate, CountBased, DecayingExploration, EpsilonGreedy},
    ports::{ActionSelector, LearningRateSchedule},
    world::{CatMotion, Delta, GridDims, State, StateCodec},
};

/// Which action-selection strategy to build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ActionPolicyConfig {
    EpsilonGreedy { epsilon: f64 },
    Decaying,
}

impl ActionPolicyConfig {
    pub fn build(&self) -> Result<Box<dyn ActionSelector>> {
        let policy: Box<dyn ActionSelector> = match *self {
            ActionPolicyConfig::EpsilonGreedy { epsilon } => Box::new(EpsilonGreedy::new(epsilon)?),
            ActionPolicyConfig::Decaying => Box::new(DecayingExploration),
        };
        Ok(policy)
    }
}

impl Default for ActionPolicyConfig {
    fn default() -> Self {
        ActionPolicyConfig::EpsilonGreedy {
            epsilon: EpsilonGreedy::DEFAULT_EPSILON,
        }
    }
}

/// Which learning-rate schedule to build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LearningRateConfig {
    CountBased {
        explore_probability: f64,
        explore_rate: f64,
    },
    Constant {
        rate: f64,
    },
}

impl LearningRateConfig {
    pub fn build(&self) -> Result<Box<dyn LearningRateSchedule>> {
        let schedule: Box<dyn LearningRateSchedule> = match *self {
            LearningRateConfig::CountBased {
                explore_probability,
                explore_rate,
            } => Box::new(CountBased::new(explore_probability, explore_rate)?),
            LearningRateConfig::Constant { rate } => Box::new(ConstantRate::new(rate)?),
        };
        Ok(schedule)
    }
}

impl Default for LearningRateConfig {
    fn default() -> Self {
        LearningRateConfig::CountBased {
            explore_probability: CountBased::DEFAULT_EXPLORE_PROBABILITY,
            explore_rate: CountBased::DEFAULT_EXPLORE_RATE,
        }
    }
}

/// Configuration for creating a Q-learning agent.
///
/// # Examples
///
/// ```
/// use catmouse::{
///     config::{LearnerConfig, LearningRateConfig},
///     world::{GridDims, State},
/// };
///
/// let config = LearnerConfig::new(GridDims::new(5, 4).unwrap())
///     .with_initial_state(State::new(0, 0, 4, 3))
///     .with_discount(0.9)
///     .with_learning_rate(LearningRateConfig::Constant { rate: 0.1 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Grid dimensions
    pub grid: GridDims,
    /// Where the mouse and cat start
    pub initial_state: State,
    /// Discount factor γ in `[0, 1]`
    pub discount: f64,
    /// How the cat moves
    pub cat: CatMotion,
    /// Action-selection strategy
    pub action_policy: ActionPolicyConfig,
    /// Learning-rate schedule
    pub learning_rate: LearningRateConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl LearnerConfig {
    pub const DEFAULT_DISCOUNT: f64 = 0.5;

    /// Defaults for everything but the grid. The initial state is the
    /// default `(0, 0, 3, 0)` clamped onto the grid.
    pub fn new(grid: GridDims) -> Self {
        let State { mouse, cat } = State::default();
        let initial_state = State::new(
            mouse.x.min(grid.width() - 1),
            mouse.y.min(grid.height() - 1),
            cat.x.min(grid.width() - 1),
            cat.y.min(grid.height() - 1),
        );
        Self {
            grid,
            initial_state,
            discount: Self::DEFAULT_DISCOUNT,
            cat: CatMotion::default(),
            action_policy: ActionPolicyConfig::default(),
            learning_rate: LearningRateConfig::default(),
            seed: None,
        }
    }

    pub fn with_initial_state(mut self, state: State) -> Self {
        self.initial_state = state;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_cat_motion(mut self, cat: CatMotion) -> Self {
        self.cat = cat;
        self
    }

    pub fn with_action_policy(mut self, policy: ActionPolicyConfig) -> Self {
        self.action_policy = policy;
        self
    }

    pub fn with_learning_rate(mut self, schedule: LearningRateConfig) -> Self {
        self.learning_rate = schedule;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field without building an agent.
    pub fn validate(&self) -> Result<()> {
        StateCodec::new(self.grid)?;
        self.initial_state.check_bounds(self.grid)?;
        ensure_in_range("discount", self.discount, 0.0, 1.0)?;
        if self.discount == 1.0 {
            warn!("discount of 1.0 never converges on a task without terminal states");
        }
        if let CatMotion::Fixed { delta } = self.cat {
            Delta::new(delta.dx, delta.dy)?;
        }
        self.action_policy.build()?;
        self.learning_rate.build()?;
        Ok(())
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self::new(GridDims::default())
    }
}

/// When per-step snapshots are emitted for rendering
///
/// A snapshot is due when `step % period < window`, giving a short burst of
/// consecutive frames every `period` steps. A period of zero disables them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCadence {
    pub period: u64,
    pub window: u64,
}

impl SnapshotCadence {
    pub fn is_due(&self, step: u64) -> bool {
        self.period > 0 && step % self.period < self.window
    }
}

impl Default for SnapshotCadence {
    fn default() -> Self {
        Self {
            period: 30_000,
            window: 10,
        }
    }
}

/// A complete training run: learner plus step budget and reporting knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub learner: LearnerConfig,
    /// Total number of time-steps
    pub steps: u64,
    pub snapshots: SnapshotCadence,
    /// Number of buckets for the averaged reward curve
    pub reward_buckets: usize,
}

impl RunConfig {
    pub const DEFAULT_STEPS: u64 = 1_000_000;
    pub const DEFAULT_REWARD_BUCKETS: usize = 20;

    pub fn validate(&self) -> Result<()> {
        self.learner.validate()?;
        if self.reward_buckets == 0 {
            return Err(Error::InvalidConfiguration {
                message: "reward_buckets must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Load a run configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the run configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            learner: LearnerConfig::default(),
            steps: Self::DEFAULT_STEPS,
            snapshots: SnapshotCadence::default(),
            reward_buckets: Self::DEFAULT_REWARD_BUCKETS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = RunConfig::default();
        assert_eq!(config.learner.grid, GridDims::new(10, 10).unwrap());
        assert_eq!(config.learner.initial_state, State::new(0, 0, 3, 0));
        assert_eq!(config.learner.discount, 0.5);
        assert_eq!(config.steps, 1_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_state_clamped_to_small_grid() {
        let config = LearnerConfig::new(GridDims::new(2, 2).unwrap());
        assert_eq!(config.initial_state, State::new(0, 0, 1, 0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let grid = GridDims::new(3, 3).unwrap();
        let off_grid = LearnerConfig::new(grid).with_initial_state(State::new(0, 0, 3, 0));
        assert!(matches!(
            off_grid.validate(),
            Err(Error::CoordinateOutOfBounds { .. })
        ));

        let bad_discount = LearnerConfig::new(grid).with_discount(1.5);
        assert!(matches!(
            bad_discount.validate(),
            Err(Error::OutOfRange {
                name: "discount",
                ..
            })
        ));

        let bad_epsilon = LearnerConfig::new(grid)
            .with_action_policy(ActionPolicyConfig::EpsilonGreedy { epsilon: 2.0 });
        assert!(bad_epsilon.validate().is_err());

        let long_jump = LearnerConfig::new(grid).with_cat_motion(CatMotion::Fixed {
            delta: Delta { dx: 2, dy: 0 },
        });
        assert!(long_jump.validate().is_err());
    }

    #[test]
    fn test_snapshot_cadence() {
        let cadence = SnapshotCadence {
            period: 100,
            window: 3,
        };
        let due: Vec<u64> = (0..205).filter(|&t| cadence.is_due(t)).collect();
        assert_eq!(due, vec![0, 1, 2, 100, 101, 102, 200, 201, 202]);
        assert!(!SnapshotCadence { period: 0, window: 5 }.is_due(0));
    }

    #[test]
    fn test_run_config_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let config = RunConfig {
            steps: 500,
            learner: LearnerConfig::new(GridDims::new(4, 4).unwrap())
                .with_seed(3)
                .with_learning_rate(LearningRateConfig::Constant { rate: 0.25 }),
            ..RunConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(RunConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"steps": 42, "learner": {"discount": 0.9}}"#).unwrap();
        assert_eq!(config.steps, 42);
        assert_eq!(config.learner.discount, 0.9);
        assert_eq!(config.learner.grid, GridDims::default());
        assert_eq!(config.reward_buckets, 20);
    }
}
