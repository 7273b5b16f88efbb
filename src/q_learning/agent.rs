//! Tabular Q-learning agent for the cat-and-mouse grid
//!
//! The agent owns every piece of mutable learning state: the Q-table, the
//! visit and choice counters, the reward trace and the random source. One call
//! to [`QLearningAgent::step`] performs one complete time-step; a run is a
//! fixed number of such calls.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    config::LearnerConfig,
    ports::{ActionSelector, LearningRateSchedule, RateContext},
    q_learning::{
        counters::{ChoiceCounts, VisitCounts},
        q_table::QTable,
    },
    world::{
        Action, CatMotion, NUM_ACTIONS, RewardTable, State, StateCodec, TransitionModel,
    },
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Snapshot of one completed time-step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Time-step (0-based)
    pub step: u64,
    /// State the mouse acted in
    pub state: State,
    /// Index of `state`
    pub state_index: usize,
    /// Action taken
    pub action: Action,
    /// Resulting state
    pub next_state: State,
    /// Index of `next_state`
    pub next_state_index: usize,
    /// Reward of `state`
    pub reward: f64,
    /// Step size used for the update
    pub step_size: f64,
    /// Q(state, action) after the update
    pub q_value: f64,
}

/// Q-learning agent (off-policy TD control)
///
/// Updates toward the best next-state value regardless of which action the
/// exploration policy will actually take next.
pub struct QLearningAgent {
    codec: StateCodec,
    transition: TransitionModel,
    rewards: RewardTable,
    cat: CatMotion,
    q_table: QTable,
    visits: VisitCounts,
    choices: ChoiceCounts,
    reward_trace: Vec<f64>,
    action_policy: Box<dyn ActionSelector>,
    rate_policy: Box<dyn LearningRateSchedule>,
    rng: StdRng,
    rng_seed: Option<u64>,
    state: State,
    step: u64,
}

impl QLearningAgent {
    /// Build a fresh agent with zero-filled tables.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: &LearnerConfig) -> Result<Self> {
        config.validate()?;
        let codec = StateCodec::new(config.grid)?;
        let rewards = RewardTable::new(&codec)?;
        let q_table = QTable::new(codec.num_states(), NUM_ACTIONS, config.discount)?;
        debug!(
            grid = %config.grid,
            num_states = codec.num_states(),
            discount = config.discount,
            "built Q-learning agent"
        );
        Ok(Self {
            transition: TransitionModel::new(config.grid),
            rewards,
            cat: config.cat,
            q_table,
            visits: VisitCounts::new(codec.num_states()),
            choices: ChoiceCounts::new(codec.num_states(), NUM_ACTIONS),
            reward_trace: Vec::new(),
            action_policy: config.action_policy.build()?,
            rate_policy: config.learning_rate.build()?,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
            state: config.initial_state,
            step: 0,
            codec,
        })
    }

    /// Replace the action-selection strategy.
    pub fn with_action_policy(mut self, policy: Box<dyn ActionSelector>) -> Self {
        self.action_policy = policy;
        self
    }

    /// Replace the learning-rate schedule.
    pub fn with_learning_rate(mut self, schedule: Box<dyn LearningRateSchedule>) -> Self {
        self.rate_policy = schedule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Perform one time-step: act, observe, update.
    ///
    /// # Errors
    ///
    /// Any error is a broken invariant (an off-grid state, a policy returning
    /// an invalid action or step size, a zero choice count) and should end the
    /// run.
    pub fn step(&mut self) -> Result<StepRecord> {
        let t = self.step;
        let state = self.state;

        let i = self.codec.encode(&state)?;
        self.visits.increment(i)?;

        let reward = self.rewards.get(i)?;
        self.reward_trace.push(reward);

        let k = self.action_policy.select(
            t,
            self.q_table.row(i)?,
            self.choices.row(i)?,
            &mut self.rng,
        );
        let action = Action::new(k)?;

        self.choices.increment(i, k)?;

        let next_state =
            self.transition
                .apply(state, action.delta(), self.cat.delta(), &mut self.rng);
        let j = self.codec.encode(&next_state)?;

        let ctx = RateContext {
            step: t,
            state: i,
            action: k,
            q_before: self.q_table.row(i)?,
            counts_before: self.choices.row(i)?,
            q_after: self.q_table.row(j)?,
            counts_after: self.choices.row(j)?,
        };
        let step_size = self.rate_policy.step_size(&ctx, &mut self.rng)?;
        if !(step_size > 0.0 && step_size <= 1.0) {
            return Err(Error::InvalidStepSize {
                value: step_size,
                step: t,
            });
        }

        let q_value = self
            .q_table
            .q_learning_update(i, k, reward, j, step_size)?;

        self.state = next_state;
        self.step += 1;

        Ok(StepRecord {
            step: t,
            state,
            state_index: i,
            action,
            next_state,
            next_state_index: j,
            reward,
            step_size,
            q_value,
        })
    }

    /// Run `steps` time-steps without observers.
    pub fn run(&mut self, steps: u64) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Current state of the world
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of completed time-steps
    pub fn steps_taken(&self) -> u64 {
        self.step
    }

    pub fn codec(&self) -> &StateCodec {
        &self.codec
    }

    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn visit_counts(&self) -> &VisitCounts {
        &self.visits
    }

    pub fn choice_counts(&self) -> &ChoiceCounts {
        &self.choices
    }

    /// Rewards received so far, one per step, oldest first
    pub fn reward_trace(&self) -> &[f64] {
        &self.reward_trace
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    pub fn action_policy_name(&self) -> &str {
        self.action_policy.name()
    }

    pub fn learning_rate_name(&self) -> &str {
        self.rate_policy.name()
    }

    /// The learned greedy action for a state
    pub fn greedy_action(&self, state: &State) -> Result<Action> {
        let index = self.codec.encode(state)?;
        Action::new(self.q_table.greedy_action(index)?)
    }

    /// Q-value for a state and action
    pub fn q_value(&self, state: &State, action: Action) -> Result<f64> {
        let index = self.codec.encode(state)?;
        self.q_table.get(index, action.index())
    }
}

impl std::fmt::Debug for QLearningAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QLearningAgent")
            .field("grid", &self.codec.dims())
            .field("state", &self.state)
            .field("step", &self.step)
            .field("action_policy", &self.action_policy.name())
            .field("learning_rate", &self.rate_policy.name())
            .field("rng_seed", &self.rng_seed)
            .finish_non_exhaustive()
    }
}
