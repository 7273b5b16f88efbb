//! Training pipeline: drive a learner for a fixed step budget

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Result,
    analysis::{RewardSummary, bucket_averages},
    config::RunConfig,
    ports::Observer,
    q_learning::QLearningAgent,
    world::{GridDims, State},
};

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Time-steps completed
    pub total_steps: u64,

    pub grid: GridDims,

    /// State after the last step
    pub final_state: State,

    /// Statistics of the whole reward trace
    pub reward: RewardSummary,

    /// Mean reward in the last bucket of the averaged curve
    pub final_bucket_reward: f64,

    /// Distinct states visited at least once
    pub states_visited: usize,

    /// Distinct state-action pairs tried at least once
    pub pairs_tried: usize,

    /// Q-table entries that moved away from zero
    pub nonzero_q_entries: usize,

    pub action_policy: String,

    pub learning_rate: String,

    pub seed: Option<u64>,
}

impl TrainingResult {
    /// Summarize an agent's current tables.
    pub fn from_agent(agent: &QLearningAgent, reward_buckets: usize) -> Self {
        let trace = agent.reward_trace();
        let final_bucket_reward = bucket_averages(trace, reward_buckets)
            .last()
            .map(|point| point.mean_reward)
            .unwrap_or(0.0);
        Self {
            total_steps: agent.steps_taken(),
            grid: agent.codec().dims(),
            final_state: agent.state(),
            reward: RewardSummary::from_trace(trace),
            final_bucket_reward,
            states_visited: agent.visit_counts().distinct(),
            pairs_tried: agent.choice_counts().distinct_pairs(),
            nonzero_q_entries: agent.q_table().nonzero_entries(),
            action_policy: agent.action_policy_name().to_string(),
            learning_rate: agent.learning_rate_name().to_string(),
            seed: agent.rng_seed(),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline for a single learner
///
/// Runs the learner for exactly `steps` time-steps; there is no early
/// stopping. Observers see every step but cannot influence learning.
pub struct TrainingPipeline {
    steps: u64,
    reward_buckets: usize,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(steps: u64) -> Self {
        Self {
            steps,
            reward_buckets: RunConfig::DEFAULT_REWARD_BUCKETS,
            observers: Vec::new(),
        }
    }

    /// Pipeline with the step budget and bucket count of a run configuration
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.steps).with_reward_buckets(config.reward_buckets)
    }

    pub fn with_reward_buckets(mut self, reward_buckets: usize) -> Self {
        self.reward_buckets = reward_buckets;
        self
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        let dims = agent.codec().dims();
        info!(
            steps = self.steps,
            grid = %dims,
            action_policy = agent.action_policy_name(),
            learning_rate = agent.learning_rate_name(),
            "training started"
        );

        // Notify observers of training start
        for observer in &mut self.observers {
            observer.on_training_start(self.steps, dims)?;
        }

        for _ in 0..self.steps {
            let record = agent.step()?;
            for observer in &mut self.observers {
                observer.on_step(&record)?;
            }
        }

        let result = TrainingResult::from_agent(agent, self.reward_buckets);

        // Notify observers of training end
        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }

        info!(
            mean_reward = result.reward.mean,
            final_bucket_reward = result.final_bucket_reward,
            states_visited = result.states_visited,
            "training finished"
        );
        Ok(result)
    }
}

/// Build an agent from a run configuration and train it without observers.
pub fn train(config: &RunConfig) -> Result<(QLearningAgent, TrainingResult)> {
    config.validate()?;
    let mut agent = QLearningAgent::new(&config.learner)?;
    let result = TrainingPipeline::from_config(config).run(&mut agent)?;
    Ok((agent, result))
}
