//! Tabular Q-learning
//!
//! Q-learning is off-policy TD control: every update bootstraps from the best
//! action value of the successor state,
//!
//! ```text
//! Q(s,a) ← (1-α)·Q(s,a) + α·[r(s) + γ·max_a' Q(s',a')]
//! ```
//!
//! so the table converges toward Q* while the behavior policy keeps exploring.
//!
//! ## Usage Example
//!
//! ```no_run
//! use catmouse::{config::LearnerConfig, q_learning::QLearningAgent, world::GridDims};
//!
//! let config = LearnerConfig::new(GridDims::new(10, 10).unwrap()).with_seed(7);
//! let mut agent = QLearningAgent::new(&config).unwrap();
//! agent.run(100_000).unwrap();
//! println!("distinct states visited: {}", agent.visit_counts().distinct());
//! ```

pub mod agent;
pub mod counters;
pub mod q_table;

// Public re-exports
pub use agent::{QLearningAgent, StepRecord};
pub use counters::{ChoiceCounts, VisitCounts};
pub use q_table::{QTable, first_argmax};
