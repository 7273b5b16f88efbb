//! Cat-and-mouse grid world: states, actions, dynamics and rewards

pub mod action;
pub mod codec;
pub mod reward;
pub mod state;
pub mod transition;

pub use action::{Action, Delta, NUM_ACTIONS};
pub use codec::StateCodec;
pub use reward::{RewardTable, chebyshev_reward};
pub use state::{GridDims, Point, State};
pub use transition::{CatMotion, TransitionModel};
