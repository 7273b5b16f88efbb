//! Distance-from-the-cat reward

use super::{codec::StateCodec, state::State};
use crate::{Error, Result};

/// Chebyshev (chessboard) distance between mouse and cat
///
/// Diagonal moves cost the same as straight ones, so this is the number of
/// steps the cat needs to reach the mouse.
pub fn chebyshev_reward(state: &State) -> f64 {
    let dx = state.mouse.x.abs_diff(state.cat.x);
    let dy = state.mouse.y.abs_diff(state.cat.y);
    dx.max(dy) as f64
}

/// Rewards for every state, indexed by state index
#[derive(Debug, Clone)]
pub struct RewardTable {
    rewards: Vec<f64>,
}

impl RewardTable {
    /// Evaluate [`chebyshev_reward`] for every state the codec can index.
    pub fn new(codec: &StateCodec) -> Result<Self> {
        let rewards = (0..codec.num_states())
            .map(|index| codec.decode(index).map(|state| chebyshev_reward(&state)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rewards })
    }

    /// Reward of the state at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a valid state index.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.rewards
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                num_states: self.rewards.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Largest reward any state can yield
    pub fn max_reward(&self) -> f64 {
        self.rewards.iter().copied().fold(0.0, f64::max)
    }
}
