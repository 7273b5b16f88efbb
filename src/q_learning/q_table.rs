//! Dense Q-table for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{Error, Result, error::ensure_in_range};

/// Index of the largest value, preferring the first on ties.
///
/// NaN entries never win. Returns 0 for an empty or all-NaN slice.
pub fn first_argmax(values: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (index, &value) in values.iter().enumerate() {
        if value > best_value {
            best = index;
            best_value = value;
        }
    }
    best
}

/// Q-table holding one row of action values per state index
///
/// All entries start at zero and change only through [`QTable::q_learning_update`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    /// Row-major `num_states x num_actions` values
    q_values: Vec<f64>,
    num_actions: usize,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-filled Q-table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the discount factor is outside `[0, 1]`, and
    /// [`Error::InvalidConfiguration`] if the table would be empty or too large.
    pub fn new(num_states: usize, num_actions: usize, discount_factor: f64) -> Result<Self> {
        ensure_in_range("discount_factor", discount_factor, 0.0, 1.0)?;
        let len = num_states
            .checked_mul(num_actions)
            .filter(|&len| len > 0)
            .ok_or_else(|| Error::InvalidConfiguration {
                message: format!("Q-table of {num_states} states x {num_actions} actions"),
            })?;
        Ok(Self {
            q_values: vec![0.0; len],
            num_actions,
            discount_factor,
        })
    }

    pub fn num_states(&self) -> usize {
        self.q_values.len() / self.num_actions
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    fn check_state(&self, state: usize) -> Result<()> {
        if state < self.num_states() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: state,
                num_states: self.num_states(),
            })
        }
    }

    fn check_action(&self, action: usize) -> Result<()> {
        if action < self.num_actions {
            Ok(())
        } else {
            Err(Error::InvalidAction {
                index: action,
                num_actions: self.num_actions,
            })
        }
    }

    /// All action values for a state.
    pub fn row(&self, state: usize) -> Result<&[f64]> {
        self.check_state(state)?;
        let start = state * self.num_actions;
        Ok(&self.q_values[start..start + self.num_actions])
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: usize, action: usize) -> Result<f64> {
        self.check_action(action)?;
        Ok(self.row(state)?[action])
    }

    /// Maximum Q-value over all actions in a state
    pub fn max_q(&self, state: usize) -> Result<f64> {
        Ok(self
            .row(state)?
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Greedy action (highest Q-value, first on ties)
    pub fn greedy_action(&self, state: usize) -> Result<usize> {
        Ok(first_argmax(self.row(state)?))
    }

    /// Q-learning update: off-policy TD(0) backup
    ///
    /// Q(s,a) ← (1-α)·Q(s,a) + α·[r + γ·max_a' Q(s',a')]
    ///
    /// Returns the new value of `Q(s,a)`.
    pub fn q_learning_update(
        &mut self,
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
        step_size: f64,
    ) -> Result<f64> {
        let current_q = self.get(state, action)?;
        let max_next_q = self.max_q(next_state)?;
        let td_target = reward + self.discount_factor * max_next_q;
        let new_q = (1.0 - step_size) * current_q + step_size * td_target;
        self.q_values[state * self.num_actions + action] = new_q;
        Ok(new_q)
    }

    /// Number of entries that have moved away from zero
    pub fn nonzero_entries(&self) -> usize {
        self.q_values.iter().filter(|&&q| q != 0.0).count()
    }

    pub fn values(&self) -> &[f64] {
        &self.q_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new(16, 9, 0.5).unwrap();
        assert_eq!(qtable.num_states(), 16);
        assert!(qtable.values().iter().all(|&q| q == 0.0));
        assert_eq!(qtable.get(15, 8).unwrap(), 0.0);
    }

    #[test]
    fn test_qtable_bounds() {
        let qtable = QTable::new(4, 9, 0.5).unwrap();
        assert!(matches!(qtable.row(4), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(qtable.get(0, 9), Err(Error::InvalidAction { .. })));
    }

    #[test]
    fn test_first_argmax_prefers_first() {
        assert_eq!(first_argmax(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(first_argmax(&[0.0; 9]), 0);
        assert_eq!(first_argmax(&[-2.0, -1.0, f64::NAN]), 1);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new(4, 3, 0.99).unwrap();

        // Give the next state some value
        qtable.q_learning_update(2, 1, 1.0, 3, 1.0).unwrap();
        qtable.q_learning_update(2, 2, 2.0, 3, 1.0).unwrap();
        assert_eq!(qtable.max_q(2).unwrap(), 2.0);

        // Q(0,1) = 0.5 * 0.0 + 0.5 * (0.0 + 0.99 * 2.0) = 0.99
        let updated = qtable.q_learning_update(0, 1, 0.0, 2, 0.5).unwrap();
        assert!((updated - 0.99).abs() < 1e-12);
        assert_eq!(qtable.get(0, 1).unwrap(), updated);
        assert_eq!(qtable.greedy_action(0).unwrap(), 1);
        assert_eq!(qtable.nonzero_entries(), 3);
    }

    #[test]
    fn test_self_loop_update() {
        let mut qtable = QTable::new(1, 9, 0.5).unwrap();
        qtable.q_learning_update(0, 4, 1.0, 0, 1.0).unwrap();
        let second = qtable.q_learning_update(0, 4, 1.0, 0, 1.0).unwrap();
        assert_eq!(second, 1.5);
    }

    #[test]
    fn test_discount_validation() {
        assert!(QTable::new(1, 9, 1.01).is_err());
        assert!(QTable::new(0, 9, 0.5).is_err());
    }
}
