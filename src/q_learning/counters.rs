//! Visit and choice counters

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How many times each state was the current state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitCounts {
    counts: Vec<u64>,
}

impl VisitCounts {
    pub fn new(num_states: usize) -> Self {
        Self {
            counts: vec![0; num_states],
        }
    }

    pub fn increment(&mut self, state: usize) -> Result<u64> {
        let num_states = self.counts.len();
        let count = self.counts.get_mut(state).ok_or(Error::IndexOutOfRange {
            index: state,
            num_states,
        })?;
        *count += 1;
        Ok(*count)
    }

    pub fn get(&self, state: usize) -> u64 {
        self.counts.get(state).copied().unwrap_or(0)
    }

    /// Number of states seen at least once
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }
}

/// How many times each action was taken from each state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoiceCounts {
    /// Row-major `num_states x num_actions` counts
    counts: Vec<u64>,
    num_actions: usize,
}

impl ChoiceCounts {
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            counts: vec![0; num_states * num_actions],
            num_actions,
        }
    }

    fn num_states(&self) -> usize {
        self.counts.len().checked_div(self.num_actions).unwrap_or(0)
    }

    pub fn row(&self, state: usize) -> Result<&[u64]> {
        if state >= self.num_states() {
            return Err(Error::IndexOutOfRange {
                index: state,
                num_states: self.num_states(),
            });
        }
        let start = state * self.num_actions;
        Ok(&self.counts[start..start + self.num_actions])
    }

    pub fn get(&self, state: usize, action: usize) -> u64 {
        self.row(state)
            .ok()
            .and_then(|row| row.get(action).copied())
            .unwrap_or(0)
    }

    /// Record one choice of `action` in `state`, returning the new count.
    pub fn increment(&mut self, state: usize, action: usize) -> Result<u64> {
        if action >= self.num_actions {
            return Err(Error::InvalidAction {
                index: action,
                num_actions: self.num_actions,
            });
        }
        self.row(state)?;
        let count = &mut self.counts[state * self.num_actions + action];
        *count += 1;
        Ok(*count)
    }

    /// Number of state-action pairs tried at least once
    pub fn distinct_pairs(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
