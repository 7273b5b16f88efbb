//! The mouse's nine moves

use std::fmt;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of actions available in every state
pub const NUM_ACTIONS: usize = 9;

/// A one-step offset with components in `{-1, 0, 1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    pub dx: i8,
    pub dy: i8,
}

impl Delta {
    pub const STAY: Delta = Delta { dx: 0, dy: 0 };

    /// Create a delta, rejecting components outside `{-1, 0, 1}`.
    pub fn new(dx: i8, dy: i8) -> Result<Self> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return Err(Error::InvalidConfiguration {
                message: format!("move ({dx}, {dy}) must have components in {{-1, 0, 1}}"),
            });
        }
        Ok(Self { dx, dy })
    }

    /// Sample both components independently and uniformly from `{-1, 0, 1}`.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self {
            dx: rng.random_range(-1..=1),
            dy: rng.random_range(-1..=1),
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.dx, self.dy)
    }
}

/// Index of one of the [`NUM_ACTIONS`] mouse moves
///
/// Actions are numbered with `dx` as the outer digit and `dy` as the inner one,
/// so index `3 * (dx + 1) + (dy + 1)`. Index 4 is "stay".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action(usize);

impl Action {
    pub const STAY: Action = Action(4);

    /// Wrap an action index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] if `index >= NUM_ACTIONS`.
    pub fn new(index: usize) -> Result<Self> {
        if index < NUM_ACTIONS {
            Ok(Action(index))
        } else {
            Err(Error::InvalidAction {
                index,
                num_actions: NUM_ACTIONS,
            })
        }
    }

    /// The action that moves by `delta`
    pub fn from_delta(delta: Delta) -> Self {
        Action(3 * (delta.dx + 1) as usize + (delta.dy + 1) as usize)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn delta(&self) -> Delta {
        Delta {
            dx: (self.0 / 3) as i8 - 1,
            dy: (self.0 % 3) as i8 - 1,
        }
    }

    /// All actions in index order
    pub fn all() -> impl Iterator<Item = Action> {
        (0..NUM_ACTIONS).map(Action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.delta())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_action_order_matches_nested_offsets() {
        let mut expected = Vec::new();
        for dx in [-1, 0, 1] {
            for dy in [-1, 0, 1] {
                expected.push(Delta { dx, dy });
            }
        }
        let deltas: Vec<Delta> = Action::all().map(|a| a.delta()).collect();
        assert_eq!(deltas, expected);
    }

    #[test]
    fn test_stay_is_zero_offset() {
        assert_eq!(Action::STAY.delta(), Delta::STAY);
        assert_eq!(Action::from_delta(Delta::STAY), Action::STAY);
    }

    #[test]
    fn test_from_delta_inverts_delta() {
        for action in Action::all() {
            assert_eq!(Action::from_delta(action.delta()), action);
        }
    }

    #[test]
    fn test_invalid_action_index() {
        assert!(Action::new(8).is_ok());
        assert!(matches!(
            Action::new(9),
            Err(Error::InvalidAction { index: 9, .. })
        ));
    }

    #[test]
    fn test_random_delta_covers_all_moves() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; NUM_ACTIONS];
        for _ in 0..500 {
            let delta = Delta::random(&mut rng);
            seen[Action::from_delta(delta).index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_delta_rejects_long_moves() {
        assert!(Delta::new(2, 0).is_err());
        assert!(Delta::new(-1, 1).is_ok());
    }
}
