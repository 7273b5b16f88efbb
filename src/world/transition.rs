//! Grid dynamics: one simultaneous move of mouse and cat

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{
    action::Delta,
    state::{GridDims, Point, State},
};

/// How the cat moves each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CatMotion {
    /// Uniformly random over the nine offsets, staying included
    #[default]
    Random,
    /// The same offset every step
    Fixed { delta: Delta },
}

impl CatMotion {
    /// Cat offset to hand to [`TransitionModel::apply`]; `None` means "sample one".
    pub fn delta(&self) -> Option<Delta> {
        match self {
            CatMotion::Random => None,
            CatMotion::Fixed { delta } => Some(*delta),
        }
    }
}

/// Deterministic clamped movement plus the cat's random draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionModel {
    dims: GridDims,
}

impl TransitionModel {
    pub fn new(dims: GridDims) -> Self {
        Self { dims }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Move both animals by one step.
    ///
    /// When `cat` is `None` the cat's offset is drawn uniformly from `rng`.
    /// Moves that would leave the grid leave that coordinate unchanged.
    pub fn apply(
        &self,
        state: State,
        mouse: Delta,
        cat: Option<Delta>,
        rng: &mut dyn RngCore,
    ) -> State {
        let cat = cat.unwrap_or_else(|| Delta::random(rng));
        State {
            mouse: self.shift(state.mouse, mouse),
            cat: self.shift(state.cat, cat),
        }
    }

    fn shift(&self, point: Point, delta: Delta) -> Point {
        Point {
            x: clamp_axis(point.x, delta.dx, self.dims.width()),
            y: clamp_axis(point.y, delta.dy, self.dims.height()),
        }
    }
}

fn clamp_axis(coord: usize, delta: i8, size: usize) -> usize {
    match delta {
        d if d < 0 => coord.saturating_sub(d.unsigned_abs() as usize),
        d => (coord + d as usize).min(size - 1),
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::world::action::{Action, NUM_ACTIONS};

    fn model(width: usize, height: usize) -> TransitionModel {
        TransitionModel::new(GridDims::new(width, height).unwrap())
    }

    #[test]
    fn test_lower_corner_clamps() {
        let mut rng = StdRng::seed_from_u64(0);
        let next = model(5, 5).apply(
            State::new(0, 0, 0, 0),
            Delta { dx: -1, dy: -1 },
            Some(Delta::STAY),
            &mut rng,
        );
        assert_eq!(next, State::new(0, 0, 0, 0));
    }

    #[test]
    fn test_upper_corner_clamps() {
        let mut rng = StdRng::seed_from_u64(0);
        let next = model(4, 3).apply(
            State::new(3, 2, 0, 0),
            Delta { dx: 1, dy: 1 },
            Some(Delta::STAY),
            &mut rng,
        );
        assert_eq!(next, State::new(3, 2, 0, 0));
    }

    #[test]
    fn test_axes_clamp_independently() {
        let mut rng = StdRng::seed_from_u64(0);
        let next = model(4, 3).apply(
            State::new(3, 1, 0, 2),
            Delta { dx: 1, dy: -1 },
            Some(Delta { dx: -1, dy: 1 }),
            &mut rng,
        );
        assert_eq!(next, State::new(3, 0, 0, 2));
    }

    #[test]
    fn test_random_cat_stays_adjacent_and_on_grid() {
        let model = model(3, 3);
        let mut rng = StdRng::seed_from_u64(17);
        let start = State::new(1, 1, 1, 1);
        let mut seen = [false; NUM_ACTIONS];
        for _ in 0..1000 {
            let next = model.apply(start, Delta::STAY, None, &mut rng);
            assert_eq!(next.mouse, start.mouse);
            let dx = next.cat.x as i8 - 1;
            let dy = next.cat.y as i8 - 1;
            seen[Action::from_delta(Delta { dx, dy }).index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "every cat move should occur");
    }

    #[test]
    fn test_fixed_cat_motion() {
        let delta = Delta { dx: 1, dy: 0 };
        assert_eq!(CatMotion::Fixed { delta }.delta(), Some(delta));
        assert_eq!(CatMotion::Random.delta(), None);
    }
}
