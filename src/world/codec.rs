//! Mixed-radix mapping between states and dense indices
//!
//! The four coordinates are treated as digits of a number whose radices are
//! `[width, height, width, height]`, least significant first. On a 10x10 grid
//! this is plain base 10 with the digits reversed: `(1, 0, 0, 0)` is index 1 and
//! `(0, 0, 0, 1)` is index 1000.

use super::state::{GridDims, State};
use crate::{Error, Result};

/// Bijection between valid states and `[0, num_states)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCodec {
    dims: GridDims,
    num_states: usize,
}

impl StateCodec {
    /// Create a codec for the given grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `(width * height)^2` does not fit in `usize`.
    pub fn new(dims: GridDims) -> Result<Self> {
        let cells = dims.cells();
        let num_states = cells
            .checked_mul(cells)
            .ok_or_else(|| Error::InvalidConfiguration {
                message: format!("grid {dims} has too many states to index"),
            })?;
        Ok(Self { dims, num_states })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// `N = (width * height)^2`
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    fn radices(&self) -> [usize; 4] {
        let (w, h) = (self.dims.width(), self.dims.height());
        [w, h, w, h]
    }

    /// Map a state to its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfBounds`] if any coordinate is off the grid.
    pub fn encode(&self, state: &State) -> Result<usize> {
        state.check_bounds(self.dims)?;
        let mut index = 0;
        let mut base = 1;
        for (digit, radix) in state.axes().into_iter().zip(self.radices()) {
            index += digit * base;
            base *= radix;
        }
        Ok(index)
    }

    /// Map an index back to its state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= num_states`.
    pub fn decode(&self, index: usize) -> Result<State> {
        if index >= self.num_states {
            return Err(Error::IndexOutOfRange {
                index,
                num_states: self.num_states,
            });
        }
        let mut rest = index;
        let mut axes = [0; 4];
        for (axis, radix) in axes.iter_mut().zip(self.radices()) {
            *axis = rest % radix;
            rest /= radix;
        }
        Ok(State::from_axes(axes))
    }

    /// Every valid state in index order
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        (0..self.num_states).filter_map(|index| self.decode(index).ok())
    }
}
