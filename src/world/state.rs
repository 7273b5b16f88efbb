//! Grid dimensions and the four-coordinate world state

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Width and height of the rectangular grid
///
/// Both dimensions are at least 1. The grid need not be square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGridDims")]
pub struct GridDims {
    width: usize,
    height: usize,
}

#[derive(Deserialize)]
struct RawGridDims {
    width: usize,
    height: usize,
}

impl TryFrom<RawGridDims> for GridDims {
    type Error = Error;

    fn try_from(raw: RawGridDims) -> Result<Self> {
        GridDims::new(raw.width, raw.height)
    }
}

impl GridDims {
    /// Create grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidDimension {
                axis: "width",
                value: width,
            });
        }
        if height == 0 {
            return Err(Error::InvalidDimension {
                axis: "height",
                value: height,
            });
        }
        if width.checked_mul(height).is_none() {
            return Err(Error::InvalidConfiguration {
                message: format!("grid {width}x{height} has too many cells"),
            });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells on the grid
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Whether a point lies on the grid
    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    /// Plot extents `([-1, width], [-1, height])` with a one-cell margin
    pub fn plot_bounds(&self) -> ((i64, i64), (i64, i64)) {
        ((-1, self.width as i64), (-1, self.height as i64))
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A cell position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Positions of the mouse (the learning agent) and the cat (the adversary)
///
/// States are immutable values: every transition produces a new `State`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub mouse: Point,
    pub cat: Point,
}

impl State {
    /// Build a state from `(mouse_x, mouse_y, cat_x, cat_y)`.
    pub const fn new(mx: usize, my: usize, cx: usize, cy: usize) -> Self {
        Self {
            mouse: Point::new(mx, my),
            cat: Point::new(cx, cy),
        }
    }

    /// Coordinates in codec axis order `[mouse_x, mouse_y, cat_x, cat_y]`
    pub fn axes(&self) -> [usize; 4] {
        [self.mouse.x, self.mouse.y, self.cat.x, self.cat.y]
    }

    pub fn from_axes(axes: [usize; 4]) -> Self {
        Self::new(axes[0], axes[1], axes[2], axes[3])
    }

    /// The same positions with mouse and cat swapped
    pub fn swapped(&self) -> Self {
        Self {
            mouse: self.cat,
            cat: self.mouse,
        }
    }

    /// Validate every coordinate against the grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfBounds`] naming the first offending axis.
    pub fn check_bounds(&self, dims: GridDims) -> Result<()> {
        const AXES: [&str; 4] = ["mouse_x", "mouse_y", "cat_x", "cat_y"];
        let bounds = [dims.width, dims.height, dims.width, dims.height];
        for ((axis, value), bound) in AXES.into_iter().zip(self.axes()).zip(bounds) {
            if value >= bound {
                return Err(Error::CoordinateOutOfBounds { axis, value, bound });
            }
        }
        Ok(())
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(0, 0, 3, 0)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.mouse.x, self.mouse.y, self.cat.x, self.cat.y
        )
    }
}

impl FromStr for State {
    type Err = Error;

    /// Parse `"mx,my,cx,cy"` (parentheses and spaces are ignored).
    fn from_str(s: &str) -> Result<Self> {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
            .collect();
        let parts = cleaned
            .split(',')
            .map(|part| part.parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidConfiguration {
                message: format!("state '{s}' must be four non-negative integers: {e}"),
            })?;
        let axes: [usize; 4] = parts
            .try_into()
            .map_err(|parts: Vec<usize>| Error::InvalidConfiguration {
                message: format!(
                    "state '{s}' must have exactly four coordinates, got {}",
                    parts.len()
                ),
            })?;
        Ok(Self::from_axes(axes))
    }
}
