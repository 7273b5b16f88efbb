//! Export functionality for analysis and plotting
//!
//! Currently supports CSV export of averaged reward curves.

mod reward_csv;

pub use reward_csv::{read_curve_csv, write_curve_csv};
