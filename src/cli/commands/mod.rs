//! Subcommands of the `catmouse` binary

pub mod inspect;
pub mod train;
