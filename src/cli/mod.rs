//! CLI infrastructure for the cat-and-mouse learner
//!
//! This module provides the command-line interface for training a learner and
//! inspecting the state encoding.

pub mod commands;
pub mod output;
