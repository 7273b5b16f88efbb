//! Common test utilities for the catmouse test suite.
//!
//! Scripted policy doubles that make a learner's trajectory fully predictable.

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use catmouse::{
    Result,
    ports::{ActionSelector, LearningRateSchedule, RateContext},
};
use rand::RngCore;

/// Always picks the same action index.
pub struct FixedAction(pub usize);

impl ActionSelector for FixedAction {
    fn select(&mut self, _: u64, _: &[f64], _: &[u64], _: &mut dyn RngCore) -> usize {
        self.0
    }

    fn name(&self) -> &str {
        "fixed-action"
    }
}

/// Plays back a list of action indices, then repeats the last one.
pub struct ScriptedActions {
    script: VecDeque<usize>,
    last: usize,
}

impl ScriptedActions {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: 4,
        }
    }
}

impl ActionSelector for ScriptedActions {
    fn select(&mut self, _: u64, _: &[f64], _: &[u64], _: &mut dyn RngCore) -> usize {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// `(step, counts_before[action])` for each step-size query
pub type RateLog = Arc<Mutex<Vec<(u64, u64)>>>;

/// Returns a fixed step size and records every context it was asked about.
pub struct RecordingRate {
    rate: f64,
    seen: RateLog,
}

impl RecordingRate {
    /// The schedule plus a handle for reading its log after the learner owns it
    pub fn new(rate: f64) -> (Self, RateLog) {
        let seen = RateLog::default();
        (
            Self {
                rate,
                seen: Arc::clone(&seen),
            },
            seen,
        )
    }
}

impl LearningRateSchedule for RecordingRate {
    fn step_size(&mut self, ctx: &RateContext<'_>, _: &mut dyn RngCore) -> Result<f64> {
        self.seen
            .lock()
            .unwrap()
            .push((ctx.step, ctx.counts_before[ctx.action]));
        Ok(self.rate)
    }

    fn name(&self) -> &str {
        "recording"
    }
}
