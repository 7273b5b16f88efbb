//! Reward trace summaries for plotting and reports

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// One point of an averaged reward curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// First time-step covered by this point
    pub step: u64,
    /// Mean reward over the points' steps
    pub mean_reward: f64,
}

/// Average a reward trace into `num_buckets` equal-width buckets.
///
/// Traces shorter than `num_buckets` are returned point by point. Longer
/// traces are trimmed to a multiple of the bucket count, dropping the most
/// recent `len % num_buckets` rewards, so every bucket has the same width.
pub fn bucket_averages(trace: &[f64], num_buckets: usize) -> Vec<CurvePoint> {
    if num_buckets == 0 || trace.len() < num_buckets {
        return trace
            .iter()
            .enumerate()
            .map(|(step, &reward)| CurvePoint {
                step: step as u64,
                mean_reward: reward,
            })
            .collect();
    }

    let width = trace.len() / num_buckets;
    trace[..width * num_buckets]
        .chunks_exact(width)
        .enumerate()
        .map(|(bucket, rewards)| CurvePoint {
            step: (bucket * width) as u64,
            mean_reward: rewards.iter().mean(),
        })
        .collect()
}

/// Descriptive statistics of a reward trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl RewardSummary {
    /// Summarize a trace; an empty trace gives all zeros.
    pub fn from_trace(trace: &[f64]) -> Self {
        if trace.is_empty() {
            return Self::default();
        }
        let std_dev = if trace.len() > 1 {
            trace.iter().std_dev()
        } else {
            0.0
        };
        Self {
            count: trace.len(),
            mean: trace.iter().mean(),
            std_dev,
            min: trace.iter().copied().fold(f64::INFINITY, f64::min),
            max: trace.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_trace_is_returned_raw() {
        let curve = bucket_averages(&[1.0, 2.0, 3.0], 20);
        assert_eq!(curve.len(), 3);
        assert_eq!(curve[2], CurvePoint { step: 2, mean_reward: 3.0 });
    }

    #[test]
    fn test_buckets_trim_the_tail() {
        // 11 rewards into 5 buckets of width 2; the last reward is dropped
        let trace: Vec<f64> = (0..11).map(f64::from).collect();
        let curve = bucket_averages(&trace, 5);
        let steps: Vec<u64> = curve.iter().map(|p| p.step).collect();
        let means: Vec<f64> = curve.iter().map(|p| p.mean_reward).collect();
        assert_eq!(steps, vec![0, 2, 4, 6, 8]);
        assert_eq!(means, vec![0.5, 2.5, 4.5, 6.5, 8.5]);
    }

    #[test]
    fn test_summary() {
        let summary = RewardSummary::from_trace(&[1.0, 3.0, 2.0, 2.0]);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert!((summary.std_dev - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_tiny_traces() {
        assert_eq!(RewardSummary::from_trace(&[]), RewardSummary::default());
        let single = RewardSummary::from_trace(&[4.0]);
        assert_eq!(single.std_dev, 0.0);
        assert_eq!(single.mean, 4.0);
    }
}
