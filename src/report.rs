//! Post-run reduction: the best-arm estimate and a formatted report.
//!
//! The reducer is pure and idempotent: it reads the final statistics table
//! and never mutates it, so calling it twice on the same result returns the
//! same value.

use std::fmt;

use crate::{ArmStats, BestArmMetric, SimulationResult, TIEBREAK_EPS};

/// The arm with the highest value of `metric`, first index winning ties.
///
/// An arm with zero pulls is never selected unless every arm has zero pulls,
/// in which case the lowest index (0) is returned.  Rates are never computed
/// for unpulled arms, so no division is ever undefined here.
///
/// # Example
///
/// ```rust
/// use adsim::{best_arm, ArmStats, BestArmMetric};
///
/// let stats = [
///     ArmStats { pulls: 10, successes: 2, failures: 8, cumulative_reward: 2.0 },
///     ArmStats { pulls: 4, successes: 3, failures: 1, cumulative_reward: 3.0 },
/// ];
/// // Arm 1 has both the higher total reward and the higher average.
/// assert_eq!(best_arm(&stats, BestArmMetric::CumulativeReward), 1);
/// assert_eq!(best_arm(&stats, BestArmMetric::EmpiricalMean), 1);
/// ```
pub fn best_arm(stats: &[ArmStats], metric: BestArmMetric) -> usize {
    let mut chosen = 0usize;
    let mut best = f64::NEG_INFINITY;
    for (i, s) in stats.iter().enumerate() {
        if s.pulls == 0 {
            continue;
        }
        let value = match metric {
            BestArmMetric::CumulativeReward => s.cumulative_reward,
            // pulls > 0 here, so the mean is defined.
            BestArmMetric::EmpiricalMean => s.cumulative_reward / s.pulls as f64,
        };
        if value > best + TIEBREAK_EPS {
            best = value;
            chosen = i;
        }
    }
    chosen
}

/// Observed click-through rate with the zero-pull guard applied: an arm that
/// was never pulled reports a defined zero rate instead of dividing.
fn guarded_rate(s: &ArmStats) -> f64 {
    s.empirical_mean().unwrap_or(0.0)
}

/// Formatted summary of a completed run.
///
/// Renders the winning arm with its estimated click-through rate, per-arm
/// rows, and the total accumulated reward.  Percentage precision is
/// configurable (two decimals by default, four for validation-grade output),
/// and the true rates can be shown alongside the estimates when the
/// simulation ran against a synthetic source.
///
/// # Example
///
/// ```rust
/// use adsim::{BernoulliArms, PosteriorConfig, PosteriorSampling, Report, Simulator};
///
/// let mut ads = BernoulliArms::with_seed(&[0.1, 0.3], 1).unwrap();
/// let mut policy = PosteriorSampling::with_seed(PosteriorConfig::default(), 1);
/// let mut sim = Simulator::new(2);
/// let result = sim.run(300, &mut policy, &mut ads).unwrap();
///
/// let text = Report::new(&result)
///     .precision(4)
///     .true_probs(ads.true_probs())
///     .to_string();
/// assert!(text.contains("best arm"));
/// ```
#[derive(Debug, Clone)]
pub struct Report<'a> {
    result: &'a SimulationResult,
    precision: usize,
    true_probs: Option<&'a [f64]>,
}

impl<'a> Report<'a> {
    /// Report with two-decimal percentage precision and no true rates.
    pub fn new(result: &'a SimulationResult) -> Self {
        Self {
            result,
            precision: 2,
            true_probs: None,
        }
    }

    /// Set the percentage precision (decimal places).
    pub fn precision(mut self, decimals: usize) -> Self {
        self.precision = decimals;
        self
    }

    /// Also render each arm's true click probability, for validation.
    pub fn true_probs(mut self, probs: &'a [f64]) -> Self {
        self.true_probs = Some(probs);
        self
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.result.stats.arms();
        let winner = self.result.best_arm;
        let p = self.precision;

        let winner_rate = stats.get(winner).map(guarded_rate).unwrap_or(0.0);
        writeln!(
            f,
            "best arm: {winner} (estimated ctr {:.p$}%, judged by {})",
            winner_rate * 100.0,
            match self.result.metric {
                BestArmMetric::CumulativeReward => "cumulative reward",
                BestArmMetric::EmpiricalMean => "empirical mean",
            },
        )?;

        for (i, s) in stats.iter().enumerate() {
            write!(
                f,
                "  arm {i:>2}  pulls={:>6}  clicks={:>6}  ctr={:>8.p$}%",
                s.pulls,
                s.successes,
                guarded_rate(s) * 100.0,
            )?;
            if let Some(probs) = self.true_probs {
                if let Some(tp) = probs.get(i) {
                    write!(f, "  true={:>8.p$}%", tp * 100.0)?;
                }
            }
            writeln!(f)?;
        }

        let total_reward: f64 = stats.iter().map(|s| s.cumulative_reward).sum();
        write!(
            f,
            "total reward: {total_reward}  trials: {}",
            self.result.history.len()
        )
    }
}
