//! `adsim`: seedable multi-armed bandit simulation for ad selection.
//!
//! Designed for "which ad do I show next" problems: you have a small set of
//! arms (ads, creatives, or anything else you present repeatedly to a
//! stream of independent users) and each presentation yields a binary reward
//! (click / no-click) drawn from an unknown, arm-specific probability.
//! `adsim` tracks per-arm counts, selects the next arm to present, and at the
//! end of a run reports its best estimate of the highest-paying arm.
//!
//! **Goals:**
//! - **Deterministic by default**: every stochastic component is seedable,
//!   and default construction uses a fixed seed, so same seeds + same reward
//!   stream → same trial history.
//! - **Single-writer statistics**: all mutable per-arm state lives in one
//!   [`ArmTable`] owned by the [`Simulator`]; policies only read it.
//! - **Small d**: designed for a handful of arms (2–10 ads); not intended
//!   for d in the thousands.
//!
//! **Selection policies:**
//! - [`PosteriorSampling`]: Thompson sampling; draw one Beta posterior
//!   sample per arm, present the argmax.
//! - [`ConfidenceBound`]: UCB; present the arm maximizing empirical mean
//!   plus an uncertainty bonus that shrinks with observations.
//! - [`SelectionPolicy`]: the common `select` trait over both; the
//!   [`Simulator`] is generic over it, so adding a policy (e.g.
//!   epsilon-greedy) requires no simulator changes.
//!
//! **Reward sources:**
//! - [`BernoulliArms`]: per-arm true click probabilities, seeded draws.
//! - [`RewardTable`]: a precomputed per-trial-per-arm outcome table
//!   (dataset-backed replay).
//!
//! **Non-goals:**
//! - Not a contextual bandit (no per-trial feature vectors).
//! - No non-stationary drift detection; counts are lifetime, not windowed.
//! - No parallel trial execution: trials form a strict total order, and each
//!   selection depends on the exact statistics left by all prior trials.
//!
//! # Example
//!
//! ```rust
//! use adsim::{BernoulliArms, PosteriorConfig, PosteriorSampling, Report, Simulator};
//!
//! // Three ads with unknown (to the policy) click probabilities.
//! let mut ads = BernoulliArms::with_seed(&[0.04, 0.11, 0.19], 7).unwrap();
//! let mut policy = PosteriorSampling::with_seed(PosteriorConfig::default(), 7);
//!
//! let mut sim = Simulator::new(3);
//! let result = sim.run(2_000, &mut policy, &mut ads).unwrap();
//!
//! println!("{}", Report::new(&result));
//! assert!(result.best_arm < 3);
//! ```
//!
//! # Background
//!
//! Thompson sampling dates to Thompson (1933); its Beta-Bernoulli form used
//! here is the standard analysis setting (Agrawal & Goyal 2012,
//! arXiv:1111.1797).  The confidence-bound policy is the UCB1 family of
//! Auer, Cesa-Bianchi & Fischer (2002), with the `sqrt(c * ln(t) / n)`
//! bonus and `c = 3/2`.  Both policies see only accumulated counts, so the
//! exploration/exploitation trade-off is carried entirely by the
//! [`ArmStats`] table.

#![forbid(unsafe_code)]

/// Epsilon used for floating-point tie-breaking in selection scoring.
///
/// This avoids exact equality comparisons on f64 scores and provides a stable
/// threshold across all selection paths (posterior samples, UCB scores,
/// best-arm reduction).  Scores within this epsilon are treated as tied, and
/// ties resolve to the lowest arm index.
const TIEBREAK_EPS: f64 = 1e-12;

mod decision;
pub use decision::*;

mod error;
pub use error::*;

mod policy;
pub use policy::*;

mod thompson;
pub use thompson::*;

mod ucb;
pub use ucb::*;

mod reward;
pub use reward::*;

mod simulator;
pub use simulator::*;

mod report;
pub use report::*;

/// Running counters for one arm.
///
/// Initialized to all zeros at simulation start and mutated exactly once per
/// trial (the chosen arm only), via [`ArmTable::record`].  The tally
/// invariant `successes + failures == pulls` holds at every trial boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmStats {
    /// Number of times this arm has been selected.
    pub pulls: u64,
    /// Number of trials that yielded reward 1.
    pub successes: u64,
    /// Number of trials that yielded reward 0.
    pub failures: u64,
    /// Sum of rewards received.  Equals `successes` for binary rewards;
    /// kept as a separate sum so the counters stay general.
    pub cumulative_reward: f64,
}

impl ArmStats {
    /// Observed click-through rate, or `None` when the arm has never been
    /// pulled (the mean is undefined, not zero).
    pub fn empirical_mean(&self) -> Option<f64> {
        if self.pulls == 0 {
            None
        } else {
            Some(self.cumulative_reward / self.pulls as f64)
        }
    }
}

/// The per-arm statistics table: one [`ArmStats`] per arm, indexed by the
/// arm's stable index in `[0, d)`.
///
/// Owned exclusively by the [`Simulator`]; [`ArmTable::record`] is the only
/// mutation path, which keeps a clear single-writer invariant.  Policies
/// receive the table contents as a `&[ArmStats]` and must not retain them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmTable {
    arms: Vec<ArmStats>,
}

impl ArmTable {
    /// Create a table of `d` arms, all counters zero.
    pub fn new(d: usize) -> Self {
        Self {
            arms: vec![ArmStats::default(); d],
        }
    }

    /// Number of arms.
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    /// Whether the table has no arms.
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// The per-arm statistics, in arm-index order.
    pub fn arms(&self) -> &[ArmStats] {
        &self.arms
    }

    /// Statistics for one arm.
    pub fn get(&self, arm: usize) -> Result<&ArmStats, SimError> {
        self.arms.get(arm).ok_or(SimError::UnknownArm {
            arm,
            arms: self.arms.len(),
        })
    }

    /// Observed click-through rate for one arm.
    ///
    /// Errors with [`SimError::UndefinedStatistic`] when the arm has zero
    /// pulls; use [`ArmStats::empirical_mean`] for the `Option` form.
    pub fn empirical_mean(&self, arm: usize) -> Result<f64, SimError> {
        self.get(arm)?
            .empirical_mean()
            .ok_or(SimError::UndefinedStatistic { arm })
    }

    /// Total pulls across all arms.  Equals the number of trials executed so
    /// far in the owning simulation.
    pub fn total_pulls(&self) -> u64 {
        self.arms.iter().map(|a| a.pulls).sum()
    }

    /// Record the outcome of one trial: increment `pulls`, add `reward` to
    /// `cumulative_reward`, and bump `successes` or `failures`.
    ///
    /// The binary-reward contract is enforced strictly: any reward other
    /// than exactly `0.0` or `1.0` is rejected with
    /// [`SimError::InvalidReward`] and leaves the table untouched.
    pub fn record(&mut self, arm: usize, reward: f64) -> Result<(), SimError> {
        let arms = self.arms.len();
        let stats = self
            .arms
            .get_mut(arm)
            .ok_or(SimError::UnknownArm { arm, arms })?;
        if reward != 0.0 && reward != 1.0 {
            return Err(SimError::InvalidReward { arm, reward });
        }
        stats.pulls += 1;
        stats.cumulative_reward += reward;
        if reward == 1.0 {
            stats.successes += 1;
        } else {
            stats.failures += 1;
        }
        Ok(())
    }

    /// Zero every counter (all arms).
    pub fn reset(&mut self) {
        for a in &mut self.arms {
            *a = ArmStats::default();
        }
    }
}
