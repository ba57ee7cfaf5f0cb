//! Unified `SelectionPolicy` trait for arm-selection strategies.
//!
//! [`PosteriorSampling`] and [`ConfidenceBound`] share the same one-method
//! interface: `select(stats, trial_number) -> Selection`.  This trait makes
//! that explicit and lets the [`Simulator`][crate::Simulator] drive either
//! policy (or a future one, e.g. epsilon-greedy) without code changes.
//!
//! A policy is a pure function of the supplied statistics and trial number:
//! it must not retain or mutate arm state.  The `&mut self` receiver exists
//! only for the policy's own random-number stream.

use crate::{ArmStats, Selection};

/// Which per-arm quantity declares the "best" arm when a run completes.
///
/// The two policies track quality differently, so each declares its own
/// convention: posterior sampling judges by raw accumulated reward,
/// confidence-bound by observed average.  The two can disagree when pull
/// counts differ across arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BestArmMetric {
    /// Argmax of `cumulative_reward` (posterior-sampling convention).
    CumulativeReward,
    /// Argmax of `empirical_mean` (confidence-bound convention).
    EmpiricalMean,
}

/// Common interface for arm-selection policies.
///
/// # Example
///
/// ```rust
/// use adsim::{
///     ArmTable, ConfidenceBound, ConfidenceConfig, PosteriorConfig, PosteriorSampling,
///     SelectionPolicy,
/// };
///
/// fn first_pick<P: SelectionPolicy>(policy: &mut P) -> usize {
///     let table = ArmTable::new(3);
///     policy.select(table.arms(), 1).chosen
/// }
///
/// let mut ts = PosteriorSampling::with_seed(PosteriorConfig::default(), 0);
/// let mut cb = ConfidenceBound::new(ConfidenceConfig::default());
/// assert!(first_pick(&mut ts) < 3);
/// assert_eq!(first_pick(&mut cb), 0);
/// ```
pub trait SelectionPolicy {
    /// Select the arm to present on this trial.
    ///
    /// `stats` is the current per-arm table in arm-index order and must be
    /// non-empty (the simulator guarantees this).  `trial_number` is the
    /// 1-based count of trials executed so far, including the one being
    /// decided.
    fn select(&mut self, stats: &[ArmStats], trial_number: u64) -> Selection;

    /// The best-arm convention this policy's tracking implies.
    fn metric(&self) -> BestArmMetric;
}
