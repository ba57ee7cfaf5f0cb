//! Upper-confidence-bound (UCB) arm selection.
//!
//! Scores each arm as `empirical_mean + sqrt(c * ln(trial_number) / pulls)`
//! and presents the argmax.  An arm that has never been pulled outranks any
//! finite score, which forces one full pass over all arms in index order
//! before any arm is pulled twice (a correctness requirement, not an
//! approximation).
//!
//! Notes:
//! - Fully deterministic: same stats + trial number → same choice.  No RNG.
//! - `trial_number` is 1-based (the count of trials executed so far,
//!   including the one being decided); `ln` of it is then never negative.
//! - Finite ties are possible since the score is a closed formula, so the
//!   first-index tie-break is an observable, test-relevant contract.

use crate::{
    ArmStats, BestArmMetric, PolicyKind, Selection, SelectionNote, SelectionPolicy, TIEBREAK_EPS,
};

/// Configuration for confidence-bound selection.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceConfig {
    /// Coefficient `c` inside the exploration bonus `sqrt(c * ln(t) / n)`.
    ///
    /// The default is `3/2`, the classic UCB1 tuning.  Larger values explore
    /// under-sampled arms longer.
    pub exploration: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self { exploration: 1.5 }
    }
}

/// Deterministic UCB policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceBound {
    cfg: ConfidenceConfig,
}

impl ConfidenceBound {
    /// Create a confidence-bound policy.
    ///
    /// A non-finite or non-positive exploration coefficient is replaced with
    /// the default `3/2`.
    pub fn new(mut cfg: ConfidenceConfig) -> Self {
        if !(cfg.exploration.is_finite() && cfg.exploration > 0.0) {
            cfg.exploration = ConfidenceConfig::default().exploration;
        }
        Self { cfg }
    }

    /// The exploration coefficient in use.
    pub fn config(&self) -> ConfidenceConfig {
        self.cfg
    }

    /// The finite UCB score for an arm with at least one pull.
    ///
    /// Holding `pulls` and `successes` fixed, this is non-decreasing in
    /// `trial_number`.
    pub fn score(&self, stats: &ArmStats, trial_number: u64) -> Option<f64> {
        let mean = stats.empirical_mean()?;
        // Trial numbering starts at 1; ln(0) is undefined.
        let t = trial_number.max(1) as f64;
        Some(mean + (self.cfg.exploration * t.ln() / stats.pulls as f64).sqrt())
    }
}

impl SelectionPolicy for ConfidenceBound {
    /// Two-phase selection.
    ///
    /// The first phase handles unpulled arms (their bound is positive
    /// infinity; the lowest such index wins).  The second phase computes the
    /// finite scores and takes the argmax, first index winning ties within
    /// [`TIEBREAK_EPS`].
    fn select(&mut self, stats: &[ArmStats], trial_number: u64) -> Selection {
        for (i, s) in stats.iter().enumerate() {
            if s.pulls == 0 {
                return Selection {
                    policy: PolicyKind::ConfidenceBound,
                    chosen: i,
                    note: SelectionNote::ExploreFirst,
                };
            }
        }

        let mut chosen = 0usize;
        let mut best = f64::NEG_INFINITY;
        for (i, s) in stats.iter().enumerate() {
            // Every arm has pulls > 0 here, so the score is defined.
            let Some(score) = self.score(s, trial_number) else {
                continue;
            };
            if score > best + TIEBREAK_EPS {
                best = score;
                chosen = i;
            }
        }
        Selection {
            policy: PolicyKind::ConfidenceBound,
            chosen,
            note: SelectionNote::DeterministicChoice,
        }
    }

    fn metric(&self) -> BestArmMetric {
        BestArmMetric::EmpiricalMean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArmTable;

    fn stats(pulls: u64, successes: u64) -> ArmStats {
        ArmStats {
            pulls,
            successes,
            failures: pulls - successes,
            cumulative_reward: successes as f64,
        }
    }

    #[test]
    fn unpulled_arms_selected_in_index_order() {
        let mut cb = ConfidenceBound::new(ConfidenceConfig::default());
        let mut table = ArmTable::new(4);
        for trial in 1..=4u64 {
            let s = cb.select(table.arms(), trial);
            assert_eq!(s.chosen as u64, trial - 1);
            assert_eq!(s.note, SelectionNote::ExploreFirst);
            table.record(s.chosen, 0.0).unwrap();
        }
        // All arms pulled once: the fifth selection is a finite-score argmax.
        let s = cb.select(table.arms(), 5);
        assert_eq!(s.note, SelectionNote::DeterministicChoice);
    }

    #[test]
    fn score_is_monotonic_in_trial_number() {
        let cb = ConfidenceBound::new(ConfidenceConfig::default());
        let s = stats(10, 4);
        let mut prev = f64::NEG_INFINITY;
        for t in 1..=1000u64 {
            let score = cb.score(&s, t).unwrap();
            assert!(score >= prev, "t={t} score={score} prev={prev}");
            prev = score;
        }
    }

    #[test]
    fn score_undefined_at_zero_pulls() {
        let cb = ConfidenceBound::default();
        assert!(cb.score(&ArmStats::default(), 10).is_none());
    }

    #[test]
    fn exact_tie_goes_to_lowest_index() {
        let mut cb = ConfidenceBound::new(ConfidenceConfig::default());
        // Identical counts on every arm → identical scores.
        let arms = vec![stats(5, 2), stats(5, 2), stats(5, 2)];
        assert_eq!(cb.select(&arms, 16).chosen, 0);
    }

    #[test]
    fn higher_mean_wins_at_equal_pulls() {
        let mut cb = ConfidenceBound::new(ConfidenceConfig::default());
        let arms = vec![stats(20, 5), stats(20, 15), stats(20, 10)];
        assert_eq!(cb.select(&arms, 61).chosen, 1);
    }

    #[test]
    fn under_sampled_arm_gets_exploration_bonus() {
        let mut cb = ConfidenceBound::new(ConfidenceConfig::default());
        // Arm 1 has a slightly lower mean but far fewer pulls; the bonus
        // should overcome the gap at a late trial number.
        let arms = vec![stats(900, 450), stats(4, 1)];
        assert_eq!(cb.select(&arms, 905).chosen, 1);
    }

    #[test]
    fn invalid_exploration_coefficient_is_replaced() {
        let cb = ConfidenceBound::new(ConfidenceConfig { exploration: -1.0 });
        assert_eq!(cb.config().exploration, 1.5);
    }

    #[test]
    fn deterministic_across_instances() {
        let mut c1 = ConfidenceBound::new(ConfidenceConfig::default());
        let mut c2 = ConfidenceBound::new(ConfidenceConfig::default());
        let arms = vec![stats(7, 3), stats(9, 4), stats(11, 6)];
        for t in 28..=60u64 {
            assert_eq!(c1.select(&arms, t), c2.select(&arms, t));
        }
    }
}
