//! Unified selection envelope for policy outputs.
//!
//! A simulation wants a single, audit-friendly record of each policy decision
//! that can be:
//! - logged (debugging / monitoring)
//! - replayed (offline inspection of a finished run)
//! - consumed by the simulator without heuristics
//!
//! This module provides a small [`Selection`] struct and a typed
//! [`SelectionNote`] that policies attach to explain "why this choice
//! happened".

/// Which policy produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyKind {
    PosteriorSampling,
    ConfidenceBound,
}

/// Audit-friendly note attached to a selection.
///
/// Notes are intentionally small, typed, and stable.  Prefer adding new
/// variants over changing existing semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionNote {
    /// Policy selected an arm that had never been pulled (stable index order).
    ExploreFirst,

    /// Policy sampled per-arm posteriors and chose the max.
    SampledPosteriorMax,

    /// Policy chose deterministically (argmax with first-index tie-break).
    DeterministicChoice,
}

/// A single policy selection in a unified envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// The policy that produced this selection.
    pub policy: PolicyKind,
    /// The selected arm index.
    pub chosen: usize,
    /// Why this choice happened.
    pub note: SelectionNote,
}
