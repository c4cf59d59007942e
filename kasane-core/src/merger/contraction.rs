//! Feasibility-gated contraction of a single node pair.

use tracing::debug;

use crate::{error::MergerError, hierarchy::Hierarchy, merge_record::NodeMerge};

use super::{LocalBiconnectedMerger, feasibility, report::LevelReport};

/// Result of one contraction attempt inside a pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MergeOutcome {
    Contracted,
    Rejected,
    FinalizeFailed,
}

impl MergeOutcome {
    /// The boolean the attempt reports to the level loop. A rejected pair
    /// counts as success because nothing was attempted.
    pub(crate) fn as_flag(self) -> bool {
        !matches!(self, Self::FinalizeFailed)
    }

    pub(crate) fn record(self, report: &mut LevelReport) {
        match self {
            Self::Contracted => report.record_contraction(),
            Self::Rejected => report.record_rejection(),
            Self::FinalizeFailed => report.record_finalize_failure(),
        }
        record_outcome_metric(self);
    }
}

impl LocalBiconnectedMerger {
    /// Returns `true` when contracting `candidate` into `parent` keeps the
    /// pair's neighbourhood locally biconnected.
    ///
    /// The check is deterministic for a fixed graph and cut-flag state. Cut
    /// flags are those of the current (or most recent) pass.
    ///
    /// # Examples
    /// ```
    /// use kasane_core::{LocalBiconnectedMerger, MultilevelGraph};
    ///
    /// // Two triangles sharing the edge 0-1 would collapse into a bowtie.
    /// let graph = MultilevelGraph::from_edges(
    ///     6,
    ///     &[(0, 1), (0, 2), (0, 3), (2, 3), (1, 4), (1, 5), (4, 5)],
    /// )?;
    /// let mut merger = LocalBiconnectedMerger::builder().build()?;
    /// assert!(!merger.can_merge(&graph, 0, 1));
    /// assert!(merger.can_merge(&graph, 0, 2));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn can_merge<H: Hierarchy>(&mut self, hierarchy: &H, parent: usize, candidate: usize) -> bool {
        feasibility::can_merge(
            hierarchy,
            &self.cut_flags,
            &mut self.marks,
            parent,
            candidate,
        )
    }

    /// Contracts the pair when [`Self::can_merge`] accepts it.
    ///
    /// Returns `Ok(true)` without touching the hierarchy when the pair is
    /// rejected, and otherwise the result of [`Self::do_merge`].
    ///
    /// # Errors
    /// Propagates [`MergerError::SubstitutionRejected`] from
    /// [`Self::do_merge`].
    pub fn do_merge_if_possible<H: Hierarchy>(
        &mut self,
        hierarchy: &mut H,
        parent: usize,
        candidate: usize,
        level: usize,
    ) -> Result<bool, MergerError> {
        self.attempt_merge(hierarchy, parent, candidate, level)
            .map(MergeOutcome::as_flag)
    }

    /// Contracts `candidate` into `parent` unconditionally.
    ///
    /// Returns `Ok(false)` when the hierarchy refuses to finalise the merge.
    /// Edges already moved by that point stay where the hierarchy left them.
    ///
    /// # Errors
    /// Returns [`MergerError::SubstitutionRejected`] when the hierarchy
    /// refuses to substitute the pair. The hierarchy is left untouched.
    pub fn do_merge<H: Hierarchy>(
        &mut self,
        hierarchy: &mut H,
        parent: usize,
        candidate: usize,
        level: usize,
    ) -> Result<bool, MergerError> {
        let mut merge = NodeMerge::new(level);
        let radius = hierarchy.radius(parent);
        if !hierarchy.substitute_node(&mut merge, parent, radius, candidate) {
            return Err(MergerError::SubstitutionRejected { parent, candidate });
        }
        hierarchy.reassign_edges(&mut merge, candidate, parent, self.adjust_edge_lengths);

        if !hierarchy.finalize_merge(merge, candidate) {
            debug!(parent, candidate, level, "hierarchy refused to finalize merge");
            return Ok(false);
        }

        self.substitutes.record(candidate, parent);
        self.cut_flags.propagate(candidate, parent);
        Ok(true)
    }

    pub(super) fn attempt_merge<H: Hierarchy>(
        &mut self,
        hierarchy: &mut H,
        parent: usize,
        candidate: usize,
        level: usize,
    ) -> Result<MergeOutcome, MergerError> {
        if !self.can_merge(&*hierarchy, parent, candidate) {
            debug!(parent, candidate, "contraction would break local biconnectivity");
            return Ok(MergeOutcome::Rejected);
        }
        if self.do_merge(hierarchy, parent, candidate, level)? {
            Ok(MergeOutcome::Contracted)
        } else {
            Ok(MergeOutcome::FinalizeFailed)
        }
    }
}

#[cfg(feature = "metrics")]
fn record_outcome_metric(outcome: MergeOutcome) {
    let name = match outcome {
        MergeOutcome::Contracted => "kasane_contractions_total",
        MergeOutcome::Rejected => "kasane_feasibility_rejections_total",
        MergeOutcome::FinalizeFailed => "kasane_finalize_failures_total",
    };
    metrics::counter!(name).increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_outcome_metric(_outcome: MergeOutcome) {}
