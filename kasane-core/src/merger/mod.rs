//! Biconnectivity-aware level builder.
//!
//! [`LocalBiconnectedMerger`] coarsens a [`Hierarchy`] by one level per call to
//! [`LocalBiconnectedMerger::build_one_level`]. Candidate edges come from a
//! random matching followed by a random edge cover; each drawn edge is
//! resolved through the contractions already made in the pass, oriented
//! towards its higher-degree endpoint, and contracted when a bounded
//! local search finds the pair's neighbourhood still connected without it.

mod builder;
mod contraction;
mod cut_flags;
mod feasibility;
mod marks;
mod report;
mod selection;
mod substitution;

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, info, instrument, trace};

use crate::{
    error::MergerError,
    hierarchy::Hierarchy,
};

pub use self::{builder::MergerBuilder, report::LevelReport};

use self::{
    builder::validate_shrink_factor, cut_flags::CutFlags, marks::ConnectivityMarks,
    selection::CandidatePools, substitution::SubstitutionChain,
};

/// Graphs at or below this many live nodes are not coarsened further.
pub const MIN_COARSENABLE_NODES: usize = 3;

/// Builds coarser levels while preserving local biconnectivity.
///
/// # Examples
/// ```
/// use kasane_core::{Hierarchy, LocalBiconnectedMerger, MultilevelGraph};
///
/// let mut graph = MultilevelGraph::from_edges(
///     6,
///     &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)],
/// )?;
/// let mut merger = LocalBiconnectedMerger::builder().with_rng_seed(3).build()?;
///
/// assert!(merger.build_one_level(&mut graph)?);
/// assert!(graph.node_count() <= 3);
/// assert_eq!(graph.level(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct LocalBiconnectedMerger {
    shrink_factor: f64,
    adjust_edge_lengths: bool,
    rng: SmallRng,
    substitutes: SubstitutionChain,
    cut_flags: CutFlags,
    marks: ConnectivityMarks,
    last_report: Option<LevelReport>,
}

impl LocalBiconnectedMerger {
    pub(crate) fn new(shrink_factor: f64, adjust_edge_lengths: bool, rng_seed: u64) -> Self {
        Self {
            shrink_factor,
            adjust_edge_lengths,
            rng: SmallRng::seed_from_u64(rng_seed),
            substitutes: SubstitutionChain::default(),
            cut_flags: CutFlags::default(),
            marks: ConnectivityMarks::default(),
            last_report: None,
        }
    }

    /// Returns a builder populated with default parameters.
    #[must_use]
    pub fn builder() -> MergerBuilder {
        MergerBuilder::new()
    }

    /// Returns the configured shrink factor.
    #[must_use]
    #[rustfmt::skip]
    pub fn shrink_factor(&self) -> f64 { self.shrink_factor }

    /// Returns whether moved edges absorb the collapsed edge's length.
    #[must_use]
    #[rustfmt::skip]
    pub fn adjust_edge_lengths(&self) -> bool { self.adjust_edge_lengths }

    /// Replaces the shrink factor used by subsequent passes.
    ///
    /// # Errors
    /// Returns [`MergerError::InvalidShrinkFactor`] unless `factor` is finite
    /// and greater than one. The previous factor is kept on error.
    pub fn set_shrink_factor(&mut self, factor: f64) -> Result<(), MergerError> {
        self.shrink_factor = validate_shrink_factor(factor)?;
        Ok(())
    }

    /// Returns the statistics of the most recent pass.
    #[must_use]
    pub fn last_report(&self) -> Option<&LevelReport> {
        self.last_report.as_ref()
    }

    /// Coarsens `hierarchy` by one level.
    ///
    /// Returns `Ok(true)` when the live node count dropped and the last
    /// contraction attempt of the pass succeeded. A pass whose final attempt
    /// was refused by the hierarchy reports `false` even if earlier attempts
    /// contracted nodes; consult [`Self::last_report`] for the full picture.
    ///
    /// # Errors
    /// Returns [`MergerError::SubstitutionRejected`] when the hierarchy breaks
    /// its substitution contract. The pass stops at that point.
    #[instrument(
        name = "merger.build_one_level",
        err,
        skip(self, hierarchy),
        fields(
            level = hierarchy.level() + 1,
            nodes = hierarchy.node_count(),
            shrink_factor = self.shrink_factor,
        ),
    )]
    pub fn build_one_level<H: Hierarchy>(&mut self, hierarchy: &mut H) -> Result<bool, MergerError> {
        let level = hierarchy.level() + 1;
        let initial_nodes = hierarchy.node_count();
        self.substitutes.reset(hierarchy.node_bound());
        self.cut_flags = CutFlags::from_hierarchy(&*hierarchy);
        debug!(cut_vertices = self.cut_flags.count(), "seeded cut flags");
        let mut report = LevelReport::new(level, initial_nodes);

        if initial_nodes <= MIN_COARSENABLE_NODES {
            debug!(nodes = initial_nodes, "graph is already maximally coarse");
            self.last_report = Some(report);
            return Ok(false);
        }

        let mut pools =
            CandidatePools::select(hierarchy.edges(), hierarchy.node_bound(), &mut self.rng);
        report.set_pools(pools.matching_len(), pools.cover_len());

        let node_goal = initial_nodes as f64 / self.shrink_factor;
        let mut last_attempt = false;
        while hierarchy.node_count() as f64 > node_goal {
            let Some(edge) = pools.pop(&mut self.rng) else {
                break;
            };
            let source = self.substitutes.resolve(edge.source());
            let target = self.substitutes.resolve(edge.target());
            let (parent, candidate) = orient(&*hierarchy, source, target);
            if parent == candidate || !hierarchy.is_live(parent) || !hierarchy.is_live(candidate) {
                trace!(edge = edge.id(), parent, candidate, "edge collapsed earlier in the pass");
                report.record_skip();
                continue;
            }

            let outcome = self.attempt_merge(hierarchy, parent, candidate, level)?;
            outcome.record(&mut report);
            last_attempt = outcome.as_flag();
        }

        let final_nodes = hierarchy.node_count();
        report.finish(final_nodes);
        info!(
            level,
            initial_nodes,
            final_nodes,
            contractions = report.contractions(),
            rejections = report.feasibility_rejections(),
            finalize_failures = report.finalize_failures(),
            "level built"
        );
        self.last_report = Some(report);
        Ok(final_nodes != initial_nodes && last_attempt)
    }
}

/// Returns `(parent, candidate)` for an edge whose endpoints have already
/// been resolved to live nodes: the higher-degree endpoint survives, and ties
/// keep the target.
fn orient<H: Hierarchy>(hierarchy: &H, source: usize, target: usize) -> (usize, usize) {
    if hierarchy.degree(source) > hierarchy.degree(target) {
        (source, target)
    } else {
        (target, source)
    }
}
