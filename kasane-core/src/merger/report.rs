//! Per-pass statistics.

/// Counts gathered while building one level.
///
/// # Examples
/// ```
/// use kasane_core::{Hierarchy, LocalBiconnectedMerger, MultilevelGraph};
///
/// let mut graph = MultilevelGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)])?;
/// let mut merger = LocalBiconnectedMerger::builder().build()?;
/// merger.build_one_level(&mut graph)?;
///
/// let report = merger.last_report().expect("a pass ran");
/// assert_eq!(report.level(), 1);
/// assert_eq!(report.initial_nodes(), 5);
/// assert_eq!(report.final_nodes(), graph.node_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelReport {
    level: usize,
    initial_nodes: usize,
    final_nodes: usize,
    matching_edges: usize,
    cover_edges: usize,
    contractions: usize,
    feasibility_rejections: usize,
    finalize_failures: usize,
    skipped: usize,
}

impl LevelReport {
    pub(crate) fn new(level: usize, initial_nodes: usize) -> Self {
        Self {
            level,
            initial_nodes,
            final_nodes: initial_nodes,
            ..Self::default()
        }
    }

    pub(crate) fn set_pools(&mut self, matching_edges: usize, cover_edges: usize) {
        self.matching_edges = matching_edges;
        self.cover_edges = cover_edges;
    }

    pub(crate) fn record_contraction(&mut self) {
        self.contractions += 1;
    }

    pub(crate) fn record_rejection(&mut self) {
        self.feasibility_rejections += 1;
    }

    pub(crate) fn record_finalize_failure(&mut self) {
        self.finalize_failures += 1;
    }

    pub(crate) fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub(crate) fn finish(&mut self, final_nodes: usize) {
        self.final_nodes = final_nodes;
    }

    /// Returns the level this pass built.
    #[must_use]
    #[rustfmt::skip]
    pub fn level(&self) -> usize { self.level }

    /// Returns the live node count before the pass.
    #[must_use]
    #[rustfmt::skip]
    pub fn initial_nodes(&self) -> usize { self.initial_nodes }

    /// Returns the live node count after the pass.
    #[must_use]
    #[rustfmt::skip]
    pub fn final_nodes(&self) -> usize { self.final_nodes }

    /// Returns the size of the matching pool when it was built.
    #[must_use]
    #[rustfmt::skip]
    pub fn matching_edges(&self) -> usize { self.matching_edges }

    /// Returns the size of the cover pool when it was built.
    #[must_use]
    #[rustfmt::skip]
    pub fn cover_edges(&self) -> usize { self.cover_edges }

    /// Returns the number of accepted contractions.
    #[must_use]
    #[rustfmt::skip]
    pub fn contractions(&self) -> usize { self.contractions }

    /// Returns the number of pairs the feasibility check turned down.
    #[must_use]
    #[rustfmt::skip]
    pub fn feasibility_rejections(&self) -> usize { self.feasibility_rejections }

    /// Returns the number of contractions the hierarchy refused to finalise.
    #[must_use]
    #[rustfmt::skip]
    pub fn finalize_failures(&self) -> usize { self.finalize_failures }

    /// Returns the number of drawn edges whose endpoints had already collapsed
    /// or disappeared.
    #[must_use]
    #[rustfmt::skip]
    pub fn skipped(&self) -> usize { self.skipped }
}
