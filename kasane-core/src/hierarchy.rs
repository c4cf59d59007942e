//! Collaborator interface between the merger and the multilevel hierarchy.
//!
//! The merger never touches graph storage directly. Every read goes through
//! the query methods below and every mutation goes through the three merge
//! steps, so alternative hierarchies (for instance one that also tracks
//! layout positions) can be coarsened by the same merger.

use crate::merge_record::NodeMerge;

/// A live edge as seen by the merger.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    id: usize,
    source: usize,
    target: usize,
}

impl Edge {
    /// Creates an edge view.
    #[must_use]
    pub const fn new(id: usize, source: usize, target: usize) -> Self {
        Self { id, source, target }
    }

    /// Returns the stable edge id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> usize { self.id }

    /// Returns the source endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the target endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }
}

/// A graph hierarchy the merger can coarsen one level at a time.
///
/// Node ids are stable indices below [`Hierarchy::node_bound`]; an id is never
/// reissued once its node has been contracted away.
pub trait Hierarchy {
    /// Returns the number of live nodes.
    fn node_count(&self) -> usize;

    /// Returns one past the largest node id ever issued.
    fn node_bound(&self) -> usize;

    /// Returns the current level, `0` before any merge has been accepted.
    fn level(&self) -> usize;

    /// Returns a snapshot of all live edges.
    fn edges(&self) -> Vec<Edge>;

    /// Returns the adjacency-list size of `node`, counting parallel edges.
    /// Nodes that are not live have degree `0`.
    fn degree(&self, node: usize) -> usize;

    /// Iterates the opposite endpoint of every adjacency entry of `node`.
    fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> + '_;

    /// Returns `true` while `node` is present in the graph.
    fn is_live(&self, node: usize) -> bool;

    /// Returns the current radius of `node`.
    fn radius(&self, node: usize) -> f64;

    /// Reports externally known articulation points. The default knows none.
    fn is_cut_vertex(&self, _node: usize) -> bool {
        false
    }

    /// Prepares `parent` to absorb `candidate`, recording the parent's prior
    /// state in `merge`. Must succeed for two distinct live nodes.
    fn substitute_node(
        &mut self,
        merge: &mut NodeMerge,
        parent: usize,
        radius: f64,
        candidate: usize,
    ) -> bool;

    /// Moves every edge incident to `candidate` onto `parent`.
    fn reassign_edges(
        &mut self,
        merge: &mut NodeMerge,
        candidate: usize,
        parent: usize,
        adjust_lengths: bool,
    );

    /// Completes the merge and removes `candidate`. Takes ownership of the
    /// record on success; returns `false` and drops it otherwise.
    fn finalize_merge(&mut self, merge: NodeMerge, candidate: usize) -> bool;
}
