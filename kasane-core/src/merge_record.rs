//! Node merge records describing a single contraction.
//!
//! A [`NodeMerge`] is created by the merger for every attempted contraction
//! and handed to the [`crate::Hierarchy`] collaborator, which fills in the
//! edge and radius changes it performs. Once the hierarchy accepts the merge
//! it owns the record; a rejected record is simply dropped.

/// An edge whose endpoint was moved from the absorbed node onto the survivor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChangedEdge {
    edge: usize,
    previous_source: usize,
    previous_target: usize,
    previous_length: f64,
}

impl ChangedEdge {
    /// Creates a record for `edge` with its endpoints and length prior to the move.
    #[must_use]
    pub const fn new(
        edge: usize,
        previous_source: usize,
        previous_target: usize,
        previous_length: f64,
    ) -> Self {
        Self {
            edge,
            previous_source,
            previous_target,
            previous_length,
        }
    }

    /// Returns the edge id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge(&self) -> usize { self.edge }

    /// Returns the source endpoint before the move.
    #[must_use]
    #[rustfmt::skip]
    pub const fn previous_source(&self) -> usize { self.previous_source }

    /// Returns the target endpoint before the move.
    #[must_use]
    #[rustfmt::skip]
    pub const fn previous_target(&self) -> usize { self.previous_target }

    /// Returns the edge length before the move.
    #[must_use]
    #[rustfmt::skip]
    pub const fn previous_length(&self) -> f64 { self.previous_length }
}

/// An edge removed because it collapsed into a self-loop or duplicated an
/// existing edge of the survivor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeletedEdge {
    edge: usize,
    source: usize,
    target: usize,
    length: f64,
}

impl DeletedEdge {
    /// Creates a record for a deleted edge.
    #[must_use]
    pub const fn new(edge: usize, source: usize, target: usize, length: f64) -> Self {
        Self {
            edge,
            source,
            target,
            length,
        }
    }

    /// Returns the edge id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge(&self) -> usize { self.edge }

    /// Returns the source endpoint at deletion time.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the target endpoint at deletion time.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Returns the edge length at deletion time.
    #[must_use]
    #[rustfmt::skip]
    pub const fn length(&self) -> f64 { self.length }
}

/// Everything a hierarchy needs to later expand one contraction again.
///
/// # Examples
/// ```
/// use kasane_core::NodeMerge;
///
/// let mut merge = NodeMerge::new(1);
/// merge.record_radius(4, 1.5);
/// merge.record_radius(4, 3.0);
/// assert_eq!(merge.level(), 1);
/// assert_eq!(merge.previous_radii(), &[(4_usize, 1.5)]);
/// assert!(!merge.touched_edges());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMerge {
    level: usize,
    merged_node: Option<usize>,
    parent: Option<usize>,
    previous_radii: Vec<(usize, f64)>,
    changed_edges: Vec<ChangedEdge>,
    deleted_edges: Vec<DeletedEdge>,
}

impl NodeMerge {
    /// Creates an empty record targeting `level`.
    #[must_use]
    pub fn new(level: usize) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Returns the level this merge produces.
    #[must_use]
    #[rustfmt::skip]
    pub const fn level(&self) -> usize { self.level }

    /// Returns the absorbed node once the hierarchy has finalized the merge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn merged_node(&self) -> Option<usize> { self.merged_node }

    /// Returns the surviving node, if one was recorded.
    #[must_use]
    #[rustfmt::skip]
    pub const fn parent(&self) -> Option<usize> { self.parent }

    /// Returns the radii of changed nodes before this merge, one entry per node.
    #[must_use]
    pub fn previous_radii(&self) -> &[(usize, f64)] {
        &self.previous_radii
    }

    /// Returns the edges moved onto the surviving node.
    #[must_use]
    pub fn changed_edges(&self) -> &[ChangedEdge] {
        &self.changed_edges
    }

    /// Returns the edges removed by this merge.
    #[must_use]
    pub fn deleted_edges(&self) -> &[DeletedEdge] {
        &self.deleted_edges
    }

    /// Returns `true` when the merge moved or deleted at least one edge.
    #[must_use]
    pub fn touched_edges(&self) -> bool {
        !self.changed_edges.is_empty() || !self.deleted_edges.is_empty()
    }

    /// Records the radius `node` had before this merge. Only the first
    /// recording per node is kept.
    pub fn record_radius(&mut self, node: usize, radius: f64) {
        if self.previous_radii.iter().all(|&(known, _)| known != node) {
            self.previous_radii.push((node, radius));
        }
    }

    /// Records the surviving node.
    pub fn record_parent(&mut self, parent: usize) {
        self.parent = Some(parent);
    }

    /// Records an edge moved onto the surviving node.
    pub fn record_changed_edge(&mut self, change: ChangedEdge) {
        self.changed_edges.push(change);
    }

    /// Records an edge removed by this merge.
    pub fn record_deleted_edge(&mut self, deletion: DeletedEdge) {
        self.deleted_edges.push(deletion);
    }

    /// Marks `node` as the node absorbed by this merge.
    pub fn record_merged_node(&mut self, node: usize) {
        self.merged_node = Some(node);
    }
}
