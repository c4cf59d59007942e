//! In-memory multilevel graph.
//!
//! [`MultilevelGraph`] is the reference [`Hierarchy`] implementation: an
//! undirected multigraph with stable node and edge ids, per-node radii,
//! per-edge lengths, and a log of every accepted [`NodeMerge`]. Removed
//! nodes and edges leave an empty slot behind so ids are never reused.

use tracing::debug;

use crate::{
    error::GraphError,
    hierarchy::{Edge, Hierarchy},
    merge_record::{ChangedEdge, DeletedEdge, NodeMerge},
};

const DEFAULT_RADIUS: f64 = 1.0;
const DEFAULT_LENGTH: f64 = 1.0;

#[derive(Clone, Debug)]
struct NodeSlot {
    radius: f64,
    adjacency: Vec<usize>,
}

#[derive(Clone, Copy, Debug)]
struct EdgeSlot {
    source: usize,
    target: usize,
    length: f64,
}

impl EdgeSlot {
    fn opposite(&self, node: usize) -> Option<usize> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Undirected multigraph that records the merges applied to it.
///
/// # Examples
/// ```
/// use kasane_core::{Hierarchy, MultilevelGraph};
///
/// let graph = MultilevelGraph::from_edges(3, &[(0, 1), (1, 2)])?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.degree(1), 2);
/// assert!(graph.has_edge(2, 1));
/// assert_eq!(graph.level(), 0);
/// # Ok::<(), kasane_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MultilevelGraph {
    nodes: Vec<Option<NodeSlot>>,
    edges: Vec<Option<EdgeSlot>>,
    live_nodes: usize,
    live_edges: usize,
    merges: Vec<NodeMerge>,
}

impl MultilevelGraph {
    /// Builds a graph with `node_count` nodes and unit-length edges.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidNodeId`] when an endpoint is
    /// `>= node_count` and [`GraphError::SelfLoop`] for loops.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let weighted: Vec<_> = edges
            .iter()
            .map(|&(source, target)| (source, target, DEFAULT_LENGTH))
            .collect();
        Self::from_weighted_edges(node_count, &weighted)
    }

    /// Builds a graph with `node_count` nodes and explicit edge lengths.
    ///
    /// Parallel edges are kept as given.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidNodeId`] when an endpoint is
    /// `>= node_count`, [`GraphError::SelfLoop`] for loops, and
    /// [`GraphError::InvalidLength`] for negative or non-finite lengths.
    pub fn from_weighted_edges(
        node_count: usize,
        edges: &[(usize, usize, f64)],
    ) -> Result<Self, GraphError> {
        let mut nodes: Vec<Option<NodeSlot>> = (0..node_count)
            .map(|_| {
                Some(NodeSlot {
                    radius: DEFAULT_RADIUS,
                    adjacency: Vec::new(),
                })
            })
            .collect();
        let mut slots = Vec::with_capacity(edges.len());

        for &(source, target, length) in edges {
            for node in [source, target] {
                if node >= node_count {
                    return Err(GraphError::InvalidNodeId { node, node_count });
                }
            }
            if source == target {
                return Err(GraphError::SelfLoop { node: source });
            }
            if !length.is_finite() || length < 0.0 {
                return Err(GraphError::InvalidLength {
                    source_node: source,
                    target_node: target,
                    length,
                });
            }

            let id = slots.len();
            slots.push(Some(EdgeSlot {
                source,
                target,
                length,
            }));
            for node in [source, target] {
                if let Some(Some(slot)) = nodes.get_mut(node) {
                    slot.adjacency.push(id);
                }
            }
        }

        Ok(Self {
            nodes,
            live_nodes: node_count,
            live_edges: slots.len(),
            edges: slots,
            merges: Vec::new(),
        })
    }

    /// Returns the number of live edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.live_edges }

    /// Iterates the ids of live nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|_| id))
    }

    /// Returns the live edge with the given id.
    #[must_use]
    pub fn edge(&self, id: usize) -> Option<Edge> {
        self.edge_slot(id)
            .map(|slot| Edge::new(id, slot.source, slot.target))
    }

    /// Returns the length of a live edge.
    #[must_use]
    pub fn length(&self, id: usize) -> Option<f64> {
        self.edge_slot(id).map(|slot| slot.length)
    }

    /// Returns `true` when at least one edge joins `left` and `right`.
    #[must_use]
    pub fn has_edge(&self, left: usize, right: usize) -> bool {
        self.adjacency(left)
            .iter()
            .filter_map(|&edge| self.edge_slot(edge))
            .any(|slot| slot.opposite(left) == Some(right))
    }

    /// Overrides the radius of a live node.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when `node` is not live and
    /// [`GraphError::InvalidRadius`] for negative or non-finite radii.
    pub fn set_radius(&mut self, node: usize, radius: f64) -> Result<(), GraphError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GraphError::InvalidRadius { node, radius });
        }
        let slot = self
            .node_slot_mut(node)
            .ok_or(GraphError::UnknownNode { node })?;
        slot.radius = radius;
        Ok(())
    }

    /// Returns every accepted merge in the order it was applied.
    #[must_use]
    pub fn merges(&self) -> &[NodeMerge] {
        &self.merges
    }

    /// Iterates the merges that produced `level`.
    pub fn merges_at_level(&self, level: usize) -> impl Iterator<Item = &NodeMerge> + '_ {
        self.merges
            .iter()
            .filter(move |merge| merge.level() == level)
    }

    fn node_slot(&self, node: usize) -> Option<&NodeSlot> {
        self.nodes.get(node).and_then(Option::as_ref)
    }

    fn node_slot_mut(&mut self, node: usize) -> Option<&mut NodeSlot> {
        self.nodes.get_mut(node).and_then(Option::as_mut)
    }

    fn edge_slot(&self, edge: usize) -> Option<EdgeSlot> {
        self.edges.get(edge).copied().flatten()
    }

    fn adjacency(&self, node: usize) -> &[usize] {
        self.node_slot(node)
            .map(|slot| slot.adjacency.as_slice())
            .unwrap_or_default()
    }

    fn detach(&mut self, node: usize, edge: usize) {
        if let Some(slot) = self.node_slot_mut(node) {
            if let Some(position) = slot.adjacency.iter().position(|&known| known == edge) {
                slot.adjacency.swap_remove(position);
            }
        }
    }

    fn delete_edge(&mut self, edge: usize) {
        let Some(slot) = self.edge_slot(edge) else {
            return;
        };
        self.detach(slot.source, edge);
        self.detach(slot.target, edge);
        if let Some(entry) = self.edges.get_mut(edge) {
            *entry = None;
        }
        self.live_edges -= 1;
    }

    fn move_endpoint(&mut self, edge: usize, from: usize, to: usize, extra_length: f64) {
        let Some(Some(slot)) = self.edges.get_mut(edge) else {
            return;
        };
        if slot.source == from {
            slot.source = to;
        }
        if slot.target == from {
            slot.target = to;
        }
        slot.length += extra_length;
        self.detach(from, edge);
        if let Some(parent) = self.node_slot_mut(to) {
            parent.adjacency.push(edge);
        }
    }
}

impl Hierarchy for MultilevelGraph {
    fn node_count(&self) -> usize {
        self.live_nodes
    }

    fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    fn level(&self) -> usize {
        self.merges.last().map_or(0, NodeMerge::level)
    }

    fn edges(&self) -> Vec<Edge> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| {
                slot.as_ref()
                    .map(|slot| Edge::new(id, slot.source, slot.target))
            })
            .collect()
    }

    fn degree(&self, node: usize) -> usize {
        self.adjacency(node).len()
    }

    fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency(node)
            .iter()
            .filter_map(move |&edge| self.edge_slot(edge).and_then(|slot| slot.opposite(node)))
    }

    fn is_live(&self, node: usize) -> bool {
        self.node_slot(node).is_some()
    }

    fn radius(&self, node: usize) -> f64 {
        self.node_slot(node).map_or(0.0, |slot| slot.radius)
    }

    fn substitute_node(
        &mut self,
        merge: &mut NodeMerge,
        parent: usize,
        radius: f64,
        candidate: usize,
    ) -> bool {
        if parent == candidate || !self.is_live(candidate) {
            return false;
        }
        let Some(slot) = self.node_slot_mut(parent) else {
            return false;
        };
        merge.record_radius(parent, slot.radius);
        merge.record_parent(parent);
        slot.radius = radius;
        true
    }

    fn reassign_edges(
        &mut self,
        merge: &mut NodeMerge,
        candidate: usize,
        parent: usize,
        adjust_lengths: bool,
    ) {
        let incident = self.adjacency(candidate).to_vec();
        let collapsed_length = incident
            .iter()
            .filter_map(|&edge| self.edge_slot(edge))
            .find(|slot| slot.opposite(candidate) == Some(parent))
            .map_or(0.0, |slot| slot.length);
        let extra_length = if adjust_lengths { collapsed_length } else { 0.0 };

        for edge in incident {
            let Some(slot) = self.edge_slot(edge) else {
                continue;
            };
            let Some(other) = slot.opposite(candidate) else {
                continue;
            };

            if other == parent || self.has_edge(parent, other) {
                merge.record_deleted_edge(DeletedEdge::new(
                    edge,
                    slot.source,
                    slot.target,
                    slot.length,
                ));
                self.delete_edge(edge);
            } else {
                merge.record_changed_edge(ChangedEdge::new(
                    edge,
                    slot.source,
                    slot.target,
                    slot.length,
                ));
                self.move_endpoint(edge, candidate, parent, extra_length);
            }
        }
    }

    fn finalize_merge(&mut self, mut merge: NodeMerge, candidate: usize) -> bool {
        let Some(slot) = self.node_slot(candidate) else {
            return false;
        };
        if !slot.adjacency.is_empty() || !merge.touched_edges() {
            debug!(
                candidate,
                remaining_degree = slot.adjacency.len(),
                "merge left the candidate attached; discarding record"
            );
            return false;
        }

        merge.record_radius(candidate, slot.radius);
        merge.record_merged_node(candidate);
        if let Some(entry) = self.nodes.get_mut(candidate) {
            *entry = None;
        }
        self.live_nodes -= 1;
        self.merges.push(merge);
        true
    }
}
