//! Shared test utilities for `kasane-core`.

use std::collections::HashSet;

use kasane_test_support::property::case_count;
use proptest::test_runner::Config as ProptestConfig;

use crate::{Hierarchy, MultilevelGraph, NodeMerge, hierarchy::Edge};

/// Builds a proptest configuration honouring `KASANE_PBT_CASES`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: case_count(default_cases),
        ..ProptestConfig::default()
    }
}

pub(crate) fn graph(node_count: usize, edges: &[(usize, usize)]) -> MultilevelGraph {
    MultilevelGraph::from_edges(node_count, edges).expect("fixture edges must be valid")
}

pub(crate) fn path(node_count: usize) -> MultilevelGraph {
    let edges: Vec<_> = (1..node_count).map(|node| (node - 1, node)).collect();
    graph(node_count, &edges)
}

pub(crate) fn cycle(node_count: usize) -> MultilevelGraph {
    let edges: Vec<_> = (0..node_count)
        .map(|node| (node, (node + 1) % node_count))
        .collect();
    graph(node_count, &edges)
}

/// Hub `0` joined to `leaves` leaves.
pub(crate) fn star(leaves: usize) -> MultilevelGraph {
    let edges: Vec<_> = (1..=leaves).map(|leaf| (0, leaf)).collect();
    graph(leaves + 1, &edges)
}

/// Two triangles `0-2-3` and `1-4-5` joined by the edge `0-1`.
pub(crate) fn bowtie() -> MultilevelGraph {
    graph(6, &[(0, 1), (0, 2), (0, 3), (2, 3), (1, 4), (1, 5), (4, 5)])
}

/// [`bowtie`] with pendant nodes `6` and `7` hanging off `2` and `4`.
pub(crate) fn two_rings() -> MultilevelGraph {
    graph(
        8,
        &[
            (0, 1),
            (0, 2),
            (0, 3),
            (2, 3),
            (1, 4),
            (1, 5),
            (4, 5),
            (2, 6),
            (4, 7),
        ],
    )
}

/// Pair `10-11` whose first ring `20..=23` reaches a shared hub `5` through
/// the second ring `1..=4`.
pub(crate) fn ringed_pair() -> MultilevelGraph {
    graph(
        24,
        &[
            (10, 11),
            (10, 20),
            (10, 21),
            (11, 22),
            (11, 23),
            (1, 20),
            (2, 21),
            (3, 22),
            (4, 23),
            (1, 5),
            (2, 5),
            (3, 5),
            (4, 5),
        ],
    )
}

/// Hub `0` with leaves `1..=5`, plus pendant `6` hanging off leaf `1`.
pub(crate) fn star_with_tail() -> MultilevelGraph {
    graph(7, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (1, 6)])
}

/// A substitution request as the hierarchy saw it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SubstitutionRequest {
    pub(crate) parent: usize,
    pub(crate) candidate: usize,
    pub(crate) parent_degree: usize,
    pub(crate) candidate_degree: usize,
}

/// Delegates to a [`MultilevelGraph`] but lets tests override collaborator
/// behaviour.
#[derive(Debug)]
pub(crate) struct ScriptedHierarchy {
    pub(crate) inner: MultilevelGraph,
    pub(crate) cut_vertices: HashSet<usize>,
    /// Nodes reported as no longer live while still present in `inner`.
    pub(crate) retired: HashSet<usize>,
    /// Number of merges the hierarchy will still finalise; `None` is unlimited.
    pub(crate) finalize_budget: Option<usize>,
    pub(crate) refuse_substitution: bool,
    pub(crate) requests: Vec<SubstitutionRequest>,
}

impl ScriptedHierarchy {
    pub(crate) fn new(inner: MultilevelGraph) -> Self {
        Self {
            inner,
            cut_vertices: HashSet::new(),
            retired: HashSet::new(),
            finalize_budget: None,
            refuse_substitution: false,
            requests: Vec::new(),
        }
    }
}

impl Hierarchy for ScriptedHierarchy {
    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn node_bound(&self) -> usize {
        self.inner.node_bound()
    }

    fn level(&self) -> usize {
        self.inner.level()
    }

    fn edges(&self) -> Vec<Edge> {
        self.inner.edges()
    }

    fn degree(&self, node: usize) -> usize {
        self.inner.degree(node)
    }

    fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.inner.neighbours(node)
    }

    fn is_live(&self, node: usize) -> bool {
        !self.retired.contains(&node) && self.inner.is_live(node)
    }

    fn radius(&self, node: usize) -> f64 {
        self.inner.radius(node)
    }

    fn is_cut_vertex(&self, node: usize) -> bool {
        self.cut_vertices.contains(&node)
    }

    fn substitute_node(
        &mut self,
        merge: &mut NodeMerge,
        parent: usize,
        radius: f64,
        candidate: usize,
    ) -> bool {
        self.requests.push(SubstitutionRequest {
            parent,
            candidate,
            parent_degree: self.inner.degree(parent),
            candidate_degree: self.inner.degree(candidate),
        });
        !self.refuse_substitution && self.inner.substitute_node(merge, parent, radius, candidate)
    }

    fn reassign_edges(
        &mut self,
        merge: &mut NodeMerge,
        candidate: usize,
        parent: usize,
        adjust_lengths: bool,
    ) {
        self.inner
            .reassign_edges(merge, candidate, parent, adjust_lengths);
    }

    fn finalize_merge(&mut self, merge: NodeMerge, candidate: usize) -> bool {
        if self.finalize_budget == Some(0) {
            return false;
        }
        let finalized = self.inner.finalize_merge(merge, candidate);
        if finalized {
            if let Some(remaining) = self.finalize_budget.as_mut() {
                *remaining -= 1;
            }
        }
        finalized
    }
}
