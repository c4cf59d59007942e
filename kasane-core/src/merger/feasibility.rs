//! Local biconnectivity check for a single contraction.
//!
//! A contraction of `candidate` into `parent` is feasible when the nodes
//! around the pair stay connected to each other without passing through the
//! pair itself. The check explores at most [`visit_budget`] nodes from the
//! pair's neighbourhood, joining connectivity marks as it goes, and accepts
//! once every pending neighbour shares the anchor mark. Exhausting the budget
//! or the frontier rejects the contraction.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::trace;

use crate::hierarchy::Hierarchy;

use super::{cut_flags::CutFlags, marks::ConnectivityMarks};

/// Nodes of degree at most this are always safe to contract.
const TRIVIAL_DEGREE: usize = 2;
const BASE_VISIT_BUDGET: usize = 50;

/// Which ring around the pair must reconnect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CheckStrength {
    /// Nodes two hops from the pair must reconnect without using the first
    /// ring.
    Strong,
    /// Direct neighbours of the pair must reconnect.
    Weak,
}

/// Maximum number of nodes a single check may expand.
pub(crate) fn visit_budget(node_count: usize) -> usize {
    if node_count == 0 {
        return BASE_VISIT_BUDGET;
    }
    let log = (node_count as f64).ln().floor() as usize;
    log * 2 + BASE_VISIT_BUDGET
}

/// Runs the strong check, then the weak check.
pub(crate) fn can_merge<H: Hierarchy>(
    hierarchy: &H,
    cut_flags: &CutFlags,
    marks: &mut ConnectivityMarks,
    parent: usize,
    candidate: usize,
) -> bool {
    check(hierarchy, cut_flags, marks, parent, candidate, CheckStrength::Strong)
        && check(hierarchy, cut_flags, marks, parent, candidate, CheckStrength::Weak)
}

/// Runs one check and leaves `marks` empty afterwards.
pub(crate) fn check<H: Hierarchy>(
    hierarchy: &H,
    cut_flags: &CutFlags,
    marks: &mut ConnectivityMarks,
    parent: usize,
    candidate: usize,
    strength: CheckStrength,
) -> bool {
    if hierarchy.degree(parent) <= TRIVIAL_DEGREE
        || hierarchy.degree(candidate) <= TRIVIAL_DEGREE
        || cut_flags.is_set(parent)
        || cut_flags.is_set(candidate)
    {
        return true;
    }

    marks.clear();
    let accepted = Search::new(hierarchy, cut_flags, marks, parent, candidate).run(strength);
    marks.clear();
    trace!(parent, candidate, ?strength, accepted, "feasibility check finished");
    accepted
}

struct Search<'a, H> {
    hierarchy: &'a H,
    cut_flags: &'a CutFlags,
    marks: &'a mut ConnectivityMarks,
    parent: usize,
    candidate: usize,
    node_marks: HashMap<usize, usize>,
    seen: HashSet<usize>,
    ringed: HashSet<usize>,
    queue: VecDeque<usize>,
}

impl<'a, H: Hierarchy> Search<'a, H> {
    fn new(
        hierarchy: &'a H,
        cut_flags: &'a CutFlags,
        marks: &'a mut ConnectivityMarks,
        parent: usize,
        candidate: usize,
    ) -> Self {
        Self {
            hierarchy,
            cut_flags,
            marks,
            parent,
            candidate,
            node_marks: HashMap::new(),
            seen: HashSet::from([parent, candidate]),
            ringed: HashSet::from([parent, candidate]),
            queue: VecDeque::new(),
        }
    }

    fn run(mut self, strength: CheckStrength) -> bool {
        let first_ring = self.seed_first_ring();
        let pending = match strength {
            CheckStrength::Weak => first_ring,
            CheckStrength::Strong => self.seed_second_ring(&first_ring),
        };
        let Some(&anchor) = pending.iter().min() else {
            return true;
        };
        self.explore(pending, anchor)
    }

    /// Queues every neighbour of the pair with its own mark and returns the
    /// distinct neighbours other than the pair.
    fn seed_first_ring(&mut self) -> Vec<usize> {
        let mut ring = Vec::new();
        for node in [self.parent, self.candidate] {
            for neighbour in self.hierarchy.neighbours(node) {
                self.queue.push_back(neighbour);
                self.node_marks.insert(neighbour, neighbour);
                if self.ringed.insert(neighbour) {
                    ring.push(neighbour);
                }
            }
        }
        ring
    }

    /// Queues the nodes adjacent to `first_ring` that are not yet classified
    /// and hides the first ring from the search.
    fn seed_second_ring(&mut self, first_ring: &[usize]) -> Vec<usize> {
        let mut ring = Vec::new();
        for &node in first_ring {
            for neighbour in self.hierarchy.neighbours(node) {
                if self.seen.contains(&neighbour) || !self.ringed.insert(neighbour) {
                    continue;
                }
                ring.push(neighbour);
                self.queue.push_back(neighbour);
                self.node_marks.insert(neighbour, neighbour);
            }
        }
        self.seen.extend(first_ring.iter().copied());
        ring
    }

    fn explore(&mut self, mut pending: Vec<usize>, anchor: usize) -> bool {
        let hierarchy = self.hierarchy;
        let budget = visit_budget(hierarchy.node_count());
        let mut visited = 0;

        while visited < budget {
            let Some(node) = self.queue.pop_front() else {
                break;
            };
            if self.seen.contains(&node) || self.cut_flags.is_set(node) {
                continue;
            }
            self.seen.insert(node);
            visited += 1;

            for neighbour in hierarchy.neighbours(node) {
                if neighbour == self.parent || neighbour == self.candidate {
                    continue;
                }
                if self.join(node, neighbour) == Some(anchor) {
                    self.prune(&mut pending, anchor);
                    if pending.is_empty() {
                        return true;
                    }
                }
                if !self.seen.contains(&neighbour) {
                    self.queue.push_back(neighbour);
                }
            }
        }

        false
    }

    /// Propagates `node`'s mark to `neighbour`. Returns the surviving mark
    /// when two distinct components were joined.
    fn join(&mut self, node: usize, neighbour: usize) -> Option<usize> {
        let own = self.node_marks.get(&node).copied().unwrap_or(node);
        let own_root = self.marks.find(own);

        let Some(theirs) = self.node_marks.get(&neighbour).copied() else {
            self.node_marks.insert(neighbour, own_root);
            return None;
        };
        let their_root = self.marks.find(theirs);
        if own_root == their_root {
            return None;
        }

        let root = self.marks.union(own_root, their_root);
        self.node_marks.insert(node, root);
        self.node_marks.insert(neighbour, root);
        Some(root)
    }

    fn prune(&mut self, pending: &mut Vec<usize>, anchor: usize) {
        let node_marks = &self.node_marks;
        let marks = &mut *self.marks;
        pending.retain(|node| {
            let mark = node_marks.get(node).copied().unwrap_or(*node);
            marks.find(mark) != anchor
        });
    }
}
