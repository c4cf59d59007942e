//! Candidate edge pools for one coarsening pass.
//!
//! The matching pool holds a random maximal matching; every other edge with
//! at least one endpoint outside the matching lands in the cover pool. Edges
//! whose endpoints are both matched are dropped. Both pools are drained by
//! drawing a uniformly random index and swap-removing it.

use rand::Rng;

use crate::hierarchy::Edge;

#[derive(Clone, Debug, Default)]
pub(crate) struct CandidatePools {
    matching: Vec<Edge>,
    cover: Vec<Edge>,
}

impl CandidatePools {
    /// Splits `edges` into the matching and cover pools.
    pub(crate) fn select<R: Rng>(mut edges: Vec<Edge>, node_bound: usize, rng: &mut R) -> Self {
        let mut matched = vec![false; node_bound];
        let mut matching = Vec::new();
        let mut leftovers = Vec::new();

        while let Some(edge) = take_random(&mut edges, rng) {
            let (source, target) = (edge.source(), edge.target());
            if is_matched(&matched, source) || is_matched(&matched, target) {
                leftovers.push(edge);
                continue;
            }
            mark(&mut matched, source);
            mark(&mut matched, target);
            matching.push(edge);
        }

        let mut cover = Vec::new();
        while let Some(edge) = take_random(&mut leftovers, rng) {
            let (source, target) = (edge.source(), edge.target());
            if is_matched(&matched, source) && is_matched(&matched, target) {
                continue;
            }
            mark(&mut matched, source);
            mark(&mut matched, target);
            cover.push(edge);
        }

        Self { matching, cover }
    }

    /// Draws the next edge, preferring the matching pool.
    pub(crate) fn pop<R: Rng>(&mut self, rng: &mut R) -> Option<Edge> {
        take_random(&mut self.matching, rng).or_else(|| take_random(&mut self.cover, rng))
    }

    pub(crate) fn matching_len(&self) -> usize {
        self.matching.len()
    }

    pub(crate) fn cover_len(&self) -> usize {
        self.cover.len()
    }
}

fn take_random<T, R: Rng>(items: &mut Vec<T>, rng: &mut R) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..items.len());
    Some(items.swap_remove(index))
}

fn is_matched(matched: &[bool], node: usize) -> bool {
    matched.get(node).copied().unwrap_or(false)
}

fn mark(matched: &mut Vec<bool>, node: usize) {
    if node >= matched.len() {
        matched.resize(node + 1, false);
    }
    if let Some(slot) = matched.get_mut(node) {
        *slot = true;
    }
}
