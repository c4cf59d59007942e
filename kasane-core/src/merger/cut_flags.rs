//! Per-node cut-vertex flags.
//!
//! Flags are seeded once per pass from [`Hierarchy::is_cut_vertex`], which
//! reports nothing unless the hierarchy carries its own articulation-point
//! data. During the pass a flag only ever moves forward onto the survivor of
//! a contraction; it is never cleared.

use crate::hierarchy::Hierarchy;

#[derive(Clone, Debug, Default)]
pub(crate) struct CutFlags {
    flags: Vec<bool>,
}

impl CutFlags {
    pub(crate) fn from_hierarchy<H: Hierarchy>(hierarchy: &H) -> Self {
        let flags = (0..hierarchy.node_bound())
            .map(|node| hierarchy.is_live(node) && hierarchy.is_cut_vertex(node))
            .collect();
        Self { flags }
    }

    pub(crate) fn is_set(&self, node: usize) -> bool {
        self.flags.get(node).copied().unwrap_or(false)
    }

    pub(crate) fn set(&mut self, node: usize) {
        if node >= self.flags.len() {
            self.flags.resize(node + 1, false);
        }
        if let Some(flag) = self.flags.get_mut(node) {
            *flag = true;
        }
    }

    /// Carries `absorbed`'s flag onto `survivor`.
    pub(crate) fn propagate(&mut self, absorbed: usize, survivor: usize) {
        if self.is_set(absorbed) {
            self.set(survivor);
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.flags.iter().filter(|flag| **flag).count()
    }
}
