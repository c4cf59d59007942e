//! Substitution chain for nodes absorbed earlier in the same pass.
//!
//! Entries point from an absorbed node to the node that absorbed it. The
//! chain is never compressed; [`SubstitutionChain::resolve`] walks it to the
//! live representative on every query.

#[derive(Clone, Debug, Default)]
pub(crate) struct SubstitutionChain {
    substitutes: Vec<Option<usize>>,
}

impl SubstitutionChain {
    /// Drops every entry and sizes the chain for `node_bound` ids.
    pub(crate) fn reset(&mut self, node_bound: usize) {
        self.substitutes.clear();
        self.substitutes.resize(node_bound, None);
    }

    /// Records that `absorbed` was contracted into `survivor`.
    pub(crate) fn record(&mut self, absorbed: usize, survivor: usize) {
        debug_assert_ne!(absorbed, survivor, "a node cannot absorb itself");
        if absorbed >= self.substitutes.len() {
            self.substitutes.resize(absorbed + 1, None);
        }
        if let Some(slot) = self.substitutes.get_mut(absorbed) {
            *slot = Some(survivor);
        }
    }

    pub(crate) fn substitute_of(&self, node: usize) -> Option<usize> {
        self.substitutes.get(node).copied().flatten()
    }

    /// Follows the chain from `node` to the node currently standing in for it.
    pub(crate) fn resolve(&self, node: usize) -> usize {
        let mut current = node;
        while let Some(next) = self.substitute_of(current) {
            current = next;
        }
        current
    }
}
