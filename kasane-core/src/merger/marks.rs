//! Transient union-find over connectivity marks.
//!
//! Marks are node ids reused as component labels. The store is sparse so a
//! feasibility check that touches a few dozen nodes never allocates
//! proportionally to the whole graph. It must be cleared between checks.

use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub(crate) struct ConnectivityMarks {
    representative: HashMap<usize, usize>,
}

impl ConnectivityMarks {
    /// Returns the canonical mark of `mark`'s component.
    pub(crate) fn find(&mut self, mark: usize) -> usize {
        let mut root = mark;
        while let Some(&next) = self.representative.get(&root) {
            if next == root {
                break;
            }
            root = next;
        }

        let mut current = mark;
        while current != root {
            match self.representative.insert(current, root) {
                Some(next) => current = next,
                None => break,
            }
        }

        root
    }

    /// Joins the components of `left` and `right`, returning the surviving
    /// mark. The smaller mark always wins.
    pub(crate) fn union(&mut self, left: usize, right: usize) -> usize {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return left_root;
        }
        let (smaller, larger) = if left_root < right_root {
            (left_root, right_root)
        } else {
            (right_root, left_root)
        };
        self.representative.insert(larger, smaller);
        smaller
    }

    pub(crate) fn clear(&mut self) {
        self.representative.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.representative.is_empty()
    }
}
