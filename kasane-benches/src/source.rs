//! Synthetic graphs for benchmarking.
//!
//! Generates seeded [`MultilevelGraph`] instances in two families: square
//! grids, whose interior nodes all have degree four, and rings with random
//! chords, whose degree distribution is uneven. Both are biconnected, so the
//! feasibility search runs in full for most candidate pairs.

use kasane_core::{GraphError, MultilevelGraph};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Smallest ring the generator accepts.
pub const MIN_RING_NODES: usize = 3;

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum SyntheticError {
    /// A grid dimension was zero.
    #[error("grid dimensions must be non-zero (got {rows}x{cols})")]
    EmptyGrid {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// The ring was too small to close.
    #[error("ring needs at least 3 nodes (got {node_count})")]
    RingTooSmall {
        /// Requested node count.
        node_count: usize,
    },
    /// The generated edges were rejected by the graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Shape of a synthetic graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Topology {
    /// A `rows` by `cols` lattice with unit edge lengths.
    Grid {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
    /// A cycle over `node_count` nodes plus `chords` random extra edges with
    /// lengths drawn from `[1, 2)`.
    RingWithChords {
        /// Number of nodes on the ring.
        node_count: usize,
        /// Number of random chords.
        chords: usize,
    },
}

impl Topology {
    /// Returns the number of nodes the topology produces.
    #[must_use]
    pub const fn node_count(self) -> usize {
        match self {
            Self::Grid { rows, cols } => rows.saturating_mul(cols),
            Self::RingWithChords { node_count, .. } => node_count,
        }
    }

    /// Returns a short label for benchmark ids.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid { .. } => "grid",
            Self::RingWithChords { .. } => "ring",
        }
    }
}

/// Generates a graph with the given topology.
///
/// # Errors
/// Returns [`SyntheticError`] for degenerate dimensions.
///
/// # Examples
/// ```
/// use kasane_benches::source::{Topology, generate};
/// use kasane_core::Hierarchy;
///
/// let graph = generate(Topology::RingWithChords { node_count: 10, chords: 4 }, 7)
///     .expect("valid topology");
/// assert_eq!(graph.node_count(), 10);
/// assert_eq!(graph.edge_count(), 14);
/// ```
pub fn generate(topology: Topology, seed: u64) -> Result<MultilevelGraph, SyntheticError> {
    match topology {
        Topology::Grid { rows, cols } => grid(rows, cols),
        Topology::RingWithChords { node_count, chords } => ring(node_count, chords, seed),
    }
}

fn grid(rows: usize, cols: usize) -> Result<MultilevelGraph, SyntheticError> {
    if rows == 0 || cols == 0 {
        return Err(SyntheticError::EmptyGrid { rows, cols });
    }
    let mut edges = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let node = row.saturating_mul(cols).saturating_add(col);
            if col.saturating_add(1) < cols {
                edges.push((node, node.saturating_add(1)));
            }
            if row.saturating_add(1) < rows {
                edges.push((node, node.saturating_add(cols)));
            }
        }
    }
    Ok(MultilevelGraph::from_edges(rows.saturating_mul(cols), &edges)?)
}

fn ring(node_count: usize, chords: usize, seed: u64) -> Result<MultilevelGraph, SyntheticError> {
    if node_count < MIN_RING_NODES {
        return Err(SyntheticError::RingTooSmall { node_count });
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut edges: Vec<(usize, usize, f64)> = (0..node_count)
        .map(|node| {
            let next = node.saturating_add(1);
            (node, if next == node_count { 0 } else { next }, 1.0)
        })
        .collect();
    while edges.len() < node_count.saturating_add(chords) {
        let source = rng.gen_range(0..node_count);
        let target = rng.gen_range(0..node_count);
        if source != target {
            edges.push((source, target, rng.gen_range(1.0..2.0)));
        }
    }
    Ok(MultilevelGraph::from_weighted_edges(node_count, &edges)?)
}

#[cfg(test)]
mod tests {
    use kasane_core::Hierarchy;
    use rstest::rstest;

    use super::{SyntheticError, Topology, generate};

    #[rstest]
    #[case(Topology::Grid { rows: 4, cols: 5 }, 20, 31)]
    #[case(Topology::Grid { rows: 1, cols: 3 }, 3, 2)]
    #[case(Topology::RingWithChords { node_count: 12, chords: 0 }, 12, 12)]
    #[case(Topology::RingWithChords { node_count: 12, chords: 6 }, 12, 18)]
    fn generates_expected_sizes(
        #[case] topology: Topology,
        #[case] nodes: usize,
        #[case] edges: usize,
    ) -> Result<(), SyntheticError> {
        let graph = generate(topology, 1)?;
        assert_eq!(graph.node_count(), nodes);
        assert_eq!(topology.node_count(), nodes);
        assert_eq!(graph.edge_count(), edges);
        Ok(())
    }

    #[rstest]
    #[case(Topology::Grid { rows: 0, cols: 4 })]
    #[case(Topology::RingWithChords { node_count: 2, chords: 1 })]
    fn rejects_degenerate_topologies(#[case] topology: Topology) {
        assert!(generate(topology, 1).is_err());
    }

    #[test]
    fn same_seed_reproduces_the_graph() -> Result<(), SyntheticError> {
        let topology = Topology::RingWithChords {
            node_count: 50,
            chords: 25,
        };
        assert_eq!(generate(topology, 9)?.edges(), generate(topology, 9)?.edges());
        Ok(())
    }
}
