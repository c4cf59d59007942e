//! Benchmark parameter types.

use std::fmt;

/// Parameters for a level-construction benchmark run.
#[derive(Clone, Debug)]
pub struct LevelBenchParams {
    /// Short name of the graph family.
    pub topology: &'static str,
    /// Number of nodes in the input graph.
    pub node_count: usize,
}

impl fmt::Display for LevelBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.topology, self.node_count)
    }
}
