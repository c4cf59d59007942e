use kasane_core::MultilevelGraph;

/// `rows` x `cols` lattice with node `r * cols + c`.
#[must_use]
pub fn grid(rows: usize, cols: usize) -> MultilevelGraph {
    let mut edges = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let node = row * cols + col;
            if col + 1 < cols {
                edges.push((node, node + 1));
            }
            if row + 1 < rows {
                edges.push((node, node + cols));
            }
        }
    }
    MultilevelGraph::from_edges(rows * cols, &edges).expect("grid edges are valid")
}
