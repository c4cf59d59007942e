//! Plain-text edge lists.
//!
//! One edge per line as `source target [length]`, separated by whitespace.
//! Everything after `#` is a comment and blank lines are ignored. The node
//! count is one past the largest id mentioned, so ids are capped at
//! [`MAX_NODE_ID`] to keep the node table allocatable.

use std::io::{self, BufRead};

use kasane_core::{GraphError, MultilevelGraph};
use thiserror::Error;

/// Errors raised while reading an edge list.
#[derive(Debug, Error)]
pub enum EdgeListError {
    /// The underlying reader failed.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line held fewer than two or more than three fields.
    #[error("line {line}: expected `source target [length]`, found {fields} field(s)")]
    FieldCount {
        /// One-based line number.
        line: usize,
        /// Number of whitespace-separated fields found.
        fields: usize,
    },
    /// A node id was not a non-negative integer.
    #[error("line {line}: `{token}` is not a node id")]
    InvalidNode {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// A node id was larger than [`MAX_NODE_ID`].
    #[error("line {line}: node id {node} exceeds the maximum of {MAX_NODE_ID}")]
    NodeIdTooLarge {
        /// One-based line number.
        line: usize,
        /// Offending id.
        node: usize,
    },
    /// A length was not a number.
    #[error("line {line}: `{token}` is not an edge length")]
    InvalidLength {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },
}

/// Parsed edge list ready to become a [`MultilevelGraph`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeList {
    node_count: usize,
    edges: Vec<(usize, usize, f64)>,
}

impl EdgeList {
    /// Returns one past the largest node id.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the parsed `(source, target, length)` triples in file order.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Builds the graph described by the list.
    ///
    /// # Errors
    /// Returns [`GraphError`] for self-loops and invalid lengths.
    pub fn into_graph(self) -> Result<MultilevelGraph, GraphError> {
        MultilevelGraph::from_weighted_edges(self.node_count, &self.edges)
    }
}

const DEFAULT_LENGTH: f64 = 1.0;

/// Largest node id an edge list may mention.
pub const MAX_NODE_ID: usize = (1 << 28) - 1;

/// Reads an edge list from `reader`.
///
/// # Errors
/// Returns [`EdgeListError`] for unreadable input or malformed lines.
///
/// # Examples
/// ```
/// use kasane_cli::cli::parse_edge_list;
///
/// let list = parse_edge_list("# square\n0 1\n1 2 2.5\n2 3\n3 0\n".as_bytes())?;
/// assert_eq!(list.node_count(), 4);
/// assert_eq!(list.edges()[1], (1, 2, 2.5));
/// # Ok::<(), kasane_cli::cli::EdgeListError>(())
/// ```
pub fn parse_edge_list(reader: impl BufRead) -> Result<EdgeList, EdgeListError> {
    let mut list = EdgeList::default();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let text = line.map_err(|source| EdgeListError::Read {
            line: line_number,
            source,
        })?;
        let content = text.split('#').next().unwrap_or_default();
        let fields: Vec<&str> = content.split_whitespace().collect();

        let (source, target, length) = match fields.as_slice() {
            [] => continue,
            [source, target] => (*source, *target, None),
            [source, target, length] => (*source, *target, Some(*length)),
            other => {
                return Err(EdgeListError::FieldCount {
                    line: line_number,
                    fields: other.len(),
                });
            }
        };

        let source = parse_node(source, line_number)?;
        let target = parse_node(target, line_number)?;
        let length = length.map_or(Ok(DEFAULT_LENGTH), |token| {
            token
                .parse::<f64>()
                .map_err(|_| EdgeListError::InvalidLength {
                    line: line_number,
                    token: token.to_owned(),
                })
        })?;

        list.node_count = list.node_count.max(source.max(target) + 1);
        list.edges.push((source, target, length));
    }

    Ok(list)
}

fn parse_node(token: &str, line: usize) -> Result<usize, EdgeListError> {
    let node: usize = token.parse().map_err(|_| EdgeListError::InvalidNode {
        line,
        token: token.to_owned(),
    })?;
    if node > MAX_NODE_ID {
        return Err(EdgeListError::NodeIdTooLarge { line, node });
    }
    Ok(node)
}
