//! Command-line interface orchestration for kasane.
//!
//! The `coarsen` command reads a plain-text edge list and builds levels until
//! the merger can no longer shrink the graph.

mod commands;
mod edge_list;

pub use commands::{Cli, CliError, CoarsenArgs, CoarsenSummary, Command, render_summary, run_cli};
pub use edge_list::{EdgeList, EdgeListError, MAX_NODE_ID, parse_edge_list};

#[cfg(test)]
mod tests;
