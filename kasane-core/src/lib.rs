//! Kasane core library.
//!
//! Builds coarser levels of a multilevel graph hierarchy by contracting
//! adjacent node pairs, refusing contractions that a bounded local search
//! judges would introduce a cut vertex.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod graph;
mod hierarchy;
mod merge_record;
mod merger;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    error::{GraphError, GraphErrorCode, MergerError, MergerErrorCode},
    graph::MultilevelGraph,
    hierarchy::{Edge, Hierarchy},
    merge_record::{ChangedEdge, DeletedEdge, NodeMerge},
    merger::{LevelReport, LocalBiconnectedMerger, MIN_COARSENABLE_NODES, MergerBuilder},
};
