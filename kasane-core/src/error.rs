//! Error types for the kasane core library.
//!
//! Contraction feasibility rejections and finalize failures are ordinary
//! boolean outcomes and never surface here. These enums cover malformed
//! input graphs, invalid configuration, and collaborator contract breaches.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while building or querying a [`crate::MultilevelGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// An edge referenced a node id outside the declared node range.
    #[error("edge references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The offending node id.
        node: usize,
        /// Number of nodes declared for the graph.
        node_count: usize,
    },
    /// An input edge joined a node to itself.
    #[error("self-loop on node {node} is not permitted")]
    SelfLoop {
        /// Node carrying the self-loop.
        node: usize,
    },
    /// The node was never issued or has already been contracted away.
    #[error("node {node} is not live in the graph")]
    UnknownNode {
        /// The requested node id.
        node: usize,
    },
    /// Radii must be finite and non-negative.
    #[error("invalid radius {radius} for node {node}")]
    InvalidRadius {
        /// Node whose radius was being set.
        node: usize,
        /// Rejected radius value.
        radius: f64,
    },
    /// Edge lengths must be finite and non-negative.
    #[error("invalid length {length} for edge ({source_node}, {target_node})")]
    InvalidLength {
        /// Source endpoint of the offending edge.
        source_node: usize,
        /// Target endpoint of the offending edge.
        target_node: usize,
        /// Rejected length value.
        length: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge referenced a node id outside the declared node range.
        InvalidNodeId => InvalidNodeId { .. } => "GRAPH_INVALID_NODE_ID",
        /// An input edge joined a node to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The node was never issued or has already been contracted away.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
        /// Radii must be finite and non-negative.
        InvalidRadius => InvalidRadius { .. } => "GRAPH_INVALID_RADIUS",
        /// Edge lengths must be finite and non-negative.
        InvalidLength => InvalidLength { .. } => "GRAPH_INVALID_LENGTH",
    }
}

/// Error type produced when configuring or running a
/// [`crate::LocalBiconnectedMerger`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MergerError {
    /// The shrink factor must be finite and strictly greater than one.
    #[error("shrink factor must be finite and greater than 1.0 (got {got})")]
    InvalidShrinkFactor {
        /// The rejected factor.
        got: f64,
    },
    /// The hierarchy refused to substitute two distinct live nodes.
    ///
    /// This is a contract breach by the hierarchy collaborator. The pass is
    /// abandoned and the error is never retried.
    #[error("hierarchy refused to substitute node {candidate} into live node {parent}")]
    SubstitutionRejected {
        /// Surviving node of the attempted contraction.
        parent: usize,
        /// Node that was to be absorbed.
        candidate: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MergerError`] variants.
    enum MergerErrorCode for MergerError {
        /// The shrink factor must be finite and strictly greater than one.
        InvalidShrinkFactor => InvalidShrinkFactor { .. } => "MERGER_INVALID_SHRINK_FACTOR",
        /// The hierarchy refused to substitute two distinct live nodes.
        SubstitutionRejected => SubstitutionRejected { .. } => "MERGER_SUBSTITUTION_REJECTED",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(GraphError::InvalidNodeId { node: 4, node_count: 3 }, "GRAPH_INVALID_NODE_ID")]
    #[case(GraphError::SelfLoop { node: 1 }, "GRAPH_SELF_LOOP")]
    #[case(GraphError::UnknownNode { node: 9 }, "GRAPH_UNKNOWN_NODE")]
    #[case(GraphError::InvalidRadius { node: 0, radius: -1.0 }, "GRAPH_INVALID_RADIUS")]
    fn graph_error_codes_are_stable(#[case] error: GraphError, #[case] expected: &str) {
        assert_eq!(error.code().as_str(), expected);
        assert_eq!(error.code().to_string(), expected);
    }

    #[test]
    fn merger_error_codes_are_stable() {
        let invalid = MergerError::InvalidShrinkFactor { got: 0.5 };
        assert_eq!(invalid.code(), MergerErrorCode::InvalidShrinkFactor);
        assert_eq!(invalid.code().as_str(), "MERGER_INVALID_SHRINK_FACTOR");

        let rejected = MergerError::SubstitutionRejected {
            parent: 1,
            candidate: 2,
        };
        assert_eq!(rejected.code().as_str(), "MERGER_SUBSTITUTION_REJECTED");
        assert_eq!(
            rejected.to_string(),
            "hierarchy refused to substitute node 2 into live node 1"
        );
    }
}
