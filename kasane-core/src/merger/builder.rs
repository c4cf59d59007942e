//! Builder for [`LocalBiconnectedMerger`].

use crate::error::MergerError;

use super::LocalBiconnectedMerger;

pub(crate) const DEFAULT_SHRINK_FACTOR: f64 = 2.0;
pub(crate) const DEFAULT_RNG_SEED: u64 = 42;

/// Configures and constructs [`LocalBiconnectedMerger`] instances.
///
/// # Examples
/// ```
/// use kasane_core::MergerBuilder;
///
/// let merger = MergerBuilder::new()
///     .with_shrink_factor(3.0)
///     .with_adjust_edge_lengths(true)
///     .with_rng_seed(7)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(merger.shrink_factor(), 3.0);
/// assert!(merger.adjust_edge_lengths());
/// ```
#[derive(Debug, Clone)]
pub struct MergerBuilder {
    shrink_factor: f64,
    adjust_edge_lengths: bool,
    rng_seed: u64,
}

impl Default for MergerBuilder {
    fn default() -> Self {
        Self {
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            adjust_edge_lengths: false,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl MergerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use kasane_core::MergerBuilder;
    ///
    /// let builder = MergerBuilder::new();
    /// assert_eq!(builder.shrink_factor(), 2.0);
    /// assert!(!builder.adjust_edge_lengths());
    /// assert_eq!(builder.rng_seed(), 42);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the ratio by which one pass aims to shrink the node count.
    #[must_use]
    pub fn with_shrink_factor(mut self, factor: f64) -> Self {
        self.shrink_factor = factor;
        self
    }

    /// Returns the configured shrink factor.
    #[must_use]
    #[rustfmt::skip]
    pub fn shrink_factor(&self) -> f64 { self.shrink_factor }

    /// Enables adding the collapsed edge's length to every moved edge.
    #[must_use]
    pub fn with_adjust_edge_lengths(mut self, adjust: bool) -> Self {
        self.adjust_edge_lengths = adjust;
        self
    }

    /// Returns whether moved edges absorb the collapsed edge's length.
    #[must_use]
    #[rustfmt::skip]
    pub fn adjust_edge_lengths(&self) -> bool { self.adjust_edge_lengths }

    /// Seeds the random source used for candidate selection.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    #[rustfmt::skip]
    pub fn rng_seed(&self) -> u64 { self.rng_seed }

    /// Validates the configuration and constructs a merger.
    ///
    /// # Errors
    /// Returns [`MergerError::InvalidShrinkFactor`] unless the shrink factor
    /// is finite and greater than one.
    ///
    /// # Examples
    /// ```
    /// use kasane_core::{MergerBuilder, MergerError};
    ///
    /// let err = MergerBuilder::new().with_shrink_factor(1.0).build().unwrap_err();
    /// assert!(matches!(err, MergerError::InvalidShrinkFactor { .. }));
    /// ```
    pub fn build(self) -> Result<LocalBiconnectedMerger, MergerError> {
        let shrink_factor = validate_shrink_factor(self.shrink_factor)?;
        Ok(LocalBiconnectedMerger::new(
            shrink_factor,
            self.adjust_edge_lengths,
            self.rng_seed,
        ))
    }
}

pub(crate) fn validate_shrink_factor(factor: f64) -> Result<f64, MergerError> {
    if factor.is_finite() && factor > 1.0 {
        Ok(factor)
    } else {
        Err(MergerError::InvalidShrinkFactor { got: factor })
    }
}
