use crate::error::{Error, Result};

/// Tunables for the spring embedder.
///
/// The defaults reproduce the editor's historical layout; changing them changes every converged
/// position. Deserializes from partial JSON, with missing fields taking their defaults.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Edge length at which the spring force vanishes.
    pub ideal_length: f64,
    /// Linear scale on the spring term.
    pub force_strength: f64,
    /// Per-degree damping base: forces are scaled by `stretch_factor ^ (deg_from + deg_to - 4)`.
    pub stretch_factor: f64,
    /// A pass counts as moving when some edge displaces an endpoint by more than this on an axis.
    pub min_movement_threshold: f64,
    /// Length substituted for a zero-length edge.
    pub degenerate_length: f64,
    /// Upper bound on full passes over the edge list. `None` loops until convergence.
    pub max_passes: Option<usize>,
    /// Seed for the jitter applied to (near-)coincident endpoints.
    pub random_seed: u64,
}

impl LayoutOptions {
    pub const DEFAULT_IDEAL_LENGTH: f64 = 500.0;
    pub const DEFAULT_FORCE_STRENGTH: f64 = 1.0 / 3.0;
    pub const DEFAULT_STRETCH_FACTOR: f64 = 0.70;
    pub const DEFAULT_MIN_MOVEMENT_THRESHOLD: f64 = 0.1;
    pub const DEFAULT_DEGENERATE_LENGTH: f64 = 0.99;
    pub const DEFAULT_MAX_PASSES: usize = 10_000;

    /// Drops the pass cap, matching the historical unbounded loop.
    pub fn unbounded(mut self) -> Self {
        self.max_passes = None;
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    pub fn with_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = random_seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(message: String) -> Result<()> {
            Err(Error::InvalidOptions { message })
        }

        if !(self.ideal_length.is_finite() && self.ideal_length > 0.0) {
            return invalid(format!(
                "ideal_length must be positive and finite, got {}",
                self.ideal_length
            ));
        }
        if !self.force_strength.is_finite() {
            return invalid(format!(
                "force_strength must be finite, got {}",
                self.force_strength
            ));
        }
        if !(self.stretch_factor.is_finite() && self.stretch_factor > 0.0) {
            return invalid(format!(
                "stretch_factor must be positive and finite, got {}",
                self.stretch_factor
            ));
        }
        if !(self.min_movement_threshold.is_finite() && self.min_movement_threshold >= 0.0) {
            return invalid(format!(
                "min_movement_threshold must be non-negative and finite, got {}",
                self.min_movement_threshold
            ));
        }
        if !(self.degenerate_length.is_finite() && self.degenerate_length > 0.0) {
            return invalid(format!(
                "degenerate_length must be positive and finite, got {}",
                self.degenerate_length
            ));
        }
        if self.max_passes == Some(0) {
            return invalid("max_passes must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            ideal_length: Self::DEFAULT_IDEAL_LENGTH,
            force_strength: Self::DEFAULT_FORCE_STRENGTH,
            stretch_factor: Self::DEFAULT_STRETCH_FACTOR,
            min_movement_threshold: Self::DEFAULT_MIN_MOVEMENT_THRESHOLD,
            degenerate_length: Self::DEFAULT_DEGENERATE_LENGTH,
            max_passes: Some(Self::DEFAULT_MAX_PASSES),
            random_seed: 0,
        }
    }
}
