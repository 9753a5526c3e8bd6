//! Error kinds for the measurement harness.

use thiserror::Error;

/// Everything that can go wrong in a measurement run.
///
/// `InvalidDirection`, `InvalidAperture` and `InvalidConfig` are input
/// validation failures and abort a run before any map processing.
/// `MapUninitialized` and `InsufficientPixels` are fatal for one map but
/// recoverable at the multi-map level. `MaskedRegionExhausted` degrades
/// individual null trials and only fails the run when too few trials
/// survive to form a distribution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhotometryError {
    /// Malformed sky coordinate.
    #[error("invalid direction (lon={lon}, lat={lat}): {reason}")]
    InvalidDirection {
        lon: f64,
        lat: f64,
        reason: &'static str,
    },

    /// Map data absent or inconsistent with the requested resolution.
    #[error("map '{label}' uninitialized: expected {expected} pixels, got {got}")]
    MapUninitialized {
        label: String,
        expected: usize,
        got: usize,
    },

    /// Aperture geometry violating rim_inner ≥ core > 0 < rim_outer.
    #[error("invalid aperture: {reason}")]
    InvalidAperture { reason: &'static str },

    /// Core or rim ended up with fewer usable pixels than required.
    #[error("insufficient pixels: core={n_core}, rim={n_rim}, required {min_pix} each")]
    InsufficientPixels {
        n_core: usize,
        n_rim: usize,
        min_pix: usize,
    },

    /// Too few null trials survived the retry budget.
    #[error("null trials exhausted: {completed}/{requested} completed, {required} required")]
    MaskedRegionExhausted {
        completed: usize,
        requested: usize,
        required: usize,
    },

    /// Malformed run configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
