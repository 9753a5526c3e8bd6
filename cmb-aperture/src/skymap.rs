//! Pixelized full-sky temperature maps.
//!
//! A `SkyMap` couples a pixel value array (µK) to a [`RingGrid`]
//! resolution and an optional boolean keep-mask. Masked pixels and
//! non-finite values are excluded from every region mean. Maps are
//! treated as immutable during a measurement run; the mutating builders
//! below exist to assemble synthetic skies before measuring.
//!
//! Loading real map files is a job for an external reader; this crate
//! accepts whatever pixel vector it is handed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::direction::Direction;
use crate::error::PhotometryError;
use crate::grid::RingGrid;

/// A pixelized scalar temperature field tagged with its producing
/// pipeline (e.g. "smica", "nilc", "sevem").
#[derive(Debug, Clone)]
pub struct SkyMap {
    label: String,
    grid: RingGrid,
    values_uk: Vec<f64>,
    keep: Option<Vec<bool>>,
}

impl SkyMap {
    /// Wrap a pixel vector. Consistency with the grid is checked by
    /// [`SkyMap::validate`] at measurement time, so a corrupt map can be
    /// carried into a multi-map run and recorded as a per-map failure
    /// instead of aborting the batch.
    pub fn new(label: impl Into<String>, grid: RingGrid, values_uk: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            grid,
            values_uk,
            keep: None,
        }
    }

    /// Attach a boolean keep-mask (true = usable pixel).
    pub fn with_keep_mask(mut self, keep: Vec<bool>) -> Self {
        self.keep = Some(keep);
        self
    }

    /// Check that the pixel data (and mask, if any) match the grid.
    pub fn validate(&self) -> Result<(), PhotometryError> {
        let expected = self.grid.npix();
        if self.values_uk.is_empty() || self.values_uk.len() != expected {
            return Err(PhotometryError::MapUninitialized {
                label: self.label.clone(),
                expected,
                got: self.values_uk.len(),
            });
        }
        if let Some(keep) = &self.keep {
            if keep.len() != expected {
                return Err(PhotometryError::MapUninitialized {
                    label: self.label.clone(),
                    expected,
                    got: keep.len(),
                });
            }
        }
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn grid(&self) -> &RingGrid {
        &self.grid
    }

    /// Temperature of pixel `pix` (µK).
    pub fn value_uk(&self, pix: usize) -> f64 {
        self.values_uk[pix]
    }

    /// Whether pixel `pix` may enter a region mean: kept and finite.
    pub fn is_usable(&self, pix: usize) -> bool {
        let kept = self.keep.as_ref().map_or(true, |k| k[pix]);
        kept && self.values_uk[pix].is_finite()
    }

    // ── synthetic builders ──────────────────────────────────────────

    /// Uniform map: every pixel equals `value_uk`.
    pub fn constant(label: impl Into<String>, grid: RingGrid, value_uk: f64) -> Self {
        let npix = grid.npix();
        Self::new(label, grid, vec![value_uk; npix])
    }

    /// Statistically isotropic Gaussian noise map with standard deviation
    /// `sigma_uk`, seeded for reproducibility.
    pub fn gaussian_noise(label: impl Into<String>, grid: RingGrid, sigma_uk: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let npix = grid.npix();
        let values = (0..npix)
            .map(|_| {
                // Box-Muller from two uniforms
                let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
                let u2: f64 = rng.gen();
                sigma_uk
                    * (-2.0 * u1.ln()).sqrt()
                    * (2.0 * std::f64::consts::PI * u2).cos()
            })
            .collect();
        Self::new(label, grid, values)
    }

    /// Set every pixel whose center lies within `radius_deg` of `center`
    /// to `value_uk`.
    pub fn fill_disc(&mut self, center: &Direction, radius_deg: f64, value_uk: f64) {
        for pix in self.grid.query_disc(center, radius_deg) {
            self.values_uk[pix] = value_uk;
        }
    }

    /// Set every pixel whose center lies in the [inner, outer] annulus
    /// around `center` to `value_uk`.
    pub fn fill_annulus(
        &mut self,
        center: &Direction,
        inner_deg: f64,
        outer_deg: f64,
        value_uk: f64,
    ) {
        for pix in self.grid.query_annulus(center, inner_deg, outer_deg) {
            self.values_uk[pix] = value_uk;
        }
    }

    /// Add `offset_uk` to every pixel within `radius_deg` of `center`
    /// (e.g. inject a cold spot into a noise map).
    pub fn add_disc(&mut self, center: &Direction, radius_deg: f64, offset_uk: f64) {
        for pix in self.grid.query_disc(center, radius_deg) {
            self.values_uk[pix] += offset_uk;
        }
    }
}
