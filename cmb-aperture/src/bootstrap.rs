//! Bootstrap uncertainty for a single aperture measurement.
//!
//! The core and rim pixel sets are resampled independently with
//! replacement to their original cardinalities; ΔT is recomputed for
//! each resample; the standard deviation of the resulting distribution
//! is the reported uncertainty σ_boot.
//!
//! Iterations are independent and run over the rayon pool when the
//! `parallel` feature is on. Each iteration seeds its own RNG from a
//! derived stream (see [`crate::config::stream_seed`]), so the resampled
//! sequence is bit-identical for a given seed no matter how iterations
//! are scheduled.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use serde::Serialize;

use crate::config::{stream_seed, BOOTSTRAP_STREAM};
use crate::error::PhotometryError;
use crate::photometry::PhotometryResult;
use crate::stats::{mean, sample_std};

/// Summary of the resampled ΔT distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapEstimate {
    /// Mean of the resampled ΔT values (µK)
    pub mean_uk: f64,
    /// σ_boot: standard deviation of the resampled ΔT values (µK)
    pub std_dev_uk: f64,
    /// Resample count
    pub iterations: usize,
}

/// Mean of `n` draws with replacement from `values`.
fn resampled_mean(values: &[f64], rng: &mut StdRng) -> f64 {
    let n = values.len();
    let mut sum = 0.0;
    for _ in 0..n {
        sum += values[rng.gen_range(0..n)];
    }
    sum / n as f64
}

fn resample_delta_t(core: &[f64], rim: &[f64], seed: u64) -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    resampled_mean(core, &mut rng) - resampled_mean(rim, &mut rng)
}

/// The full resampled ΔT sequence, in iteration order.
pub fn bootstrap_distribution(
    result: &PhotometryResult,
    iterations: usize,
    seed: u64,
) -> Result<Vec<f64>, PhotometryError> {
    if iterations == 0 {
        return Err(PhotometryError::InvalidConfig {
            reason: "bootstrap iterations must be >= 1".into(),
        });
    }
    if result.core_values_uk.is_empty() || result.rim_values_uk.is_empty() {
        return Err(PhotometryError::InsufficientPixels {
            n_core: result.core_values_uk.len(),
            n_rim: result.rim_values_uk.len(),
            min_pix: 1,
        });
    }

    let core = &result.core_values_uk;
    let rim = &result.rim_values_uk;

    #[cfg(feature = "parallel")]
    let samples: Vec<f64> = (0..iterations)
        .into_par_iter()
        .map(|i| resample_delta_t(core, rim, stream_seed(seed, BOOTSTRAP_STREAM + i as u64)))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let samples: Vec<f64> = (0..iterations)
        .map(|i| resample_delta_t(core, rim, stream_seed(seed, BOOTSTRAP_STREAM + i as u64)))
        .collect();

    Ok(samples)
}

/// Bootstrap the measurement and summarize the distribution.
pub fn bootstrap(
    result: &PhotometryResult,
    iterations: usize,
    seed: u64,
) -> Result<BootstrapEstimate, PhotometryError> {
    let samples = bootstrap_distribution(result, iterations, seed)?;
    let m = mean(&samples);
    Ok(BootstrapEstimate {
        mean_uk: m,
        std_dev_uk: sample_std(&samples, m),
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::grid::RingGrid;
    use crate::photometry::{measure, Aperture};
    use crate::skymap::SkyMap;

    fn noisy_result() -> PhotometryResult {
        let grid = RingGrid::new(128);
        let map = SkyMap::gaussian_noise("n", grid, 10.0, 11);
        let target = Direction::new(180.0, 40.0).unwrap();
        let aperture = Aperture::new(5.0, 5.0, 10.0).unwrap();
        measure(&map, &target, &aperture, 1).unwrap()
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let r = noisy_result();
        let a = bootstrap_distribution(&r, 200, 5).unwrap();
        let b = bootstrap_distribution(&r, 200, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let r = noisy_result();
        let a = bootstrap_distribution(&r, 50, 5).unwrap();
        let b = bootstrap_distribution(&r, 50, 6).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn mean_converges_to_measured_delta_t() {
        // E[resampled ΔT] equals the measured ΔT; at 1000 iterations the
        // bootstrap mean should sit well within σ_boot of it.
        let r = noisy_result();
        let est = bootstrap(&r, 1000, 5).unwrap();
        assert!(
            (est.mean_uk - r.delta_t_uk).abs() < 0.3 * est.std_dev_uk.max(1e-12),
            "bootstrap mean {} vs ΔT {} (σ_boot {})",
            est.mean_uk,
            r.delta_t_uk,
            est.std_dev_uk
        );
    }

    #[test]
    fn zero_variance_input_gives_zero_sigma() {
        let grid = RingGrid::new(96);
        let map = SkyMap::constant("flat", grid, 6.5);
        let target = Direction::new(0.0, 0.0).unwrap();
        let aperture = Aperture::new(5.0, 5.0, 10.0).unwrap();
        let r = measure(&map, &target, &aperture, 1).unwrap();
        let est = bootstrap(&r, 100, 1).unwrap();
        assert_eq!(est.mean_uk, 0.0);
        assert_eq!(est.std_dev_uk, 0.0);
    }

    #[test]
    fn sigma_tracks_pixel_scatter() {
        // σ_boot ≈ σ_pix·√(1/n_core + 1/n_rim); check the right order.
        let r = noisy_result();
        let est = bootstrap(&r, 1000, 9).unwrap();
        let expected = 10.0 * (1.0 / r.n_core as f64 + 1.0 / r.n_rim as f64).sqrt();
        assert!(
            est.std_dev_uk > 0.4 * expected && est.std_dev_uk < 2.5 * expected,
            "σ_boot = {}, expected ≈ {}",
            est.std_dev_uk,
            expected
        );
    }

    #[test]
    fn zero_iterations_rejected() {
        let r = noisy_result();
        assert!(matches!(
            bootstrap_distribution(&r, 0, 1),
            Err(PhotometryError::InvalidConfig { .. })
        ));
    }
}
