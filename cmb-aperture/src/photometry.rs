//! The core-minus-rim aperture statistic.
//!
//! For one (map, direction, aperture) triple: collect the usable pixel
//! values whose centers fall inside the core disc and inside the rim
//! annulus (excluding the core disc), take the arithmetic mean of each
//! region, and form
//!
//! ```text
//! ΔT = <T>_core − <T>_rim
//! ```
//!
//! This step is deterministic (same inputs, identical ΔT) and pure; the
//! stochastic machinery lives in [`crate::bootstrap`] and
//! [`crate::nulls`].

use std::collections::HashSet;

use serde::Serialize;

use crate::direction::Direction;
use crate::error::PhotometryError;
use crate::skymap::SkyMap;
use crate::stats::mean;

/// Core-disc + rim-annulus template centered on a sky direction.
///
/// Invariant: 0 < core ≤ rim_inner < rim_outer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Aperture {
    core_radius_deg: f64,
    rim_inner_deg: f64,
    rim_outer_deg: f64,
}

impl Aperture {
    /// Validated constructor.
    pub fn new(
        core_radius_deg: f64,
        rim_inner_deg: f64,
        rim_outer_deg: f64,
    ) -> Result<Self, PhotometryError> {
        if !core_radius_deg.is_finite() || !rim_inner_deg.is_finite() || !rim_outer_deg.is_finite()
        {
            return Err(PhotometryError::InvalidAperture {
                reason: "radii must be finite",
            });
        }
        if core_radius_deg <= 0.0 {
            return Err(PhotometryError::InvalidAperture {
                reason: "core radius must be positive",
            });
        }
        if rim_inner_deg < core_radius_deg {
            return Err(PhotometryError::InvalidAperture {
                reason: "rim inner radius must be >= core radius",
            });
        }
        if rim_outer_deg <= rim_inner_deg {
            return Err(PhotometryError::InvalidAperture {
                reason: "rim outer radius must exceed rim inner radius",
            });
        }
        Ok(Self {
            core_radius_deg,
            rim_inner_deg,
            rim_outer_deg,
        })
    }

    /// Aperture scaled from a void angular radius θ_R, in the fractional
    /// parametrization used for real void targets (core = core_frac·θ_R,
    /// rim = [rim_in_frac, rim_out_frac]·θ_R).
    pub fn scaled(
        theta_r_deg: f64,
        core_frac: f64,
        rim_in_frac: f64,
        rim_out_frac: f64,
    ) -> Result<Self, PhotometryError> {
        if theta_r_deg <= 0.0 || !theta_r_deg.is_finite() {
            return Err(PhotometryError::InvalidAperture {
                reason: "void angular radius must be positive",
            });
        }
        Self::new(
            core_frac * theta_r_deg,
            rim_in_frac * theta_r_deg,
            rim_out_frac * theta_r_deg,
        )
    }

    pub fn core_radius_deg(&self) -> f64 {
        self.core_radius_deg
    }

    pub fn rim_inner_deg(&self) -> f64 {
        self.rim_inner_deg
    }

    pub fn rim_outer_deg(&self) -> f64 {
        self.rim_outer_deg
    }
}

/// One aperture measurement. Immutable after creation.
///
/// The raw per-region pixel values feed the bootstrap and are not part
/// of the serialized record.
#[derive(Debug, Clone, Serialize)]
pub struct PhotometryResult {
    /// ΔT = core mean − rim mean (µK)
    pub delta_t_uk: f64,
    /// Core disc mean temperature (µK)
    pub core_mean_uk: f64,
    /// Rim annulus mean temperature (µK)
    pub rim_mean_uk: f64,
    /// Usable pixels contributing to the core
    pub n_core: usize,
    /// Usable pixels contributing to the rim
    pub n_rim: usize,
    #[serde(skip)]
    pub core_values_uk: Vec<f64>,
    #[serde(skip)]
    pub rim_values_uk: Vec<f64>,
}

/// Compute the core-minus-rim statistic for one (map, direction,
/// aperture) triple.
///
/// Fails with `MapUninitialized` if the map data do not match its grid,
/// and with `InsufficientPixels` if either region ends up with fewer
/// than `min_pix` usable pixels (aperture too small for the resolution,
/// or the region is masked away).
pub fn measure(
    map: &SkyMap,
    target: &Direction,
    aperture: &Aperture,
    min_pix: usize,
) -> Result<PhotometryResult, PhotometryError> {
    map.validate()?;
    let grid = map.grid();

    let core_pix = grid.query_disc(target, aperture.core_radius_deg());
    let core_set: HashSet<usize> = core_pix.iter().copied().collect();
    let core_values: Vec<f64> = core_pix
        .iter()
        .filter(|&&p| map.is_usable(p))
        .map(|&p| map.value_uk(p))
        .collect();

    // The annulus excludes the core disc; with rim_inner >= core the two
    // only meet on the shared boundary circle.
    let rim_values: Vec<f64> = grid
        .query_annulus(target, aperture.rim_inner_deg(), aperture.rim_outer_deg())
        .iter()
        .filter(|&&p| !core_set.contains(&p) && map.is_usable(p))
        .map(|&p| map.value_uk(p))
        .collect();

    if core_values.len() < min_pix || rim_values.len() < min_pix {
        return Err(PhotometryError::InsufficientPixels {
            n_core: core_values.len(),
            n_rim: rim_values.len(),
            min_pix,
        });
    }

    let core_mean = mean(&core_values);
    let rim_mean = mean(&rim_values);
    Ok(PhotometryResult {
        delta_t_uk: core_mean - rim_mean,
        core_mean_uk: core_mean,
        rim_mean_uk: rim_mean,
        n_core: core_values.len(),
        n_rim: rim_values.len(),
        core_values_uk: core_values,
        rim_values_uk: rim_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::RingGrid;

    fn target() -> Direction {
        Direction::new(180.0, 40.0).unwrap()
    }

    fn aperture() -> Aperture {
        Aperture::new(5.0, 5.0, 10.0).unwrap()
    }

    #[test]
    fn aperture_invariants_enforced() {
        assert!(Aperture::new(0.0, 5.0, 10.0).is_err());
        assert!(Aperture::new(-1.0, 5.0, 10.0).is_err());
        assert!(Aperture::new(6.0, 5.0, 10.0).is_err());
        assert!(Aperture::new(5.0, 5.0, 5.0).is_err());
        assert!(Aperture::new(5.0, 5.0, 10.0).is_ok());
        assert!(Aperture::new(f64::NAN, 5.0, 10.0).is_err());
    }

    #[test]
    fn scaled_aperture_matches_fractions() {
        let ap = Aperture::scaled(14.0, 0.6, 0.8, 1.2).unwrap();
        assert!((ap.core_radius_deg() - 8.4).abs() < 1e-12);
        assert!((ap.rim_inner_deg() - 11.2).abs() < 1e-12);
        assert!((ap.rim_outer_deg() - 16.8).abs() < 1e-12);
    }

    #[test]
    fn uniform_map_gives_exactly_zero() {
        // Means of identical values are exact for dyadic constants, so
        // ΔT must be exactly 0 whatever the aperture.
        for c in [0.0, 1.0, -42.5, 3.25, 100.0] {
            let map = SkyMap::constant("flat", RingGrid::new(128), c);
            let r = measure(&map, &target(), &aperture(), 1).unwrap();
            assert_eq!(r.delta_t_uk, 0.0, "ΔT != 0 for c = {}", c);
            assert_eq!(r.core_mean_uk, c);
            assert_eq!(r.rim_mean_uk, c);
        }
    }

    #[test]
    fn step_map_recovers_step_exactly() {
        let grid = RingGrid::new(128);
        let t = target();
        let mut map = SkyMap::constant("step", grid, -7.0);
        map.fill_annulus(&t, 5.0, 10.0, 5.0);
        map.fill_disc(&t, 5.0, 15.0);
        let r = measure(&map, &t, &aperture(), 1).unwrap();
        assert_eq!(r.core_mean_uk, 15.0);
        assert_eq!(r.rim_mean_uk, 5.0);
        assert_eq!(r.delta_t_uk, 10.0);
    }

    #[test]
    fn measurement_is_deterministic() {
        let grid = RingGrid::new(96);
        let map = SkyMap::gaussian_noise("n", grid, 10.0, 3);
        let a = measure(&map, &target(), &aperture(), 1).unwrap();
        let b = measure(&map, &target(), &aperture(), 1).unwrap();
        assert_eq!(a.delta_t_uk, b.delta_t_uk);
        assert_eq!(a.n_core, b.n_core);
        assert_eq!(a.n_rim, b.n_rim);
    }

    #[test]
    fn core_and_rim_do_not_overlap() {
        // Mark the core region; no marked pixel may leak into the rim.
        let grid = RingGrid::new(64);
        let t = target();
        let mut map = SkyMap::constant("probe", grid, 0.0);
        map.fill_disc(&t, 5.0, 1000.0);
        let r = measure(&map, &t, &aperture(), 1).unwrap();
        assert!(
            r.rim_values_uk.iter().all(|&v| v == 0.0),
            "core pixels leaked into the rim"
        );
    }

    #[test]
    fn sub_pixel_aperture_is_insufficient_not_wrong() {
        // Pixel scale at 16 rings is ~11°; a 0.4° aperture must fail
        // loudly rather than return a tiny-sample average.
        let map = SkyMap::constant("coarse", RingGrid::new(16), 1.0);
        let ap = Aperture::new(0.4, 0.4, 0.8).unwrap();
        match measure(&map, &target(), &ap, 5) {
            Err(PhotometryError::InsufficientPixels { min_pix, .. }) => assert_eq!(min_pix, 5),
            other => panic!("expected InsufficientPixels, got {:?}", other),
        }
    }

    #[test]
    fn fully_masked_region_is_insufficient() {
        let grid = RingGrid::new(64);
        let npix = grid.npix();
        let map = SkyMap::constant("masked", grid, 1.0).with_keep_mask(vec![false; npix]);
        assert!(matches!(
            measure(&map, &target(), &aperture(), 1),
            Err(PhotometryError::InsufficientPixels { .. })
        ));
    }

    #[test]
    fn nan_pixels_are_excluded_from_means() {
        let grid = RingGrid::new(64);
        let t = target();
        let core = grid.query_disc(&t, 5.0);
        let mut values = vec![2.0; grid.npix()];
        values[core[0]] = f64::NAN;
        let map = SkyMap::new("nan", grid, values);
        let r = measure(&map, &t, &aperture(), 1).unwrap();
        assert_eq!(r.n_core, core.len() - 1);
        assert_eq!(r.delta_t_uk, 0.0);
    }

    #[test]
    fn corrupt_map_fails_with_uninitialized() {
        let map = SkyMap::new("bad", RingGrid::new(32), vec![0.0; 7]);
        assert!(matches!(
            measure(&map, &target(), &aperture(), 1),
            Err(PhotometryError::MapUninitialized { .. })
        ));
    }
}
