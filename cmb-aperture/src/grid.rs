//! Iso-latitude, near-equal-area pixelization of the sphere.
//!
//! The sphere is cut into `n_rings` latitude bands of equal colatitude
//! width; ring i carries `max(1, round(2·n·sin θ_i))` equal-width
//! longitude cells, where θ_i is the ring's center colatitude. The cell
//! solid angle is then close to uniform across the sphere (band area
//! scales with sin θ, and so does the cell count).
//!
//! Pixels are indexed ring-major: ring 0 starts at the north pole, cells
//! run west→east from longitude 0. Membership queries test the
//! great-circle distance of each candidate cell center, which stays
//! exact at the tens-of-degrees radii used for nearby voids.

use crate::direction::Direction;

/// Ring-grid pixelization at a fixed resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RingGrid {
    n_rings: usize,
    /// Cells per ring.
    ring_cells: Vec<usize>,
    /// Cumulative first pixel index per ring; last entry is npix.
    ring_start: Vec<usize>,
}

impl RingGrid {
    /// Build a grid with `n_rings` latitude bands.
    ///
    /// Resolution scale: the band height is 180°/n_rings, which is also
    /// the rough angular pixel size.
    pub fn new(n_rings: usize) -> Self {
        assert!(n_rings >= 2, "grid needs at least 2 rings");
        let band_deg = 180.0 / n_rings as f64;
        let mut ring_cells = Vec::with_capacity(n_rings);
        let mut ring_start = Vec::with_capacity(n_rings + 1);
        ring_start.push(0usize);
        for i in 0..n_rings {
            let theta = ((i as f64 + 0.5) * band_deg).to_radians();
            let cells = ((2.0 * n_rings as f64 * theta.sin()).round() as usize).max(1);
            ring_cells.push(cells);
            ring_start.push(ring_start[i] + cells);
        }
        Self {
            n_rings,
            ring_cells,
            ring_start,
        }
    }

    /// Number of latitude rings.
    pub fn n_rings(&self) -> usize {
        self.n_rings
    }

    /// Total number of pixels.
    pub fn npix(&self) -> usize {
        self.ring_start[self.n_rings]
    }

    /// Colatitude band height in degrees (the rough pixel scale).
    pub fn band_deg(&self) -> f64 {
        180.0 / self.n_rings as f64
    }

    /// Pixel index containing `dir`.
    pub fn pixel_of(&self, dir: &Direction) -> usize {
        let band = self.band_deg();
        let colat = 90.0 - dir.lat_deg();
        let ring = ((colat / band) as usize).min(self.n_rings - 1);
        let cells = self.ring_cells[ring];
        let cell = ((dir.lon_deg() / 360.0 * cells as f64) as usize).min(cells - 1);
        self.ring_start[ring] + cell
    }

    /// Center direction of pixel `pix`.
    ///
    /// Panics if `pix` is out of range.
    pub fn center_of(&self, pix: usize) -> Direction {
        assert!(pix < self.npix(), "pixel index {} out of range", pix);
        let ring = self.ring_start.partition_point(|&s| s <= pix) - 1;
        let cell = pix - self.ring_start[ring];
        self.center_at(ring, cell)
    }

    fn center_at(&self, ring: usize, cell: usize) -> Direction {
        let band = self.band_deg();
        let lat = 90.0 - (ring as f64 + 0.5) * band;
        let lon = (cell as f64 + 0.5) * 360.0 / self.ring_cells[ring] as f64;
        Direction::from_valid(lon, lat)
    }

    /// All pixels whose centers lie within `radius_deg` of `center`
    /// (great-circle distance), in ascending index order.
    pub fn query_disc(&self, center: &Direction, radius_deg: f64) -> Vec<usize> {
        self.query_annulus(center, 0.0, radius_deg)
    }

    /// All pixels whose centers lie at a great-circle distance in
    /// [`inner_deg`, `outer_deg`] from `center`, in ascending index order.
    pub fn query_annulus(&self, center: &Direction, inner_deg: f64, outer_deg: f64) -> Vec<usize> {
        let mut out = Vec::new();
        if outer_deg <= 0.0 || outer_deg < inner_deg {
            return out;
        }
        let band = self.band_deg();
        let colat_c = 90.0 - center.lat_deg();
        for ring in 0..self.n_rings {
            // Ring centers sit at a fixed colatitude; skip rings whose
            // centers cannot fall inside the outer radius.
            let theta_i = (ring as f64 + 0.5) * band;
            if (theta_i - colat_c).abs() > outer_deg {
                continue;
            }
            let start = self.ring_start[ring];
            for cell in 0..self.ring_cells[ring] {
                let sep = center.separation_deg(&self.center_at(ring, cell));
                if sep >= inner_deg && sep <= outer_deg {
                    out.push(start + cell);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_layout_is_consistent() {
        let grid = RingGrid::new(32);
        assert_eq!(grid.ring_start.len(), 33);
        let total: usize = grid.ring_cells.iter().sum();
        assert_eq!(total, grid.npix());
    }

    #[test]
    fn equatorial_rings_carry_most_cells() {
        let grid = RingGrid::new(64);
        let polar = grid.ring_cells[0];
        let equatorial = grid.ring_cells[32];
        assert!(
            equatorial > 10 * polar,
            "equator {} vs pole {}",
            equatorial,
            polar
        );
    }

    #[test]
    fn pixel_center_round_trip() {
        let grid = RingGrid::new(48);
        for pix in 0..grid.npix() {
            let center = grid.center_of(pix);
            assert_eq!(
                grid.pixel_of(&center),
                pix,
                "round trip failed at pixel {} (center {:?})",
                pix,
                center
            );
        }
    }

    #[test]
    fn poles_map_to_polar_rings() {
        let grid = RingGrid::new(32);
        let north = Direction::new(0.0, 90.0).unwrap();
        let south = Direction::new(180.0, -90.0).unwrap();
        assert!(grid.pixel_of(&north) < grid.ring_cells[0]);
        assert!(grid.pixel_of(&south) >= grid.npix() - grid.ring_cells[31]);
    }

    #[test]
    fn full_sphere_disc_returns_every_pixel() {
        let grid = RingGrid::new(24);
        let center = Direction::new(45.0, 10.0).unwrap();
        let all = grid.query_disc(&center, 180.0);
        assert_eq!(all.len(), grid.npix());
    }

    #[test]
    fn disc_members_lie_within_radius() {
        let grid = RingGrid::new(64);
        let center = Direction::new(222.5, 46.0).unwrap();
        let radius = 12.0;
        let disc = grid.query_disc(&center, radius);
        assert!(!disc.is_empty());
        for &pix in &disc {
            let sep = center.separation_deg(&grid.center_of(pix));
            assert!(sep <= radius, "pixel {} at {}° > {}°", pix, sep, radius);
        }
    }

    #[test]
    fn larger_disc_contains_smaller() {
        let grid = RingGrid::new(64);
        let center = Direction::new(10.0, -30.0).unwrap();
        let small = grid.query_disc(&center, 5.0);
        let large = grid.query_disc(&center, 10.0);
        assert!(large.len() > small.len());
        for pix in &small {
            assert!(large.contains(pix));
        }
    }

    #[test]
    fn annulus_excludes_inner_disc() {
        let grid = RingGrid::new(64);
        let center = Direction::new(100.0, 20.0).unwrap();
        let annulus = grid.query_annulus(&center, 5.0, 10.0);
        assert!(!annulus.is_empty());
        for &pix in &annulus {
            let sep = center.separation_deg(&grid.center_of(pix));
            assert!(
                (5.0..=10.0).contains(&sep),
                "pixel {} at {}° outside [5, 10]",
                pix,
                sep
            );
        }
    }

    #[test]
    fn disc_pixel_count_tracks_area() {
        // A 10° disc covers ~π·10² of the 4π·(180/π)² deg² sphere; the
        // pixel count should match that fraction within discretization.
        let grid = RingGrid::new(128);
        let center = Direction::new(0.0, 0.0).unwrap();
        let disc = grid.query_disc(&center, 10.0);
        let sphere_deg2 = 4.0 * std::f64::consts::PI * (180.0 / std::f64::consts::PI).powi(2);
        let expected = std::f64::consts::PI * 100.0 / sphere_deg2 * grid.npix() as f64;
        let got = disc.len() as f64;
        assert!(
            (got - expected).abs() / expected < 0.2,
            "got {} pixels, expected ~{}",
            got,
            expected
        );
    }

    #[test]
    fn query_results_are_sorted_and_unique() {
        let grid = RingGrid::new(48);
        let center = Direction::new(300.0, 70.0).unwrap();
        let disc = grid.query_disc(&center, 25.0);
        for w in disc.windows(2) {
            assert!(w[0] < w[1]);
        }
    }
}
