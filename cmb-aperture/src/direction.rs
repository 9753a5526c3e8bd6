//! Sky coordinates and great-circle geometry.

use serde::Serialize;

use crate::error::PhotometryError;

/// Galactic north pole in ICRS (J2000), degrees.
const ALPHA_NGP_DEG: f64 = 192.859_48;
const DELTA_NGP_DEG: f64 = 27.128_25;
/// Galactic longitude of the north celestial pole, degrees.
const L_NCP_DEG: f64 = 122.931_92;

/// An immutable sky direction: longitude/latitude in degrees.
///
/// The frame is whatever the surrounding map uses (galactic throughout
/// this crate); construction normalizes the longitude into [0, 360) and
/// rejects non-finite input or latitudes outside [−90, 90].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Direction {
    lon_deg: f64,
    lat_deg: f64,
}

impl Direction {
    /// Validated constructor.
    pub fn new(lon_deg: f64, lat_deg: f64) -> Result<Self, PhotometryError> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return Err(PhotometryError::InvalidDirection {
                lon: lon_deg,
                lat: lat_deg,
                reason: "coordinates must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat_deg) {
            return Err(PhotometryError::InvalidDirection {
                lon: lon_deg,
                lat: lat_deg,
                reason: "latitude outside [-90, 90]",
            });
        }
        Ok(Self {
            lon_deg: lon_deg.rem_euclid(360.0),
            lat_deg,
        })
    }

    /// Build a galactic direction from equatorial RA/Dec (ICRS, degrees).
    pub fn from_equatorial(ra_deg: f64, dec_deg: f64) -> Result<Self, PhotometryError> {
        if !ra_deg.is_finite() || !dec_deg.is_finite() || !(-90.0..=90.0).contains(&dec_deg) {
            return Err(PhotometryError::InvalidDirection {
                lon: ra_deg,
                lat: dec_deg,
                reason: "equatorial coordinates out of range",
            });
        }
        let a = ra_deg.to_radians();
        let d = dec_deg.to_radians();
        let a_ngp = ALPHA_NGP_DEG.to_radians();
        let d_ngp = DELTA_NGP_DEG.to_radians();

        let sin_b = d_ngp.sin() * d.sin() + d_ngp.cos() * d.cos() * (a - a_ngp).cos();
        let b = sin_b.clamp(-1.0, 1.0).asin();
        // l_NCP − l from the spherical triangle through the galactic pole
        let y = d.cos() * (a - a_ngp).sin();
        let x = d_ngp.cos() * d.sin() - d_ngp.sin() * d.cos() * (a - a_ngp).cos();
        let l = L_NCP_DEG - y.atan2(x).to_degrees();

        Direction::new(l, b.to_degrees())
    }

    /// Construct from coordinates already known to be in range.
    pub(crate) fn from_valid(lon_deg: f64, lat_deg: f64) -> Self {
        debug_assert!((0.0..360.0).contains(&lon_deg));
        debug_assert!((-90.0..=90.0).contains(&lat_deg));
        Self { lon_deg, lat_deg }
    }

    /// Longitude in degrees, in [0, 360).
    pub fn lon_deg(&self) -> f64 {
        self.lon_deg
    }

    /// Latitude in degrees, in [−90, 90].
    pub fn lat_deg(&self) -> f64 {
        self.lat_deg
    }

    /// Great-circle separation to `other`, in degrees.
    ///
    /// Haversine form: stable for small separations and exact on the
    /// full sphere, with no flat-sky approximation. That matters at the
    /// tens-of-degrees radii of nearby voids.
    pub fn separation_deg(&self, other: &Direction) -> f64 {
        let b1 = self.lat_deg.to_radians();
        let b2 = other.lat_deg.to_radians();
        let dlat = b2 - b1;
        let dlon = (other.lon_deg - self.lon_deg).to_radians();
        let s = (dlat / 2.0).sin().powi(2) + b1.cos() * b2.cos() * (dlon / 2.0).sin().powi(2);
        (2.0 * s.sqrt().min(1.0).asin()).to_degrees()
    }
}
