//! Physical constants in SI units.
//!
//! Values from CODATA 2018 / IAU 2015, matching the Planck-era parameter
//! choices used throughout the toy model.

/// Speed of light (m/s)
pub const C: f64 = 299_792_458.0;

/// Gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.674_30e-11;

/// One megaparsec (m)
pub const MPC: f64 = 3.085_677_581_491_367e22;

/// CMB monopole temperature (K)
pub const T_CMB: f64 = 2.725;

/// Kelvin → microkelvin
pub const KELVIN_TO_UK: f64 = 1e6;

/// erg → Joule
pub const ERG_TO_JOULE: f64 = 1e-7;

/// Convert a Hubble parameter in km/s/Mpc to SI (1/s).
pub fn h0_si(h0_km_s_mpc: f64) -> f64 {
    h0_km_s_mpc * 1e3 / MPC
}

/// Volume of a sphere of radius `radius_m` (m³).
pub fn sphere_volume_m3(radius_m: f64) -> f64 {
    (4.0 / 3.0) * std::f64::consts::PI * radius_m.powi(3)
}
