//! Void geometry → CMB temperature shift, with anchor calibration.
//!
//! The toy scaling chain:
//!
//!   ΔT_core(R) = k_ISW · R² · A_GoP(R, z, |δ|)
//!   A_GoP      = f_ent · wΓ(g(z,|δ|)) · √(V(R)/V_c)
//!
//! where k_ISW is a baseline ISW-like coefficient built from
//!
//!   |Φ₀| ≈ 0.5 Ω_m H₀² |δ_ref| R²
//!   ΔT   ≈ 2 T_cmb (|Φ₀|/c²) D_decay
//!
//! so that ΔT_µK ≈ k·R²_Mpc, and the coherence volume V_c is solved from a
//! fixed anchor preset (R_cal, z_cal, ΔT_cal, |δ_cal|) rather than fitted
//! to the measurement itself.

use serde::Serialize;

use crate::error::{require_positive, require_redshift, DomainError};
use crate::kernel::{bell_curve_weight, regime_coordinate};
use crate::units::{h0_si, sphere_volume_m3, C, KELVIN_TO_UK, MPC, T_CMB};

/// Immutable toy-model knob set.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoidModelParams {
    /// Hubble parameter (km/s/Mpc)
    pub h0_km_s_mpc: f64,
    /// Matter density fraction Ω_m0
    pub omega_m0: f64,
    /// Effective potential-decay factor
    pub d_decay: f64,
    /// Entanglement fraction
    pub f_ent: f64,
    /// Reference redshift for the regime coordinate
    pub z_ref: f64,
    /// Reference underdensity depth for the regime coordinate
    pub delta_ref: f64,
    /// Redshift exponent n in g(z,|δ|)
    pub n_exp: f64,
}

impl Default for VoidModelParams {
    fn default() -> Self {
        Self {
            h0_km_s_mpc: 67.4,
            omega_m0: 0.315,
            d_decay: 0.1,
            f_ent: 0.20,
            z_ref: 0.5,
            delta_ref: 0.3,
            n_exp: 3.0,
        }
    }
}

impl VoidModelParams {
    /// Validated constructor.
    pub fn new(
        h0_km_s_mpc: f64,
        omega_m0: f64,
        d_decay: f64,
        f_ent: f64,
        z_ref: f64,
        delta_ref: f64,
        n_exp: f64,
    ) -> Result<Self, DomainError> {
        require_positive("H0", h0_km_s_mpc)?;
        require_positive("Omega_m0", omega_m0)?;
        require_positive("D_decay", d_decay)?;
        require_positive("f_ent", f_ent)?;
        require_redshift(z_ref)?;
        require_positive("delta_ref", delta_ref)?;
        if !n_exp.is_finite() {
            return Err(DomainError::NonFinite {
                name: "n_exp",
                value: n_exp,
            });
        }
        Ok(Self {
            h0_km_s_mpc,
            omega_m0,
            d_decay,
            f_ent,
            z_ref,
            delta_ref,
            n_exp,
        })
    }

    /// Baseline ISW-like coefficient k such that ΔT_µK ≈ k·R²_Mpc.
    pub fn k_isw_uk_per_mpc2(&self) -> f64 {
        let h0 = h0_si(self.h0_km_s_mpc);
        let k_k_per_m2 =
            2.0 * T_CMB * (0.5 * self.omega_m0 * h0 * h0 * self.delta_ref) / (C * C) * self.d_decay;
        k_k_per_m2 * KELVIN_TO_UK * MPC * MPC
    }

    /// Emergent amplitude A_GoP = f_ent · wΓ(g(z,|δ|)) · √(V(R)/V_c).
    pub fn a_gop(&self, r_mpc: f64, z: f64, delta_abs: f64, vc_m3: f64) -> Result<f64, DomainError> {
        require_positive("R", r_mpc)?;
        require_positive("Vc", vc_m3)?;
        let g = regime_coordinate(z, delta_abs, self.z_ref, self.delta_ref, self.n_exp)?;
        let w = bell_curve_weight(g)?;
        let v = sphere_volume_m3(r_mpc * MPC);
        Ok(self.f_ent * w * (v / vc_m3).sqrt())
    }

    /// Predicted core temperature shift ΔT_core(R) = k_ISW·R²·A_GoP (µK).
    pub fn delta_t_core_uk(
        &self,
        r_mpc: f64,
        z: f64,
        delta_abs: f64,
        vc_m3: f64,
    ) -> Result<f64, DomainError> {
        let k = self.k_isw_uk_per_mpc2();
        let a = self.a_gop(r_mpc, z, delta_abs, vc_m3)?;
        Ok(k * r_mpc * r_mpc * a)
    }

    /// Solve the coherence volume V_c from the anchor constraint
    ///
    ///   ΔT_cal = k · R_cal² · f_ent · wΓ(g_cal) · √(V(R_cal)/V_c)
    pub fn calibrate_coherence_volume(&self, anchor: &Anchor) -> Result<f64, DomainError> {
        require_positive("R_cal", anchor.r_cal_mpc)?;
        require_positive("DeltaT_cal", anchor.delta_t_cal_uk)?;
        let k = self.k_isw_uk_per_mpc2();
        let g_cal = regime_coordinate(
            anchor.z_cal,
            anchor.delta_cal_abs,
            self.z_ref,
            self.delta_ref,
            self.n_exp,
        )?;
        let w_cal = bell_curve_weight(g_cal)?;
        let v = sphere_volume_m3(anchor.r_cal_mpc * MPC);
        let denom = k * anchor.r_cal_mpc * anchor.r_cal_mpc * self.f_ent * w_cal;
        let ratio = anchor.delta_t_cal_uk / denom;
        Ok(v / (ratio * ratio))
    }
}

/// A fixed (radius, redshift, amplitude, depth) calibration preset.
///
/// Anchors set the absolute scale of the prediction; they are inputs, not
/// quantities derived from the measurement.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Anchor {
    pub r_cal_mpc: f64,
    pub z_cal: f64,
    pub delta_t_cal_uk: f64,
    pub delta_cal_abs: f64,
}

impl Anchor {
    pub const BASELINE: Anchor = Anchor {
        r_cal_mpc: 80.0,
        z_cal: 0.5,
        delta_t_cal_uk: 10.0,
        delta_cal_abs: 0.3,
    };

    pub const A1_LOWZ: Anchor = Anchor {
        r_cal_mpc: 55.0,
        z_cal: 0.3,
        delta_t_cal_uk: 10.0,
        delta_cal_abs: 0.3,
    };

    pub const A2_LOWZ_BAND: Anchor = Anchor {
        r_cal_mpc: 55.0,
        z_cal: 0.3,
        delta_t_cal_uk: 8.0,
        delta_cal_abs: 0.3,
    };

    /// Look up a preset by its registered name.
    pub fn preset(name: &str) -> Result<Anchor, DomainError> {
        match name {
            "baseline" => Ok(Self::BASELINE),
            "A1_lowz" => Ok(Self::A1_LOWZ),
            "A2_lowz_band" => Ok(Self::A2_LOWZ_BAND),
            other => Err(DomainError::UnknownAnchor(other.to_string())),
        }
    }
}

/// Literature parameters for a single void target.
#[derive(Debug, Clone, Serialize)]
pub struct VoidTarget {
    pub name: &'static str,
    /// Effective radius (Mpc)
    pub r_mpc: f64,
    /// Redshift
    pub z: f64,
    /// Locked effective underdensity depth |δ|
    pub delta_abs: f64,
    /// Low/high |δ| for the sensitivity band
    pub delta_band: (f64, f64),
}

/// The Boötes Void at its literature parameters.
pub const BOOTES: VoidTarget = VoidTarget {
    name: "Bootes Void",
    r_mpc: 62.0,
    z: 0.052,
    delta_abs: 0.85,
    delta_band: (0.75, 0.90),
};

/// A single-void prediction with its |δ| sensitivity band.
#[derive(Debug, Clone, Serialize)]
pub struct VoidPrediction {
    pub target: VoidTarget,
    pub anchor: Anchor,
    /// Calibrated coherence volume (m³)
    pub vc_m3: f64,
    /// ΔT at the locked |δ| (µK)
    pub delta_t_uk: f64,
    /// ΔT at the low edge of the |δ| band (µK)
    pub delta_t_low_uk: f64,
    /// ΔT at the high edge of the |δ| band (µK)
    pub delta_t_high_uk: f64,
}

/// Calibrate against `anchor` and predict ΔT for `target`.
pub fn predict_void(
    params: &VoidModelParams,
    anchor: &Anchor,
    target: &VoidTarget,
) -> Result<VoidPrediction, DomainError> {
    let vc = params.calibrate_coherence_volume(anchor)?;
    let delta_t = params.delta_t_core_uk(target.r_mpc, target.z, target.delta_abs, vc)?;
    let (lo, hi) = target.delta_band;
    let delta_t_low = params.delta_t_core_uk(target.r_mpc, target.z, lo, vc)?;
    let delta_t_high = params.delta_t_core_uk(target.r_mpc, target.z, hi, vc)?;
    Ok(VoidPrediction {
        target: target.clone(),
        anchor: *anchor,
        vc_m3: vc,
        delta_t_uk: delta_t,
        delta_t_low_uk: delta_t_low,
        delta_t_high_uk: delta_t_high,
    })
}
