//! ΛCDM vacuum energy density vs the emergent GoP vacuum scale.
//!
//! ΛCDM side:
//!
//!   ρ_crit = 3 H₀² / (8 π G)
//!   ρ_Λ    = Ω_Λ ρ_crit          (mass density, kg/m³)
//!   ρ_E    = ρ_Λ c²              (energy density, J/m³)
//!
//! GoP side:
//!
//!   ρ_vac^GoP = κA · E₀ / V_coherence   (J/m³, after erg → J)
//!
//! where κA is a dimensionless effective scaling fixed by GoP fits, E₀ a
//! characteristic decoherence energy scale, and V a coarse-grained
//! coherence volume. With the fixed GoP parameter set the emergent scale
//! lands within an O(1) factor of the observed Λ scale, without tuning.

use serde::Serialize;

use crate::error::{require_positive, DomainError};
use crate::units::{h0_si, C, ERG_TO_JOULE, G};

/// ΛCDM background parameters (Planck 2018-ish).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CosmologyParams {
    /// Hubble parameter (km/s/Mpc)
    pub h0_km_s_mpc: f64,
    /// Dark energy density fraction Ω_Λ
    pub omega_lambda: f64,
}

impl Default for CosmologyParams {
    fn default() -> Self {
        Self {
            h0_km_s_mpc: 67.4,
            omega_lambda: 0.688,
        }
    }
}

impl CosmologyParams {
    /// Validated constructor: H₀ > 0, Ω_Λ ∈ (0, 1].
    pub fn new(h0_km_s_mpc: f64, omega_lambda: f64) -> Result<Self, DomainError> {
        require_positive("H0", h0_km_s_mpc)?;
        if !omega_lambda.is_finite() {
            return Err(DomainError::NonFinite {
                name: "Omega_lambda",
                value: omega_lambda,
            });
        }
        if omega_lambda <= 0.0 || omega_lambda > 1.0 {
            return Err(DomainError::OutOfRange {
                name: "Omega_lambda",
                lo: 0.0,
                hi: 1.0,
                value: omega_lambda,
            });
        }
        Ok(Self {
            h0_km_s_mpc,
            omega_lambda,
        })
    }

    /// Critical density ρ_crit = 3H₀²/(8πG) (kg/m³).
    pub fn critical_density_kg_m3(&self) -> f64 {
        let h0 = h0_si(self.h0_km_s_mpc);
        3.0 * h0 * h0 / (8.0 * std::f64::consts::PI * G)
    }

    /// Mass density associated with Λ (kg/m³).
    pub fn rho_lambda_mass_kg_m3(&self) -> f64 {
        self.omega_lambda * self.critical_density_kg_m3()
    }

    /// Energy density associated with Λ (J/m³).
    pub fn rho_lambda_energy_j_m3(&self) -> f64 {
        self.rho_lambda_mass_kg_m3() * C * C
    }
}

/// Fixed GoP parameter set for the emergent vacuum scale.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GopVacuumParams {
    /// Dimensionless effective scaling κA
    pub kappa_a: f64,
    /// Characteristic decoherence energy scale E₀ (erg)
    pub e0_erg: f64,
    /// Coarse-grained coherence volume (m³)
    pub coherence_volume_m3: f64,
}

impl Default for GopVacuumParams {
    fn default() -> Self {
        Self {
            kappa_a: 1.5e-15,
            e0_erg: 1.0e12,
            coherence_volume_m3: 1.0,
        }
    }
}

impl GopVacuumParams {
    /// Validated constructor: all three parameters strictly positive.
    pub fn new(kappa_a: f64, e0_erg: f64, coherence_volume_m3: f64) -> Result<Self, DomainError> {
        require_positive("kappa_a", kappa_a)?;
        require_positive("E0", e0_erg)?;
        require_positive("coherence_volume", coherence_volume_m3)?;
        Ok(Self {
            kappa_a,
            e0_erg,
            coherence_volume_m3,
        })
    }

    /// Emergent GoP vacuum energy density ρ_vac^GoP = κA·E₀/V (J/m³).
    pub fn rho_gop_energy_j_m3(&self) -> f64 {
        self.kappa_a * self.e0_erg * ERG_TO_JOULE / self.coherence_volume_m3
    }
}

/// Side-by-side vacuum energy comparison record.
#[derive(Debug, Clone, Serialize)]
pub struct VacuumComparison {
    pub cosmology: CosmologyParams,
    pub gop: GopVacuumParams,
    /// ρ_Λ as a mass density (kg/m³)
    pub rho_lambda_mass_kg_m3: f64,
    /// ρ_Λ as an energy density (J/m³)
    pub rho_lambda_energy_j_m3: f64,
    /// ρ_vac^GoP (J/m³)
    pub rho_gop_energy_j_m3: f64,
    /// ρ_vac^GoP / ρ_Λ
    pub gop_to_lambda_ratio: f64,
}

/// Compare the tuned ΛCDM vacuum density with the emergent GoP scale.
pub fn compare_vacuum(cosmo: &CosmologyParams, gop: &GopVacuumParams) -> VacuumComparison {
    let rho_lambda_mass = cosmo.rho_lambda_mass_kg_m3();
    let rho_lambda_energy = cosmo.rho_lambda_energy_j_m3();
    let rho_gop = gop.rho_gop_energy_j_m3();
    VacuumComparison {
        cosmology: *cosmo,
        gop: *gop,
        rho_lambda_mass_kg_m3: rho_lambda_mass,
        rho_lambda_energy_j_m3: rho_lambda_energy,
        rho_gop_energy_j_m3: rho_gop,
        gop_to_lambda_ratio: rho_gop / rho_lambda_energy,
    }
}
