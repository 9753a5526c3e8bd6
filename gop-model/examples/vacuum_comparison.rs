//! Compare the tuned ΛCDM vacuum energy density with the emergent GoP
//! vacuum scale at the fixed, globally applied parameter set.
//!
//! Run with:
//!   cargo run --example vacuum_comparison

use gop_model::prelude::*;

fn main() {
    let cosmo = CosmologyParams::default();
    let gop = GopVacuumParams::default();
    let cmp = compare_vacuum(&cosmo, &gop);

    println!("=== ΛCDM vacuum energy (from cosmology) ===");
    println!("H0                  = {:.2} km/s/Mpc", cosmo.h0_km_s_mpc);
    println!("Ω_Λ                 = {:.3}", cosmo.omega_lambda);
    println!("ρ_Λ (mass)          = {:.3e} kg/m^3", cmp.rho_lambda_mass_kg_m3);
    println!("ρ_Λ (energy)        = {:.3e} J/m^3", cmp.rho_lambda_energy_j_m3);
    println!();
    println!("=== GoP emergent vacuum scale (no Λ tuning) ===");
    println!("κA                  = {:.2e}", gop.kappa_a);
    println!("E0                  = {:.2e} erg", gop.e0_erg);
    println!("Coherence volume    = {:.2} m^3", gop.coherence_volume_m3);
    println!("ρ_vac^GoP (energy)  = {:.3e} J/m^3", cmp.rho_gop_energy_j_m3);
    println!();
    println!("=== Comparison ===");
    println!("ρ_vac^GoP / ρ_Λ     = {:.3}", cmp.gop_to_lambda_ratio);
    println!("(~ O(1) agreement without any cosmological tuning)");
}
