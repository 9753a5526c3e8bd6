//! # gop-model
//!
//! Closed-form calculators for the Gravity of Probability (GoP) toy model:
//!
//! - **Vacuum comparison**: the ΛCDM vacuum energy density ρ_Λ (a tuned
//!   cosmological constant) against the emergent GoP vacuum scale
//!   ρ_vac^GoP = κA·E₀/V, which lands near the observed Λ scale with no
//!   cosmological fine-tuning.
//! - **Decoherence kernel**: the regime coordinate g(z,|δ|) and the
//!   bell-curve weight wΓ(g) = g·exp(1−g), peaked at g = 1.
//! - **Void model**: the toy mapping from void geometry (R, z, |δ|) to a
//!   predicted CMB core temperature shift ΔT_core = k_ISW·R²·A_GoP, with
//!   the coherence volume V_c calibrated against a fixed anchor preset.
//!
//! All quantities are explicit immutable parameter structs evaluated by
//! pure functions; out-of-domain scalar input fails with [`DomainError`]
//! rather than propagating NaN.

pub mod error;
pub mod kernel;
pub mod units;
pub mod vacuum;
pub mod void_model;

pub use error::DomainError;

pub mod prelude {
    pub use crate::error::DomainError;
    pub use crate::kernel::*;
    pub use crate::units::*;
    pub use crate::vacuum::*;
    pub use crate::void_model::*;
}
