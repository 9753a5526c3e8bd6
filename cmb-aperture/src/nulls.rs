//! Matched-latitude random-center null distribution.
//!
//! To judge whether the target's ΔT is an outlier or a typical chance
//! fluctuation, the same aperture is dropped at random longitudes in the
//! target's latitude band (optionally jittered within a small band) and
//! photometered. Controls falling on masked or missing sky are redrawn
//! up to a retry budget; a trial that exhausts its budget is excluded.
//! The run fails only when too few trials survive to form a meaningful
//! distribution.
//!
//! The target itself is excluded from candidate draws via a minimum
//! angular separation. Trials run in parallel over derived seed streams;
//! output is bit-identical for a given seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use serde::Serialize;

use crate::config::{stream_seed, NULL_STREAM};
use crate::direction::Direction;
use crate::error::PhotometryError;
use crate::photometry::{measure, Aperture};
use crate::skymap::SkyMap;
use crate::stats::{mean, sample_std};

/// Null-generator settings. All thresholds are explicit configuration,
/// not baked-in constants.
#[derive(Debug, Clone, Serialize)]
pub struct NullConfig {
    /// Number of control apertures to attempt.
    pub trials: usize,
    /// Half-width of the latitude band around the target's latitude
    /// within which control centers are jittered (degrees; 0 keeps the
    /// exact target latitude).
    pub lat_jitter_deg: f64,
    /// Minimum angular separation between a control center and the
    /// target (degrees); draws closer than this are rejected.
    pub min_separation_deg: f64,
    /// Fresh centers attempted per trial before the trial is abandoned.
    pub retry_budget: usize,
    /// Minimum surviving trials for the distribution to count; fewer
    /// fails the run with `MaskedRegionExhausted`.
    pub min_valid_trials: usize,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            trials: 200,
            lat_jitter_deg: 2.0,
            min_separation_deg: 20.0,
            retry_budget: 8,
            min_valid_trials: 100,
        }
    }
}

impl NullConfig {
    /// Defaults scaled to a given trial count (`min_valid_trials` =
    /// half the trials).
    pub fn for_trials(trials: usize) -> Self {
        Self {
            trials,
            min_valid_trials: (trials / 2).max(2),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PhotometryError> {
        if self.trials < 2 {
            return Err(PhotometryError::InvalidConfig {
                reason: format!("null trials must be >= 2, got {}", self.trials),
            });
        }
        if self.min_valid_trials < 2 || self.min_valid_trials > self.trials {
            return Err(PhotometryError::InvalidConfig {
                reason: format!(
                    "min_valid_trials must lie in [2, trials], got {} of {}",
                    self.min_valid_trials, self.trials
                ),
            });
        }
        if !self.lat_jitter_deg.is_finite() || self.lat_jitter_deg < 0.0 {
            return Err(PhotometryError::InvalidConfig {
                reason: format!("lat_jitter_deg must be >= 0, got {}", self.lat_jitter_deg),
            });
        }
        if !self.min_separation_deg.is_finite() || self.min_separation_deg < 0.0 {
            return Err(PhotometryError::InvalidConfig {
                reason: format!(
                    "min_separation_deg must be >= 0, got {}",
                    self.min_separation_deg
                ),
            });
        }
        Ok(())
    }
}

/// The null ΔT distribution and its summary.
#[derive(Debug, Clone, Serialize)]
pub struct NullDistribution {
    /// ΔT of each surviving control aperture, in trial order (µK).
    #[serde(skip)]
    pub delta_ts_uk: Vec<f64>,
    /// Mean of the null distribution (µK)
    pub mean_uk: f64,
    /// Standard deviation of the null distribution (µK)
    pub std_dev_uk: f64,
    /// Standard error of the null mean: std/√n (µK)
    pub sem_uk: f64,
    /// Trials that produced a ΔT
    pub completed_trials: usize,
    /// Trials abandoned after the retry budget
    pub failed_trials: usize,
}

/// One control trial: draw centers until one photometers cleanly or the
/// retry budget runs out.
fn run_trial(
    map: &SkyMap,
    target: &Direction,
    aperture: &Aperture,
    min_pix: usize,
    cfg: &NullConfig,
    trial_seed: u64,
) -> Option<f64> {
    let mut rng = StdRng::seed_from_u64(trial_seed);
    for _ in 0..=cfg.retry_budget {
        let lon = rng.gen::<f64>() * 360.0;
        let lat = if cfg.lat_jitter_deg > 0.0 {
            (target.lat_deg() + rng.gen_range(-cfg.lat_jitter_deg..=cfg.lat_jitter_deg))
                .clamp(-90.0, 90.0)
        } else {
            target.lat_deg()
        };
        // lon/lat are in range by construction
        let control = Direction::from_valid(lon, lat);
        if control.separation_deg(target) < cfg.min_separation_deg {
            continue;
        }
        match measure(map, &control, aperture, min_pix) {
            Ok(r) => return Some(r.delta_t_uk),
            Err(PhotometryError::InsufficientPixels { .. }) => {
                log::debug!(
                    "control at (l={:.1}, b={:.1}) on masked sky, redrawing",
                    control.lon_deg(),
                    control.lat_deg()
                );
                continue;
            }
            // Map-level failures were surfaced before the null stage.
            Err(_) => return None,
        }
    }
    None
}

/// Build the matched-latitude null distribution for one map.
pub fn null_distribution(
    map: &SkyMap,
    target: &Direction,
    aperture: &Aperture,
    min_pix: usize,
    cfg: &NullConfig,
    seed: u64,
) -> Result<NullDistribution, PhotometryError> {
    cfg.validate()?;
    map.validate()?;

    #[cfg(feature = "parallel")]
    let outcomes: Vec<Option<f64>> = (0..cfg.trials)
        .into_par_iter()
        .map(|i| {
            run_trial(
                map,
                target,
                aperture,
                min_pix,
                cfg,
                stream_seed(seed, NULL_STREAM + i as u64),
            )
        })
        .collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Option<f64>> = (0..cfg.trials)
        .map(|i| {
            run_trial(
                map,
                target,
                aperture,
                min_pix,
                cfg,
                stream_seed(seed, NULL_STREAM + i as u64),
            )
        })
        .collect();

    let delta_ts: Vec<f64> = outcomes.iter().flatten().copied().collect();
    let completed = delta_ts.len();
    let failed = cfg.trials - completed;
    if failed > 0 {
        log::info!(
            "null generator on '{}': {} of {} trials exhausted their retry budget",
            map.label(),
            failed,
            cfg.trials
        );
    }

    if completed < cfg.min_valid_trials {
        return Err(PhotometryError::MaskedRegionExhausted {
            completed,
            requested: cfg.trials,
            required: cfg.min_valid_trials,
        });
    }

    let m = mean(&delta_ts);
    let std = sample_std(&delta_ts, m);
    Ok(NullDistribution {
        mean_uk: m,
        std_dev_uk: std,
        sem_uk: std / (completed as f64).sqrt(),
        completed_trials: completed,
        failed_trials: failed,
        delta_ts_uk: delta_ts,
    })
}
