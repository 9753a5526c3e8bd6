//! Cross-map consistency: the same measurement on every input map.
//!
//! The input maps are independently-produced foreground-cleaned
//! reconstructions of the same sky; a real signal should survive in all
//! of them, while a pipeline artifact usually does not. Each map is
//! measured independently (parallel across maps, disjoint seed streams);
//! a failing map is recorded as an explicit failure entry and never
//! aborts the others.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::bootstrap::{bootstrap, BootstrapEstimate};
use crate::config::{stream_seed, MeasurementConfig, MAP_STREAM};
use crate::error::PhotometryError;
use crate::nulls::{null_distribution, NullDistribution};
use crate::photometry::{measure, PhotometryResult};
use crate::report::MeasurementRecord;
use crate::skymap::SkyMap;
use crate::stats::{mean, sample_std};

/// Everything measured on one map.
#[derive(Debug, Clone, Serialize)]
pub struct MapMeasurement {
    pub label: String,
    pub photometry: PhotometryResult,
    pub bootstrap: BootstrapEstimate,
    pub null: NullDistribution,
}

/// Per-map outcome in the record: measured, or an explicit failure.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapOutcome {
    Measured(MapMeasurement),
    Failed { label: String, error: String },
}

impl MapOutcome {
    pub fn label(&self) -> &str {
        match self {
            MapOutcome::Measured(m) => &m.label,
            MapOutcome::Failed { label, .. } => label,
        }
    }

    pub fn measurement(&self) -> Option<&MapMeasurement> {
        match self {
            MapOutcome::Measured(m) => Some(m),
            MapOutcome::Failed { .. } => None,
        }
    }
}

/// Agreement summary across the successful maps.
#[derive(Debug, Clone, Serialize)]
pub struct CrossMapSummary {
    pub maps_succeeded: usize,
    pub maps_failed: usize,
    /// Mean ΔT across successful maps (µK)
    pub mean_delta_t_uk: Option<f64>,
    /// Spread (sample std) of ΔT across maps (µK); None below two maps
    pub spread_uk: Option<f64>,
    pub min_delta_t_uk: Option<f64>,
    pub max_delta_t_uk: Option<f64>,
}

impl CrossMapSummary {
    fn from_outcomes(outcomes: &[MapOutcome]) -> Self {
        let delta_ts: Vec<f64> = outcomes
            .iter()
            .filter_map(|o| o.measurement())
            .map(|m| m.photometry.delta_t_uk)
            .collect();
        let succeeded = delta_ts.len();
        let failed = outcomes.len() - succeeded;
        if delta_ts.is_empty() {
            return Self {
                maps_succeeded: 0,
                maps_failed: failed,
                mean_delta_t_uk: None,
                spread_uk: None,
                min_delta_t_uk: None,
                max_delta_t_uk: None,
            };
        }
        let m = mean(&delta_ts);
        let spread = if succeeded >= 2 {
            Some(sample_std(&delta_ts, m))
        } else {
            None
        };
        Self {
            maps_succeeded: succeeded,
            maps_failed: failed,
            mean_delta_t_uk: Some(m),
            spread_uk: spread,
            min_delta_t_uk: delta_ts.iter().copied().reduce(f64::min),
            max_delta_t_uk: delta_ts.iter().copied().reduce(f64::max),
        }
    }
}

fn measure_map_seeded(
    map: &SkyMap,
    cfg: &MeasurementConfig,
    seed: u64,
) -> Result<MapMeasurement, PhotometryError> {
    let photometry = measure(map, &cfg.target, &cfg.aperture, cfg.min_pix)?;
    let boot = bootstrap(&photometry, cfg.bootstrap_iterations, seed)?;
    let null = null_distribution(map, &cfg.target, &cfg.aperture, cfg.min_pix, &cfg.null, seed)?;
    log::info!(
        "map '{}': ΔT = {:.2} ± {:.2} µK (null {:.2} ± {:.2})",
        map.label(),
        photometry.delta_t_uk,
        boot.std_dev_uk,
        null.mean_uk,
        null.std_dev_uk
    );
    Ok(MapMeasurement {
        label: map.label().to_string(),
        photometry,
        bootstrap: boot,
        null,
    })
}

/// Run photometry + bootstrap + null generation for a single map.
pub fn measure_map(
    map: &SkyMap,
    cfg: &MeasurementConfig,
) -> Result<MapMeasurement, PhotometryError> {
    cfg.validate()?;
    measure_map_seeded(map, cfg, cfg.seed)
}

/// Run the full measurement independently on every map and assemble the
/// terminal record.
///
/// Configuration is validated up front and aborts the whole run;
/// per-map failures are recorded and do not.
pub fn measure_all(
    maps: &[SkyMap],
    cfg: &MeasurementConfig,
) -> Result<MeasurementRecord, PhotometryError> {
    cfg.validate()?;

    let run_one = |(idx, map): (usize, &SkyMap)| -> MapOutcome {
        let seed = stream_seed(cfg.seed, MAP_STREAM + idx as u64);
        match measure_map_seeded(map, cfg, seed) {
            Ok(m) => MapOutcome::Measured(m),
            Err(e) => {
                log::warn!("map '{}' failed: {}", map.label(), e);
                MapOutcome::Failed {
                    label: map.label().to_string(),
                    error: e.to_string(),
                }
            }
        }
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<MapOutcome> = maps.par_iter().enumerate().map(run_one).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<MapOutcome> = maps.iter().enumerate().map(run_one).collect();

    let summary = CrossMapSummary::from_outcomes(&outcomes);
    Ok(MeasurementRecord {
        config: cfg.clone(),
        maps: outcomes,
        summary,
    })
}
