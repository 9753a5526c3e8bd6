//! The terminal, serialized measurement record.
//!
//! One JSON document per run: the configuration echo, a per-map entry
//! (measured values or an explicit failure), and the cross-map summary.
//! Writing this file is the only persisted state the harness produces.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::config::MeasurementConfig;
use crate::consistency::{CrossMapSummary, MapOutcome};

/// Aggregated result of one measurement invocation.
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementRecord {
    /// Echo of the full run configuration (target, aperture, counts,
    /// seed), so the record is self-describing.
    pub config: MeasurementConfig,
    /// Per-map outcomes, in input order.
    pub maps: Vec<MapOutcome>,
    /// Agreement across the successful maps.
    pub summary: CrossMapSummary,
}

impl MeasurementRecord {
    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON document to `path`.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let txt = self.to_json()?;
        fs::write(path, txt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeasurementConfig;
    use crate::consistency::measure_all;
    use crate::direction::Direction;
    use crate::grid::RingGrid;
    use crate::nulls::NullConfig;
    use crate::photometry::Aperture;
    use crate::skymap::SkyMap;

    fn small_record() -> MeasurementRecord {
        let target = Direction::new(180.0, 40.0).unwrap();
        let aperture = Aperture::new(5.0, 5.0, 10.0).unwrap();
        let mut cfg = MeasurementConfig::new(target, aperture);
        cfg.bootstrap_iterations = 50;
        cfg.null = NullConfig::for_trials(20);
        cfg.min_pix = 5;
        let maps = vec![
            SkyMap::gaussian_noise("smica", RingGrid::new(96), 10.0, 1),
            SkyMap::new("corrupt", RingGrid::new(96), vec![0.0; 2]),
        ];
        measure_all(&maps, &cfg).unwrap()
    }

    #[test]
    fn record_serializes_to_json() {
        let record = small_record();
        let json = record.to_json().unwrap();
        // Self-describing: config echo, per-map status, summary
        assert!(json.contains("\"seed\""));
        assert!(json.contains("\"status\""));
        assert!(json.contains("\"measured\""));
        assert!(json.contains("\"failed\""));
        assert!(json.contains("\"maps_succeeded\""));
    }

    #[test]
    fn raw_pixel_vectors_stay_out_of_the_artifact() {
        let record = small_record();
        let json = record.to_json().unwrap();
        assert!(!json.contains("core_values_uk"));
        assert!(!json.contains("rim_values_uk"));
        assert!(!json.contains("delta_ts_uk"));
    }

    #[test]
    fn json_is_parseable() {
        let record = small_record();
        let json = record.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["maps_succeeded"], 1);
        assert_eq!(value["summary"]["maps_failed"], 1);
        assert_eq!(value["maps"][1]["status"], "failed");
        assert_eq!(value["maps"][1]["label"], "corrupt");
    }

    #[test]
    fn write_json_round_trips_through_disk() {
        let record = small_record();
        let path = std::env::temp_dir().join("cmb_aperture_record_test.json");
        record.write_json(&path).unwrap();
        let txt = std::fs::read_to_string(&path).unwrap();
        assert_eq!(txt, record.to_json().unwrap());
        let _ = std::fs::remove_file(&path);
    }
}
