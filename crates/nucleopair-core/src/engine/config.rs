use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{lower_field} ({lower}) must not exceed {upper_field} ({upper})")]
    InvertedRange {
        lower_field: &'static str,
        lower: f64,
        upper_field: &'static str,
        upper: f64,
    },

    #[error("file I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Selects which parameter indices feed the Watson-Crick classifier.
///
/// The historical program this library reproduces feeds Shift/Slide where
/// Slide/Rise was intended; `Legacy` replicates that defect bit-for-bit and is
/// the default, `Corrected` uses the intended indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterCompat {
    #[default]
    Legacy,
    Corrected,
}

/// Hydrogen-bond search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HBondMode {
    /// Full slot geometry: alignment scoring, capacity, and bifurcation checks.
    #[default]
    Geometric,
    /// Distance and bare donor/acceptor capacity only, for legacy-parity scoring.
    DistanceOnly,
}

/// All geometric thresholds and compatibility switches of the detection engine.
///
/// Defaults reproduce the legacy reference behavior. Values are validated once,
/// at configuration-load time, never mid-pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PairConfig {
    /// Maximum distance between the two frame origins (Angstroms).
    pub max_origin_distance: f64,
    /// Maximum component of origin separation along the averaged base normal.
    pub max_vertical_distance: f64,
    /// Maximum angle between the two base normals (degrees, folded to [0, 90]).
    pub max_plane_angle: f64,
    /// Bounds on the glycosidic ring-nitrogen separation (Angstroms).
    pub min_nn_distance: f64,
    pub max_nn_distance: f64,
    /// Maximum projected ring-polygon overlap area; overlapping bases are
    /// stacked, not paired.
    pub max_overlap_area: f64,
    /// Minimum number of accepted hydrogen bonds.
    pub min_hbond_count: usize,
    /// Donor-acceptor distance cutoff for hydrogen-bond candidates.
    pub hbond_dist_max: f64,
    /// Below this distance the alignment-score gate is skipped entirely.
    pub hbond_short_dist: f64,
    /// "Ideal" hydrogen-bond distance window used by the quality score.
    pub hbond_ideal_min: f64,
    pub hbond_ideal_max: f64,
    /// Minimum angular separation between two bonds sharing a slot (degrees).
    pub min_bifurcation_angle: f64,
    /// Minimum combined slot-alignment score (sum of two dot products, in
    /// [-2, 2]) for a candidate at or beyond the short-contact distance.
    pub min_alignment_score: f64,
    /// RMS acceptance threshold for ring-atom template fits.
    pub frame_rms_tolerance: f64,
    /// Fixed quality bonus subtracted when a pair classifies as Watson-Crick.
    pub wc_quality_bonus: f64,
    pub parameter_compat: ParameterCompat,
    pub hbond_mode: HBondMode,
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            max_origin_distance: 15.0,
            max_vertical_distance: 2.5,
            max_plane_angle: 65.0,
            min_nn_distance: 4.5,
            max_nn_distance: 10.5,
            max_overlap_area: 0.01,
            min_hbond_count: 1,
            hbond_dist_max: 4.0,
            hbond_short_dist: 2.7,
            hbond_ideal_min: 2.5,
            hbond_ideal_max: 3.5,
            min_bifurcation_angle: 30.0,
            min_alignment_score: 0.0,
            frame_rms_tolerance: 0.2618,
            wc_quality_bonus: 5.0,
            parameter_compat: ParameterCompat::Legacy,
            hbond_mode: HBondMode::Geometric,
        }
    }
}

impl PairConfig {
    /// Rejects invalid threshold values before any structure is processed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_origin_distance", self.max_origin_distance),
            ("max_vertical_distance", self.max_vertical_distance),
            ("min_nn_distance", self.min_nn_distance),
            ("max_nn_distance", self.max_nn_distance),
            ("hbond_dist_max", self.hbond_dist_max),
            ("hbond_short_dist", self.hbond_short_dist),
            ("hbond_ideal_min", self.hbond_ideal_min),
            ("hbond_ideal_max", self.hbond_ideal_max),
            ("frame_rms_tolerance", self.frame_rms_tolerance),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.max_overlap_area < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "max_overlap_area",
                value: self.max_overlap_area,
            });
        }
        if !(0.0..=90.0).contains(&self.max_plane_angle) {
            return Err(ConfigError::OutOfRange {
                field: "max_plane_angle",
                min: 0.0,
                max: 90.0,
                value: self.max_plane_angle,
            });
        }
        if !(0.0..=180.0).contains(&self.min_bifurcation_angle) {
            return Err(ConfigError::OutOfRange {
                field: "min_bifurcation_angle",
                min: 0.0,
                max: 180.0,
                value: self.min_bifurcation_angle,
            });
        }
        if !(-2.0..=2.0).contains(&self.min_alignment_score) {
            return Err(ConfigError::OutOfRange {
                field: "min_alignment_score",
                min: -2.0,
                max: 2.0,
                value: self.min_alignment_score,
            });
        }
        if self.min_nn_distance > self.max_nn_distance {
            return Err(ConfigError::InvertedRange {
                lower_field: "min_nn_distance",
                lower: self.min_nn_distance,
                upper_field: "max_nn_distance",
                upper: self.max_nn_distance,
            });
        }
        if self.hbond_ideal_min > self.hbond_ideal_max {
            return Err(ConfigError::InvertedRange {
                lower_field: "hbond_ideal_min",
                lower: self.hbond_ideal_min,
                upper_field: "hbond_ideal_max",
                upper: self.hbond_ideal_max,
            });
        }
        Ok(())
    }

    /// Parses a TOML document; omitted fields keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PairConfig = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: PairConfig = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }
}
