use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileIonConfig {
    pub species: Option<String>,
    pub mass_number: Option<u32>,
    pub charge: Option<i32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileTargetConfig {
    pub secular_frequency: Option<f64>,
    pub q_max: Option<f64>,
    pub v_rf_max: Option<f64>,
    pub depth_min: Option<f64>,
    pub depth_max: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDriveConfig {
    pub f_min: Option<f64>,
    pub f_max: Option<f64>,
    pub f_points: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileGeometryConfig {
    pub slot_correction: Option<f64>,
}

/// An `(start, stop, points)` axis where any part may be omitted.
#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileAxisConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub points: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSurveyConfig {
    pub fixed_a: Option<f64>,
    pub fixed_b: Option<FileAxisConfig>,
    pub full_a: Option<FileAxisConfig>,
    pub full_b: Option<FileAxisConfig>,
    pub top: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSearchConfig {
    pub a: Option<FileAxisConfig>,
    pub b: Option<FileAxisConfig>,
    pub max_solutions: Option<usize>,
}

/// The on-disk design configuration. Every section and key is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileDesignConfig {
    pub ion: Option<FileIonConfig>,
    pub target: Option<FileTargetConfig>,
    pub drive: Option<FileDriveConfig>,
    pub geometry: Option<FileGeometryConfig>,
    pub survey: Option<FileSurveyConfig>,
    pub search: Option<FileSearchConfig>,
}

impl FileDesignConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
