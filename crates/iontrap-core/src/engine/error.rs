use thiserror::Error;

use super::config::ConfigError;
use crate::core::geometry::GeometryError;
use crate::core::species::SpeciesError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid geometry: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Invalid ion species: {source}")]
    Species {
        #[from]
        source: SpeciesError,
    },

    #[error("Failed to export candidates: {source}")]
    Export {
        #[from]
        source: super::export::ExportError,
    },
}
