use crate::core::geometry::SlotCorrection;
use crate::core::grid::{GridAxis, GridError, linspace};
use crate::core::species::IonSpecies;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Minimum trap depth ({min} eV) exceeds maximum trap depth ({max} eV)")]
    InvertedDepthWindow { min: f64, max: f64 },

    #[error("Parameter '{name}' must be positive and finite (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Parameter '{name}' must be finite (got {value})")]
    NonFinite { name: &'static str, value: f64 },

    #[error("Invalid grid for '{name}': {source}")]
    InvalidGrid {
        name: &'static str,
        #[source]
        source: GridError,
    },
}

fn require_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn require_finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

/// Target electrical and confinement specification for a trap design.
///
/// Fields are read-only after construction; a specification can only be
/// obtained through [`TrapSpecification::new`], the builder, or
/// [`Default`], all of which yield a validated value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapSpecification {
    secular_frequency_mhz: f64,
    q_max: f64,
    v_rf_max: f64,
    depth_min_ev: f64,
    depth_max_ev: f64,
}

impl TrapSpecification {
    pub fn new(
        secular_frequency_mhz: f64,
        q_max: f64,
        v_rf_max: f64,
        depth_min_ev: f64,
        depth_max_ev: f64,
    ) -> Result<Self, ConfigError> {
        require_positive("secular_frequency", secular_frequency_mhz)?;
        require_positive("q_max", q_max)?;
        require_positive("v_rf_max", v_rf_max)?;
        require_finite("depth_min", depth_min_ev)?;
        require_finite("depth_max", depth_max_ev)?;
        if depth_min_ev > depth_max_ev {
            return Err(ConfigError::InvertedDepthWindow {
                min: depth_min_ev,
                max: depth_max_ev,
            });
        }
        Ok(Self {
            secular_frequency_mhz,
            q_max,
            v_rf_max,
            depth_min_ev,
            depth_max_ev,
        })
    }

    /// Target secular frequency in MHz.
    pub fn secular_frequency_mhz(&self) -> f64 {
        self.secular_frequency_mhz
    }
    pub fn q_max(&self) -> f64 {
        self.q_max
    }
    /// Maximum allowed RF amplitude in volts.
    pub fn v_rf_max(&self) -> f64 {
        self.v_rf_max
    }
    pub fn depth_min_ev(&self) -> f64 {
        self.depth_min_ev
    }
    pub fn depth_max_ev(&self) -> f64 {
        self.depth_max_ev
    }

    #[inline]
    pub fn voltage_ok(&self, v_rf: f64) -> bool {
        v_rf <= self.v_rf_max
    }

    #[inline]
    pub fn q_ok(&self, q: f64) -> bool {
        q <= self.q_max
    }

    #[inline]
    pub fn depth_ok(&self, depth_ev: f64) -> bool {
        self.depth_min_ev <= depth_ev && depth_ev <= self.depth_max_ev
    }
}

impl Default for TrapSpecification {
    fn default() -> Self {
        Self {
            secular_frequency_mhz: 2.5,
            q_max: 0.25,
            v_rf_max: 250.0,
            depth_min_ev: 0.05,
            depth_max_ev: 0.1,
        }
    }
}

#[derive(Default)]
pub struct TrapSpecificationBuilder {
    secular_frequency_mhz: Option<f64>,
    q_max: Option<f64>,
    v_rf_max: Option<f64>,
    depth_min_ev: Option<f64>,
    depth_max_ev: Option<f64>,
}

impl TrapSpecificationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn secular_frequency_mhz(mut self, value: f64) -> Self {
        self.secular_frequency_mhz = Some(value);
        self
    }
    pub fn q_max(mut self, value: f64) -> Self {
        self.q_max = Some(value);
        self
    }
    pub fn v_rf_max(mut self, value: f64) -> Self {
        self.v_rf_max = Some(value);
        self
    }
    pub fn depth_min_ev(mut self, value: f64) -> Self {
        self.depth_min_ev = Some(value);
        self
    }
    pub fn depth_max_ev(mut self, value: f64) -> Self {
        self.depth_max_ev = Some(value);
        self
    }

    pub fn build(self) -> Result<TrapSpecification, ConfigError> {
        TrapSpecification::new(
            self.secular_frequency_mhz
                .ok_or(ConfigError::MissingParameter("secular_frequency"))?,
            self.q_max.ok_or(ConfigError::MissingParameter("q_max"))?,
            self.v_rf_max
                .ok_or(ConfigError::MissingParameter("v_rf_max"))?,
            self.depth_min_ev
                .ok_or(ConfigError::MissingParameter("depth_min"))?,
            self.depth_max_ev
                .ok_or(ConfigError::MissingParameter("depth_max"))?,
        )
    }
}

/// Candidate RF drive frequencies (MHz) tried by the inverse solver at every
/// grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange {
    pub min_mhz: f64,
    pub max_mhz: f64,
    pub points: usize,
}

impl FrequencyRange {
    pub fn new(min_mhz: f64, max_mhz: f64, points: usize) -> Result<Self, ConfigError> {
        let range = Self {
            min_mhz,
            max_mhz,
            points,
        };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        GridAxis {
            start: self.min_mhz,
            stop: self.max_mhz,
            points: self.points,
        }
        .validate()
        .map_err(|source| ConfigError::InvalidGrid {
            name: "drive_frequency",
            source,
        })
    }

    pub fn candidates(&self) -> Vec<f64> {
        linspace(self.min_mhz, self.max_mhz, self.points)
    }
}

impl Default for FrequencyRange {
    fn default() -> Self {
        Self {
            min_mhz: 10.0,
            max_mhz: 50.0,
            points: 100,
        }
    }
}

/// Everything a sweep needs besides the grid itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub species: IonSpecies,
    pub slot_correction: SlotCorrection,
    pub target: TrapSpecification,
    pub frequencies: FrequencyRange,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            species: IonSpecies::default(),
            slot_correction: SlotCorrection::default(),
            target: TrapSpecification::default(),
            frequencies: FrequencyRange::default(),
        }
    }
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    species: Option<IonSpecies>,
    slot_correction: Option<SlotCorrection>,
    target: Option<TrapSpecification>,
    frequencies: Option<FrequencyRange>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn species(mut self, species: IonSpecies) -> Self {
        self.species = Some(species);
        self
    }
    pub fn slot_correction(mut self, correction: SlotCorrection) -> Self {
        self.slot_correction = Some(correction);
        self
    }
    pub fn target(mut self, target: TrapSpecification) -> Self {
        self.target = Some(target);
        self
    }
    pub fn frequencies(mut self, frequencies: FrequencyRange) -> Self {
        self.frequencies = Some(frequencies);
        self
    }

    /// Species, target and frequency range are required; the slot correction
    /// falls back to its default.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let frequencies = self
            .frequencies
            .ok_or(ConfigError::MissingParameter("frequencies"))?;
        frequencies.validate()?;
        Ok(EngineConfig {
            species: self
                .species
                .ok_or(ConfigError::MissingParameter("species"))?,
            slot_correction: self.slot_correction.unwrap_or_default(),
            target: self.target.ok_or(ConfigError::MissingParameter("target"))?,
            frequencies,
        })
    }
}
