use super::constants::PROTON_MASS;
use phf::phf_map;
use thiserror::Error;

/// Common trapped-ion species keyed by isotope symbol, mapped to
/// `(mass_number, charge)`.
static SPECIES_CATALOG: phf::Map<&'static str, (u32, i32)> = phf_map! {
    "9Be+" => (9, 1),
    "24Mg+" => (24, 1),
    "25Mg+" => (25, 1),
    "40Ca+" => (40, 1),
    "43Ca+" => (43, 1),
    "88Sr+" => (88, 1),
    "137Ba+" => (137, 1),
    "138Ba+" => (138, 1),
    "171Yb+" => (171, 1),
    "172Yb+" => (172, 1),
    "174Yb+" => (174, 1),
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SpeciesError {
    #[error("Mass number must be positive")]
    ZeroMassNumber,
    #[error("Charge state must be non-zero")]
    ZeroCharge,
    #[error("Unknown ion species symbol: '{0}'")]
    UnknownSymbol(String),
}

/// A trapped ion species described by its mass number and charge state.
///
/// The ion mass is derived as `mass_number × proton_mass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IonSpecies {
    mass_number: u32,
    charge: i32,
}

impl IonSpecies {
    pub fn new(mass_number: u32, charge: i32) -> Result<Self, SpeciesError> {
        if mass_number == 0 {
            return Err(SpeciesError::ZeroMassNumber);
        }
        if charge == 0 {
            return Err(SpeciesError::ZeroCharge);
        }
        Ok(Self {
            mass_number,
            charge,
        })
    }

    /// Looks up a species from the built-in catalog (e.g. `"171Yb+"`).
    pub fn from_symbol(symbol: &str) -> Result<Self, SpeciesError> {
        let &(mass_number, charge) = SPECIES_CATALOG
            .get(symbol)
            .ok_or_else(|| SpeciesError::UnknownSymbol(symbol.to_string()))?;
        Self::new(mass_number, charge)
    }

    /// Symbols accepted by [`IonSpecies::from_symbol`], sorted.
    pub fn known_symbols() -> Vec<&'static str> {
        let mut symbols: Vec<_> = SPECIES_CATALOG.keys().copied().collect();
        symbols.sort_unstable();
        symbols
    }

    #[inline]
    pub fn mass_number(&self) -> u32 {
        self.mass_number
    }

    #[inline]
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Ion mass in kilograms.
    #[inline]
    pub fn mass_kg(&self) -> f64 {
        self.mass_number as f64 * PROTON_MASS
    }
}

impl Default for IonSpecies {
    /// ¹⁷¹Yb⁺, the reference species of the design tables.
    fn default() -> Self {
        Self {
            mass_number: 171,
            charge: 1,
        }
    }
}
