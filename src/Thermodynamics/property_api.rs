use crate::Thermodynamics::MoranData::MoranData;
use crate::Thermodynamics::ideal_gas::IdealGasData;
use enum_dispatch::enum_dispatch;
use std::error::Error;
use std::fmt;

/// which thermophysical property is requested from a property source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasProperty {
    MolarMass,
    CompressibilityFactor,
    MolarEnthalpy,
}

impl fmt::Display for GasProperty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GasProperty::MolarMass => write!(f, "molar mass"),
            GasProperty::CompressibilityFactor => write!(f, "compressibility factor"),
            GasProperty::MolarEnthalpy => write!(f, "molar enthalpy"),
        }
    }
}

#[derive(Debug)]
pub enum PropertyError {
    SpeciesNotFound(String),
    PropertyUnavailable {
        species: String,
        property: GasProperty,
    },
    TemperatureOutOfRange {
        species: String,
        temperature: f64,
        range: String,
    },
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PropertyError::SpeciesNotFound(species) => {
                write!(f, "Species not found: {}", species)
            }
            PropertyError::PropertyUnavailable { species, property } => {
                write!(f, "Property {} unavailable for species {}", property, species)
            }
            PropertyError::TemperatureOutOfRange {
                species,
                temperature,
                range,
            } => {
                write!(
                    f,
                    "No tabulated {} data at {} K. Valid range: {}",
                    species, temperature, range
                )
            }
        }
    }
}

impl Error for PropertyError {}

#[enum_dispatch]
pub trait PropertyCalculator {
    /// lookup a property of a pure species at the state (t, p), SI units:
    /// molar mass in g/mol, compressibility factor dimensionless, molar
    /// enthalpy in kJ/kmol
    fn lookup(
        &self,
        property: GasProperty,
        species: &str,
        t: f64,
        p: f64,
    ) -> Result<f64, PropertyError>;
}

#[derive(Debug, Clone)]
#[enum_dispatch(PropertyCalculator)]
pub enum PropertyEnum {
    Moran(MoranData),
    Ideal(IdealGasData),
}

pub enum ProviderType {
    Moran,
    Ideal,
}

pub fn create_provider(provider_type: ProviderType) -> PropertyEnum {
    match provider_type {
        ProviderType::Moran => PropertyEnum::Moran(MoranData::new()),
        ProviderType::Ideal => PropertyEnum::Ideal(IdealGasData::new()),
    }
}

pub fn create_provider_by_name(provider_name: &str) -> PropertyEnum {
    match provider_name {
        "moran" | "Moran" | "A23" | "tables" => PropertyEnum::Moran(MoranData::new()),
        "ideal" | "ideal_gas" | "perfect" => PropertyEnum::Ideal(IdealGasData::new()),
        _ => panic!("no such property source!"),
    }
}
