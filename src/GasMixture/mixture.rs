//! Characterization of a real-gas mixture by Amagat's law: apparent molar
//! mass, mixture gas constant and mixture compressibility factor from the
//! composition of the blast-furnace gas.

use crate::Thermodynamics::property_api::{
    GasProperty, PropertyCalculator, PropertyEnum, PropertyError,
};
use log::info;
use std::error::Error;
use std::fmt;

pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.314462618; // J/(mol*K)
/// normal reference state for the compressibility lookups
pub const NORMAL_TEMPERATURE: f64 = 273.153; // K
pub const NORMAL_PRESSURE: f64 = 101325.0; // Pa

/// how the composition fractions are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionBasis {
    MassFraction,
    MoleFraction,
}

impl FractionBasis {
    /// accepts the descriptors "fmass" and "fmol", case-insensitive
    pub fn from_descriptor(descriptor: &str) -> Result<Self, MixtureError> {
        match descriptor.to_lowercase().as_str() {
            "fmass" => Ok(FractionBasis::MassFraction),
            "fmol" => Ok(FractionBasis::MoleFraction),
            other => Err(MixtureError::InvalidParameter(format!(
                "unknown fraction basis '{}', expected 'fmass' or 'fmol'",
                other
            ))),
        }
    }
}

#[derive(Debug)]
pub enum MixtureError {
    InvalidParameter(String),
    LengthMismatch(String),
    PropertyLookup(PropertyError),
}

impl fmt::Display for MixtureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MixtureError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            MixtureError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            MixtureError::PropertyLookup(err) => write!(f, "Property lookup failed: {}", err),
        }
    }
}

impl Error for MixtureError {}

impl From<PropertyError> for MixtureError {
    fn from(err: PropertyError) -> Self {
        MixtureError::PropertyLookup(err)
    }
}

/// apparent molar mass (g/mol), mixture gas constant (J/mol*K) and mixture
/// compressibility factor of a gas mixture; computed once per composition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureProperties {
    pub apparent_molar_mass: f64,
    pub gas_constant: f64,
    pub compressibility: f64,
}

/// Characterize a gas mixture from its composition.
///
/// On a mass basis the apparent molar mass is the harmonic mean
/// `1 / sum(f_mass_i / M_i)`; on a mole basis it is the weighted sum
/// `sum(f_mol_i * M_i)`. The mixture gas constant is `Ru / M_apparent` and
/// the mixture compressibility factor is `sum(f_i * Z_i)` with per-species
/// Z from the property source at the reference state (normal conditions by
/// default).
///
/// The Z sum is defined for mole fractions; when the composition arrives on
/// a mass basis the fractions are used as supplied, which reproduces the
/// original formulation of this balance. See the companion test
/// `mass_basis_z_uses_fractions_as_given`.
pub fn characterize(
    species: &[String],
    molar_masses: &[f64],
    fractions: &[f64],
    fraction_basis: &str,
    provider: &PropertyEnum,
    reference_state: Option<(f64, f64)>,
) -> Result<MixtureProperties, MixtureError> {
    let basis = FractionBasis::from_descriptor(fraction_basis)?;
    if species.len() != fractions.len() || species.len() != molar_masses.len() {
        return Err(MixtureError::LengthMismatch(format!(
            "{} species, {} molar masses, {} fractions",
            species.len(),
            molar_masses.len(),
            fractions.len()
        )));
    }

    let apparent_molar_mass = match basis {
        FractionBasis::MassFraction => {
            let inverse_sum: f64 = fractions
                .iter()
                .zip(molar_masses.iter())
                .map(|(fraction, molar_mass)| fraction / molar_mass)
                .sum();
            1.0 / inverse_sum
        }
        FractionBasis::MoleFraction => fractions
            .iter()
            .zip(molar_masses.iter())
            .map(|(fraction, molar_mass)| fraction * molar_mass)
            .sum(),
    };

    let gas_constant = UNIVERSAL_GAS_CONSTANT / apparent_molar_mass;

    let (t_ref, p_ref) = reference_state.unwrap_or((NORMAL_TEMPERATURE, NORMAL_PRESSURE));
    let mut compressibility = 0.0;
    for (name, fraction) in species.iter().zip(fractions.iter()) {
        let z_i = provider.lookup(GasProperty::CompressibilityFactor, name, t_ref, p_ref)?;
        compressibility += fraction * z_i;
    }

    info!(
        "mixture characterized: M = {:.4} g/mol, R = {:.6} J/(mol K), Z = {:.5}",
        apparent_molar_mass, gas_constant, compressibility
    );

    Ok(MixtureProperties {
        apparent_molar_mass,
        gas_constant,
        compressibility,
    })
}

/// mole fractions of a mixture given on a mass basis, Eq.
/// `f_mol_i = f_mass_i * M_apparent / M_i`
pub fn mole_fractions_from_mass(
    mass_fractions: &[f64],
    molar_masses: &[f64],
    apparent_molar_mass: f64,
) -> Vec<f64> {
    mass_fractions
        .iter()
        .zip(molar_masses.iter())
        .map(|(fraction, molar_mass)| fraction * apparent_molar_mass / molar_mass)
        .collect()
}
