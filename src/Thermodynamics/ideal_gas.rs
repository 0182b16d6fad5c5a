use crate::Thermodynamics::formula_mass::calculate_molar_mass;
use crate::Thermodynamics::property_api::{GasProperty, PropertyCalculator, PropertyError};

/// Ideal-gas property source: the compressibility factor is exactly 1 and
/// the molar mass is computed from the chemical formula. Molar enthalpy is
/// not provided, so the flame temperature solver needs the tabulated source;
/// this one covers the mixture and flow stages when no table data exists for
/// a species.
#[derive(Debug, Clone, Default)]
pub struct IdealGasData;

impl IdealGasData {
    pub fn new() -> Self {
        Self
    }
}

impl PropertyCalculator for IdealGasData {
    fn lookup(
        &self,
        property: GasProperty,
        species: &str,
        _t: f64,
        _p: f64,
    ) -> Result<f64, PropertyError> {
        match property {
            GasProperty::MolarMass => calculate_molar_mass(species)
                .map(|(molar_mass, _)| molar_mass)
                .map_err(|_| PropertyError::SpeciesNotFound(species.to_string())),
            GasProperty::CompressibilityFactor => Ok(1.0),
            GasProperty::MolarEnthalpy => Err(PropertyError::PropertyUnavailable {
                species: species.to_string(),
                property: GasProperty::MolarEnthalpy,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ideal_gas_lookups() {
        let ideal = IdealGasData::new();
        let molar_mass = ideal
            .lookup(GasProperty::MolarMass, "CO2", 273.153, 101325.0)
            .unwrap();
        assert_relative_eq!(molar_mass, 44.009, epsilon = 1e-3);

        let z = ideal
            .lookup(GasProperty::CompressibilityFactor, "CO2", 273.153, 101325.0)
            .unwrap();
        assert_relative_eq!(z, 1.0);

        assert!(matches!(
            ideal.lookup(GasProperty::MolarEnthalpy, "CO2", 500.0, 101325.0),
            Err(PropertyError::PropertyUnavailable { .. })
        ));
    }
}
