//! # Ideal-Gas Property Tables (Moran & Shapiro, Table A-23 style)
//!
//! ## Aim
//! Built-in tabulated property source for the blast-furnace gas species and
//! their combustion products. Holds molar masses, compressibility factors at
//! normal conditions and molar enthalpy grids over temperature, and answers
//! the property lookups the mixture characterizer and the flame temperature
//! solver need without any network access.
//!
//! ## Main Data Structures and Logic
//! - `MoranData`: maps of molar mass, normal-condition Z and enthalpy grids
//! - molar enthalpy h(T) is obtained by linear interpolation on the grid of
//!   the requested species; temperatures outside the grid are an error, not
//!   an extrapolation
//! - implements `PropertyCalculator` so it can stand behind `PropertyEnum`

use crate::Thermodynamics::property_api::{GasProperty, PropertyCalculator, PropertyError};
use prettytable::{Table, row};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum MoranError {
    SpeciesNotFound(String),
    TemperatureOutOfRange {
        species: String,
        temperature: f64,
        range: String,
    },
}

impl fmt::Display for MoranError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoranError::SpeciesNotFound(species) => {
                write!(f, "Species not found in the tables: {}", species)
            }
            MoranError::TemperatureOutOfRange {
                species,
                temperature,
                range,
            } => {
                write!(
                    f,
                    "No enthalpy data for {} at {} K. Valid range: {}",
                    species, temperature, range
                )
            }
        }
    }
}

impl Error for MoranError {}

impl From<MoranError> for PropertyError {
    fn from(err: MoranError) -> Self {
        match err {
            MoranError::SpeciesNotFound(species) => PropertyError::SpeciesNotFound(species),
            MoranError::TemperatureOutOfRange {
                species,
                temperature,
                range,
            } => PropertyError::TemperatureOutOfRange {
                species,
                temperature,
                range,
            },
        }
    }
}

// Molar enthalpies in kJ/kmol on a temperature grid in K, ideal-gas
// reference, Table A-23 values.
const CO2_ENTHALPY: &[(f64, f64)] = &[
    (298.0, 9364.0),
    (400.0, 13372.0),
    (500.0, 17678.0),
    (600.0, 22280.0),
    (700.0, 27125.0),
    (800.0, 32179.0),
    (900.0, 37405.0),
    (1000.0, 42769.0),
    (1100.0, 48258.0),
    (1200.0, 53848.0),
    (1300.0, 59522.0),
    (1400.0, 65271.0),
    (1500.0, 71078.0),
    (1600.0, 76944.0),
    (1800.0, 88806.0),
    (2000.0, 100804.0),
    (2200.0, 112939.0),
    (2400.0, 125152.0),
];

const H2O_ENTHALPY: &[(f64, f64)] = &[
    (298.0, 9904.0),
    (400.0, 13356.0),
    (500.0, 16828.0),
    (600.0, 20402.0),
    (700.0, 24088.0),
    (800.0, 27896.0),
    (900.0, 31828.0),
    (1000.0, 35882.0),
    (1100.0, 40071.0),
    (1200.0, 44380.0),
    (1300.0, 48807.0),
    (1400.0, 53351.0),
    (1500.0, 57999.0),
    (1600.0, 62748.0),
    (1800.0, 72513.0),
    (2000.0, 82593.0),
    (2200.0, 92940.0),
    (2400.0, 103508.0),
];

const N2_ENTHALPY: &[(f64, f64)] = &[
    (298.0, 8669.0),
    (400.0, 11640.0),
    (500.0, 14581.0),
    (600.0, 17563.0),
    (700.0, 20604.0),
    (800.0, 23714.0),
    (900.0, 26890.0),
    (1000.0, 30129.0),
    (1100.0, 33426.0),
    (1200.0, 36777.0),
    (1300.0, 40170.0),
    (1400.0, 43605.0),
    (1500.0, 47073.0),
    (1600.0, 50571.0),
    (1800.0, 57651.0),
    (2000.0, 64810.0),
    (2200.0, 72040.0),
    (2400.0, 79320.0),
];

const O2_ENTHALPY: &[(f64, f64)] = &[
    (298.0, 8682.0),
    (400.0, 11711.0),
    (500.0, 14770.0),
    (600.0, 17929.0),
    (700.0, 21184.0),
    (800.0, 24523.0),
    (900.0, 27928.0),
    (1000.0, 31389.0),
    (1100.0, 34899.0),
    (1200.0, 38447.0),
    (1300.0, 42033.0),
    (1400.0, 45648.0),
    (1500.0, 49292.0),
    (1600.0, 52961.0),
    (1800.0, 60371.0),
    (2000.0, 67881.0),
    (2200.0, 75484.0),
    (2400.0, 83174.0),
];

const CO_ENTHALPY: &[(f64, f64)] = &[
    (298.0, 8669.0),
    (400.0, 11644.0),
    (500.0, 14600.0),
    (600.0, 17611.0),
    (700.0, 20690.0),
    (800.0, 23844.0),
    (900.0, 27066.0),
    (1000.0, 30355.0),
    (1100.0, 33702.0),
    (1200.0, 37095.0),
    (1400.0, 44007.0),
    (1600.0, 51053.0),
    (1800.0, 58191.0),
    (2000.0, 65408.0),
];

const H2_ENTHALPY: &[(f64, f64)] = &[
    (298.0, 8468.0),
    (400.0, 11426.0),
    (500.0, 14350.0),
    (600.0, 17280.0),
    (700.0, 20235.0),
    (800.0, 23274.0),
    (900.0, 26398.0),
    (1000.0, 29618.0),
];

// Molar masses in g/mol and compressibility factors at the normal state
// 273.153 K / 101325 Pa for the species handled by the balance.
const SPECIES_CONSTANTS: &[(&str, f64, f64)] = &[
    ("CO", 28.010, 0.9995),
    ("H2", 2.016, 1.0006),
    ("H2O", 18.015, 0.9850),
    ("CH4", 16.043, 0.9976),
    ("N2", 28.013, 0.9995),
    ("CO2", 44.010, 0.9933),
    ("O2", 31.999, 0.9990),
    ("Ar", 39.948, 0.9991),
];

#[derive(Debug, Clone)]
pub struct MoranData {
    /// molar enthalpy grids, species -> [(T, h)]
    enthalpy_grids: HashMap<String, Vec<(f64, f64)>>,
    /// molar masses, g/mol
    molar_masses: HashMap<String, f64>,
    /// compressibility factors at the normal state
    z_normal: HashMap<String, f64>,
}

impl MoranData {
    pub fn new() -> Self {
        let mut enthalpy_grids = HashMap::new();
        enthalpy_grids.insert("CO2".to_string(), CO2_ENTHALPY.to_vec());
        enthalpy_grids.insert("H2O".to_string(), H2O_ENTHALPY.to_vec());
        enthalpy_grids.insert("N2".to_string(), N2_ENTHALPY.to_vec());
        enthalpy_grids.insert("O2".to_string(), O2_ENTHALPY.to_vec());
        enthalpy_grids.insert("CO".to_string(), CO_ENTHALPY.to_vec());
        enthalpy_grids.insert("H2".to_string(), H2_ENTHALPY.to_vec());

        let mut molar_masses = HashMap::new();
        let mut z_normal = HashMap::new();
        for (species, molar_mass, z) in SPECIES_CONSTANTS {
            molar_masses.insert(species.to_string(), *molar_mass);
            z_normal.insert(species.to_string(), *z);
        }

        Self {
            enthalpy_grids,
            molar_masses,
            z_normal,
        }
    }

    pub fn molar_mass(&self, species: &str) -> Result<f64, MoranError> {
        self.molar_masses
            .get(species)
            .copied()
            .ok_or_else(|| MoranError::SpeciesNotFound(species.to_string()))
    }

    /// compressibility factor tabulated at the normal state; the tables do
    /// not resolve Z over temperature and pressure
    pub fn compressibility(&self, species: &str) -> Result<f64, MoranError> {
        self.z_normal
            .get(species)
            .copied()
            .ok_or_else(|| MoranError::SpeciesNotFound(species.to_string()))
    }

    /// molar enthalpy h(T) in kJ/kmol by linear interpolation on the grid
    pub fn enthalpy(&self, species: &str, temperature: f64) -> Result<f64, MoranError> {
        let grid = self
            .enthalpy_grids
            .get(species)
            .ok_or_else(|| MoranError::SpeciesNotFound(species.to_string()))?;

        let (t_min, _) = grid[0];
        let (t_max, _) = grid[grid.len() - 1];
        if temperature < t_min || temperature > t_max {
            return Err(MoranError::TemperatureOutOfRange {
                species: species.to_string(),
                temperature,
                range: format!("{} - {} K", t_min, t_max),
            });
        }

        for window in grid.windows(2) {
            let (t0, h0) = window[0];
            let (t1, h1) = window[1];
            if temperature >= t0 && temperature <= t1 {
                return Ok(h0 + (h1 - h0) * (temperature - t0) / (t1 - t0));
            }
        }
        // grid temperatures are strictly increasing so the window scan is
        // exhaustive within [t_min, t_max]
        unreachable!("enthalpy grid for {} is not monotone", species)
    }

    pub fn tabulated_species(&self) -> Vec<String> {
        let mut species: Vec<String> = self.molar_masses.keys().cloned().collect();
        species.sort();
        species
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Species", "M (g/mol)", "Z at normal state", "h(T) range (K)"]);
        for species in self.tabulated_species() {
            let range = match self.enthalpy_grids.get(&species) {
                Some(grid) => format!("{} - {}", grid[0].0, grid[grid.len() - 1].0),
                None => "-".to_string(),
            };
            table.add_row(row![
                species,
                self.molar_masses[&species],
                self.z_normal[&species],
                range
            ]);
        }
        table.printstd();
    }
}

impl Default for MoranData {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyCalculator for MoranData {
    fn lookup(
        &self,
        property: GasProperty,
        species: &str,
        t: f64,
        _p: f64,
    ) -> Result<f64, PropertyError> {
        match property {
            GasProperty::MolarMass => Ok(self.molar_mass(species)?),
            GasProperty::CompressibilityFactor => Ok(self.compressibility(species)?),
            GasProperty::MolarEnthalpy => Ok(self.enthalpy(species, t)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_enthalpy_at_grid_points() {
        let data = MoranData::new();
        assert_relative_eq!(data.enthalpy("CO2", 1000.0).unwrap(), 42769.0);
        assert_relative_eq!(data.enthalpy("H2O", 800.0).unwrap(), 27896.0);
        assert_relative_eq!(data.enthalpy("N2", 1000.0).unwrap(), 30129.0);
        assert_relative_eq!(data.enthalpy("O2", 800.0).unwrap(), 24523.0);
    }

    #[test]
    fn test_enthalpy_interpolates_between_rows() {
        let data = MoranData::new();
        // midway between the 900 and 1000 K rows
        let h = data.enthalpy("N2", 950.0).unwrap();
        assert_relative_eq!(h, (26890.0 + 30129.0) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_temperature_out_of_range() {
        let data = MoranData::new();
        let result = data.enthalpy("CO2", 100.0);
        assert!(matches!(
            result,
            Err(MoranError::TemperatureOutOfRange { .. })
        ));
        let result = data.enthalpy("CO2", 5000.0);
        assert!(matches!(
            result,
            Err(MoranError::TemperatureOutOfRange { .. })
        ));
    }

    #[test]
    fn test_unknown_species() {
        let data = MoranData::new();
        assert!(matches!(
            data.enthalpy("SO2", 500.0),
            Err(MoranError::SpeciesNotFound(_))
        ));
        assert!(matches!(
            data.molar_mass("SO2"),
            Err(MoranError::SpeciesNotFound(_))
        ));
    }

    #[test]
    fn test_lookup_dispatch() {
        let data = MoranData::new();
        let molar_mass = data
            .lookup(GasProperty::MolarMass, "CH4", 273.153, 101325.0)
            .unwrap();
        assert_relative_eq!(molar_mass, 16.043);
        let z = data
            .lookup(GasProperty::CompressibilityFactor, "N2", 273.153, 101325.0)
            .unwrap();
        assert!(z > 0.99 && z < 1.01);
    }
}
