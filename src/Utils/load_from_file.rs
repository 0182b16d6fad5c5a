use log::{error, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// the split-table layout of the composition file: column labels are
/// species, row labels name the quantity, data rows hold the numbers
#[derive(Debug, Deserialize)]
struct SplitTable {
    columns: Vec<String>,
    index: Vec<String>,
    data: Vec<Vec<f64>>,
}

/// composition of the blast-furnace gas as loaded from the survey table:
/// one molar mass (g/mol) and one mass fraction per species
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionTable {
    pub species: Vec<String>,
    pub molar_masses: Vec<f64>,
    pub mass_fractions: Vec<f64>,
}

impl CompositionTable {
    /// Build a validated composition: equal-length vectors and mass
    /// fractions summing to one within tolerance.
    pub fn new(
        species: Vec<String>,
        molar_masses: Vec<f64>,
        mass_fractions: Vec<f64>,
    ) -> Result<Self, String> {
        if species.len() != molar_masses.len() || species.len() != mass_fractions.len() {
            return Err(format!(
                "composition table length mismatch: {} species, {} molar masses, {} fractions",
                species.len(),
                molar_masses.len(),
                mass_fractions.len()
            ));
        }
        let sum: f64 = mass_fractions.iter().sum();
        if (sum - 1.0).abs() > 1e-3 {
            return Err(format!("mass fractions sum to {} instead of 1.0", sum));
        }
        if (sum - 1.0).abs() > 1e-6 {
            warn!("mass fractions sum to {} - tolerating the rounding", sum);
        }
        Ok(Self {
            species,
            molar_masses,
            mass_fractions,
        })
    }
}

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    pub fn load_composition(&self) -> Result<CompositionTable, String> {
        load_composition_table(&self.file_name)
    }
}

/// Parses the composition file of the boiler survey: a JSON split table
/// with the species as columns and two rows, the molar masses (the row
/// label mentions "Molar") and the composition in percent by mass (the row
/// label contains '%'). Percentages are converted to fractions.
pub fn load_composition_table(file_name: &str) -> Result<CompositionTable, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return Err(format!("Failed to open file '{}': {}", file_name, e)),
    };
    let mut file_contents = String::new();
    if let Err(e) = file.read_to_string(&mut file_contents) {
        return Err(format!("Failed to read file '{}': {}", file_name, e));
    }

    let table: SplitTable = match serde_json::from_str(&file_contents) {
        Ok(table) => table,
        Err(e) => {
            let error_msg = format!(
                "Error parsing composition table at line {}, column {}: {}",
                e.line(),
                e.column(),
                e
            );
            error!("{}", error_msg);
            return Err(error_msg);
        }
    };

    if table.index.len() != table.data.len() {
        return Err(format!(
            "composition table has {} row labels for {} data rows",
            table.index.len(),
            table.data.len()
        ));
    }
    for (label, row) in table.index.iter().zip(table.data.iter()) {
        if row.len() != table.columns.len() {
            return Err(format!(
                "row '{}' has {} values for {} species",
                label,
                row.len(),
                table.columns.len()
            ));
        }
    }

    let mut molar_masses = None;
    let mut mass_fractions = None;
    for (label, row) in table.index.iter().zip(table.data.iter()) {
        if label.contains('%') {
            mass_fractions = Some(row.iter().map(|percent| percent / 100.0).collect());
        } else if label.to_lowercase().contains("molar") {
            molar_masses = Some(row.clone());
        }
    }

    let molar_masses = molar_masses
        .ok_or_else(|| "no molar mass row found in the composition table".to_string())?;
    let mass_fractions = mass_fractions
        .ok_or_else(|| "no mass-percent row found in the composition table".to_string())?;

    let composition = CompositionTable::new(table.columns, molar_masses, mass_fractions)?;
    info!(
        "Successfully parsed composition for {} species from file '{}'",
        composition.species.len(),
        file_name
    );
    Ok(composition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SURVEY_TABLE: &str = r#"{
        "columns": ["CO", "H2", "H2O", "CH4", "N2", "CO2"],
        "index": ["Massa Molar - (g/mol)", "% em Massa"],
        "data": [
            [28.010, 2.016, 18.015, 16.043, 28.013, 44.010],
            [22.15, 5.46, 9.88, 1.02, 46.73, 14.76]
        ]
    }"#;

    #[test]
    fn test_load_composition_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SURVEY_TABLE.as_bytes()).unwrap();
        let composition = load_composition_table(file.path().to_str().unwrap()).unwrap();
        assert_eq!(composition.species.len(), 6);
        assert_eq!(composition.species[0], "CO");
        assert!((composition.molar_masses[5] - 44.010).abs() < 1e-12);
        // percentages arrive as fractions
        assert!((composition.mass_fractions[0] - 0.2215).abs() < 1e-12);
        let sum: f64 = composition.mass_fractions.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_file() {
        let result = load_composition_table("no_such_composition.json");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("does not exist"));
    }

    #[test]
    fn test_fractions_must_sum_to_one() {
        let result = CompositionTable::new(
            vec!["CO".to_string(), "N2".to_string()],
            vec![28.010, 28.013],
            vec![0.5, 0.3],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json_is_reported_with_position() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"columns\": [").unwrap();
        let result = load_composition_table(file.path().to_str().unwrap());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("line"));
    }
}
