//! Correction of normal volumetric flow into mass and molar flow at the
//! actual state, and the per-species flow record the combustion balance
//! works on.

use crate::GasMixture::mixture::{NORMAL_PRESSURE, UNIVERSAL_GAS_CONSTANT};
use log::info;

/// Correct a normal volumetric flow (SI, m3/s at normal conditions) into
/// `(mass_flow, molar_flow)` at the absolute temperature `t_actual`, using
/// the compressibility factor as the real-gas correction to the general gas
/// law:
///
/// `molar_flow = p * normal_flow / (Z * R * T)`
/// `mass_flow = molar_flow * M_apparent`
///
/// Degenerate inputs (Z = 0, T = 0) are the caller's responsibility; the
/// division propagates as an infinite or NaN value and is not masked here.
pub fn correct_flow_with(
    normal_flow: f64,
    compressibility: f64,
    apparent_molar_mass: f64,
    t_actual: f64,
    gas_constant: f64,
    reference_pressure: f64,
) -> (f64, f64) {
    let molar_flow = (reference_pressure * normal_flow) / (compressibility * gas_constant * t_actual);
    let mass_flow = molar_flow * apparent_molar_mass;
    (mass_flow, molar_flow)
}

/// [`correct_flow_with`] at the default gas constant and reference pressure
pub fn correct_flow(
    normal_flow: f64,
    compressibility: f64,
    apparent_molar_mass: f64,
    t_actual: f64,
) -> (f64, f64) {
    correct_flow_with(
        normal_flow,
        compressibility,
        apparent_molar_mass,
        t_actual,
        UNIVERSAL_GAS_CONSTANT,
        NORMAL_PRESSURE,
    )
}

/// molar and mass flow of one species, mol/s and kg/s
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeciesFlow {
    pub molar: f64,
    pub mass: f64,
}

/// one named physical addition to a flow record; the record itself is never
/// mutated in place, extensions go through [`FlowRecord::extended`] so every
/// change stays auditable
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendDelta {
    /// what physically happened, e.g. "theoretical air oxygen"
    pub operation: &'static str,
    pub species: String,
    pub molar: f64,
    pub mass: f64,
}

/// ordered per-species flow record of the reacting mixture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowRecord {
    entries: Vec<(String, SpeciesFlow)>,
}

impl FlowRecord {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// insert or overwrite an entry, keeping insertion order
    pub fn insert(&mut self, species: &str, flow: SpeciesFlow) {
        match self.entries.iter_mut().find(|(name, _)| name == species) {
            Some((_, existing)) => *existing = flow,
            None => self.entries.push((species.to_string(), flow)),
        }
    }

    pub fn get(&self, species: &str) -> Option<SpeciesFlow> {
        self.entries
            .iter()
            .find(|(name, _)| name == species)
            .map(|(_, flow)| *flow)
    }

    pub fn molar(&self, species: &str) -> Option<f64> {
        self.get(species).map(|flow| flow.molar)
    }

    pub fn mass(&self, species: &str) -> Option<f64> {
        self.get(species).map(|flow| flow.mass)
    }

    pub fn contains(&self, species: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == species)
    }

    /// presence check ignoring case, the way the original balance sheet
    /// recognized its air column
    pub fn contains_ignore_case(&self, species: &str) -> bool {
        self.entries
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(species))
    }

    pub fn get_ignore_case(&self, species: &str) -> Option<SpeciesFlow> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(species))
            .map(|(_, flow)| *flow)
    }

    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SpeciesFlow)> {
        self.entries.iter().map(|(name, flow)| (name.as_str(), *flow))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_molar(&self) -> f64 {
        self.entries.iter().map(|(_, flow)| flow.molar).sum()
    }

    /// New record with the deltas applied: existing entries are incremented,
    /// absent species are appended at the end. The input record stays as it
    /// was; callers must treat the returned record as authoritative.
    pub fn extended(&self, deltas: &[ExtendDelta]) -> FlowRecord {
        let mut extended = self.clone();
        for delta in deltas {
            info!(
                "extending mixture: {} -> {} ({:+.4} mol/s)",
                delta.operation, delta.species, delta.molar
            );
            match extended
                .entries
                .iter_mut()
                .find(|(name, _)| *name == delta.species)
            {
                Some((_, flow)) => {
                    flow.molar += delta.molar;
                    flow.mass += delta.mass;
                }
                None => {
                    extended.entries.push((
                        delta.species.clone(),
                        SpeciesFlow {
                            molar: delta.molar,
                            mass: delta.mass,
                        },
                    ));
                }
            }
        }
        extended
    }
}

/// Individual flows of every species in the mixture from its mass-fraction
/// composition and the corrected totals:
///
/// `mass_i = f_mass_i * mass_flow`
/// `molar_i = f_mass_i * (M_apparent / M_i) * molar_flow`
pub fn individual_flows(
    species: &[String],
    mass_fractions: &[f64],
    molar_masses: &[f64],
    apparent_molar_mass: f64,
    mass_flow: f64,
    molar_flow: f64,
) -> FlowRecord {
    let mut record = FlowRecord::new();
    for ((name, fraction), molar_mass) in species
        .iter()
        .zip(mass_fractions.iter())
        .zip(molar_masses.iter())
    {
        record.insert(
            name,
            SpeciesFlow {
                molar: fraction * (apparent_molar_mass / molar_mass) * molar_flow,
                mass: fraction * mass_flow,
            },
        );
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_correct_flow_defaults() {
        let (mass, molar) = correct_flow(4.54, 1.0, 16.0, 368.15);
        let expected_molar = (101325.0 * 4.54) / (8.314462618 * 368.15);
        assert_relative_eq!(molar, expected_molar, epsilon = 1e-9);
        assert_relative_eq!(mass, expected_molar * 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_inputs_propagate() {
        let (mass, molar) = correct_flow(1.0, 0.0, 16.0, 368.15);
        assert!(molar.is_infinite());
        assert!(mass.is_infinite());
    }

    #[test]
    fn test_extended_appends_and_increments() {
        let mut record = FlowRecord::new();
        record.insert(
            "N2",
            SpeciesFlow {
                molar: 1.0,
                mass: 0.028,
            },
        );
        let deltas = vec![
            ExtendDelta {
                operation: "theoretical air oxygen",
                species: "O2".to_string(),
                molar: 0.5,
                mass: 0.016,
            },
            ExtendDelta {
                operation: "air nitrogen with theoretical oxygen",
                species: "N2".to_string(),
                molar: 1.86,
                mass: 0.052,
            },
        ];
        let extended = record.extended(&deltas);
        // original untouched
        assert_relative_eq!(record.molar("N2").unwrap(), 1.0);
        assert!(!record.contains("O2"));
        // extension applied in order
        assert_relative_eq!(extended.molar("N2").unwrap(), 2.86);
        assert_relative_eq!(extended.molar("O2").unwrap(), 0.5);
        let order: Vec<&str> = extended.species().collect();
        assert_eq!(order, vec!["N2", "O2"]);
    }
}
