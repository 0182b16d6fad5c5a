//! Free-O2 demand in the dry combustion gas and the resulting excess of
//! combustion air over the theoretical demand.

use crate::Combustion::stoichiometry::CombustionError;
use crate::GasMixture::flow::{ExtendDelta, FlowRecord};
use crate::GasMixture::mixture::{NORMAL_PRESSURE, NORMAL_TEMPERATURE};
use crate::Thermodynamics::property_api::{GasProperty, PropertyCalculator, PropertyEnum};
use log::info;

/// atmospheric N2:O2 mole ratio used for the extra air that carries the
/// free oxygen; the mass balance itself writes its air with 3.72
pub const ATMOSPHERIC_N2_PER_O2: f64 = 3.76;

/// volumetric free-O2 target in the dry combustion gas of the boiler survey
pub const DEFAULT_FREE_O2_TARGET: f64 = 0.10;

/// Demand coefficient `k` in `O2_free = k * V_gc`, obtained by solving
/// `target = O2_free / (V_gc + 4.76 O2_free)` for `O2_free`:
/// `k = target / (1 - 4.76 target)`. At the 10% target this is the 0.1908
/// of the original survey. The coefficient depends on the target and must
/// be recomputed when the target changes.
pub fn free_oxygen_coefficient(target_fraction: f64) -> f64 {
    target_fraction / (1.0 - 4.76 * target_fraction)
}

/// result of the free-O2 adjustment
#[derive(Debug, Clone)]
pub struct FreeOxygenOutcome {
    /// the reactant record with the free-O2 air added; authoritative
    pub reactants: FlowRecord,
    /// the named additions applied to the reactants
    pub deltas: Vec<ExtendDelta>,
    /// dry combustion gas volume `V_gc = n(CO2) + n(N2)`, mol/s
    pub dry_gas_volume: f64,
    /// free O2 demand, mol/s
    pub free_oxygen: f64,
    /// excess of actual over theoretical combustion air, percent
    pub excess_air_percent: f64,
}

/// Add the free-O2 demand to the reacting mixture and compute the excess of
/// air over the theoretical demand.
///
/// `theoretical_oxygen` must be the O2 flow captured **before** this
/// adjustment extends the record (the balancer reports it as
/// `theoretical_oxygen`); passing the post-adjustment value silently
/// corrupts the excess-air figure.
pub fn adjust_for_free_oxygen(
    reactants: &FlowRecord,
    products: &FlowRecord,
    theoretical_oxygen: f64,
    target_fraction: f64,
    provider: &PropertyEnum,
) -> Result<FreeOxygenOutcome, CombustionError> {
    let co2 = products
        .molar("CO2")
        .ok_or_else(|| CombustionError::MissingSpecies("CO2".to_string()))?;
    let n2 = products
        .molar("N2")
        .ok_or_else(|| CombustionError::MissingSpecies("N2".to_string()))?;

    // dry basis: the water in the combustion gas does not count
    let dry_gas_volume = co2 + n2;
    let free_oxygen = free_oxygen_coefficient(target_fraction) * dry_gas_volume;

    let o2_molar_mass = provider.lookup(
        GasProperty::MolarMass,
        "O2",
        NORMAL_TEMPERATURE,
        NORMAL_PRESSURE,
    )?;
    let n2_molar_mass = provider.lookup(
        GasProperty::MolarMass,
        "N2",
        NORMAL_TEMPERATURE,
        NORMAL_PRESSURE,
    )?;

    let companion_nitrogen = free_oxygen * ATMOSPHERIC_N2_PER_O2;
    let deltas = vec![
        ExtendDelta {
            operation: "free-oxygen companion nitrogen",
            species: "N2".to_string(),
            molar: companion_nitrogen,
            mass: companion_nitrogen * n2_molar_mass,
        },
        ExtendDelta {
            operation: "free-oxygen demand",
            species: "O2".to_string(),
            molar: free_oxygen,
            mass: free_oxygen * o2_molar_mass,
        },
    ];
    let extended_reactants = reactants.extended(&deltas);

    let actual_oxygen = extended_reactants
        .molar("O2")
        .ok_or_else(|| CombustionError::MissingSpecies("O2".to_string()))?;
    let excess_air_percent = (1.0 - actual_oxygen / theoretical_oxygen).abs() * 100.0;

    info!(
        "free O2 {:.4} mol/s over V_gc {:.4} mol/s, excess air {:.3} %",
        free_oxygen, dry_gas_volume, excess_air_percent
    );

    Ok(FreeOxygenOutcome {
        reactants: extended_reactants,
        deltas,
        dry_gas_volume,
        free_oxygen,
        excess_air_percent,
    })
}
