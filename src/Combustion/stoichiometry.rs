//! # Combustion Mass Balance
//!
//! ## Aim
//! Expands the per-species flow record of the blast-furnace gas into the
//! balanced combustion equation: the CO2, H2O and N2 product flows, and the
//! theoretical combustion air when the record does not already carry it.
//!
//! ## Main Data Structures and Logic
//! - `AirSupply`: how the combustion air arrives in the record, decided once
//!   at validation time: as the pseudo-species "Ar" standing in for air, as
//!   an explicit O2 entry, or absent entirely so the theoretical demand is
//!   inferred from the fuel species
//! - `balance()`: validates the required species, classifies the air supply
//!   and produces the extended reactant record and the combustion product
//!   record; the air additions of the inferred branch are explicit named
//!   deltas, never silent mutation
//!
//! ## Balance equations
//! `CO2 = n(CO) + n(CH4)`
//! `H2O = n(H2) + n(H2O) + 2 n(CH4)`
//! `O2_theoretical = n(CO)/2 + n(H2)/2 + 2 n(CH4)`
//! `N2 = n(N2) + 3.72 O2`

use crate::GasMixture::flow::{ExtendDelta, FlowRecord, SpeciesFlow};
use crate::Thermodynamics::property_api::{
    GasProperty, PropertyCalculator, PropertyEnum, PropertyError,
};
use crate::GasMixture::mixture::{NORMAL_PRESSURE, NORMAL_TEMPERATURE};
use log::info;
use std::error::Error;
use std::fmt;

/// N2 moles carried along with each mole of O2, as the balance sheet of the
/// original boiler survey writes the combustion air on the product side.
/// The free-O2 adjustment uses the atmospheric 3.76 instead; the divergence
/// is inherited from the source survey and preserved stage by stage.
pub const AIR_N2_PER_O2: f64 = 3.72;

/// species every blast-furnace gas record must carry before balancing
pub const REQUIRED_SPECIES: [&str; 6] = ["CO", "H2", "H2O", "CH4", "N2", "CO2"];

#[derive(Debug)]
pub enum CombustionError {
    MissingSpecies(String),
    PropertyLookup(PropertyError),
}

impl fmt::Display for CombustionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CombustionError::MissingSpecies(species) => {
                write!(f, "Missing required species: {}", species)
            }
            CombustionError::PropertyLookup(err) => {
                write!(f, "Property lookup failed: {}", err)
            }
        }
    }
}

impl Error for CombustionError {}

impl From<PropertyError> for CombustionError {
    fn from(err: PropertyError) -> Self {
        CombustionError::PropertyLookup(err)
    }
}

/// How the combustion air arrives in the reactant record. Decided once when
/// the record is validated, not re-checked per computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirSupply {
    /// an "Ar" entry stands in for the whole combustion air
    AirAsArgon,
    /// the record carries an explicit atmospheric O2 entry
    AirAsOxygen,
    /// no air in the record, the theoretical demand is inferred
    AirInferred,
}

impl AirSupply {
    /// Ar takes precedence over O2; species names are matched ignoring case
    /// the way the original balance sheet recognized its air column
    pub fn classify(record: &FlowRecord) -> AirSupply {
        if record.contains_ignore_case("Ar") {
            AirSupply::AirAsArgon
        } else if record.contains_ignore_case("O2") {
            AirSupply::AirAsOxygen
        } else {
            AirSupply::AirInferred
        }
    }
}

/// result of the mass balance
#[derive(Debug, Clone)]
pub struct BalanceOutcome {
    /// the reactant record extended with the inferred combustion air; the
    /// authoritative record from here on
    pub reactants: FlowRecord,
    /// the combustion gas record: CO2, H2O, N2
    pub products: FlowRecord,
    pub air_supply: AirSupply,
    /// the named air additions applied to the reactants (empty unless the
    /// air was inferred)
    pub deltas: Vec<ExtendDelta>,
    /// theoretical O2 demand, when the record carries or infers one; the
    /// free-O2 adjustment needs this snapshot taken before it runs
    pub theoretical_oxygen: Option<f64>,
}

fn molar_mass_of(provider: &PropertyEnum, species: &str) -> Result<f64, CombustionError> {
    Ok(provider.lookup(
        GasProperty::MolarMass,
        species,
        NORMAL_TEMPERATURE,
        NORMAL_PRESSURE,
    )?)
}

/// Balance the combustion of a blast-furnace gas flow record.
///
/// The record must carry CO, H2, H2O, CH4, N2 and CO2; Ar and O2 are
/// optional and select the air-supply case. In the inferred-air case the
/// returned reactant record gains an O2 entry and additional N2; the input
/// record is left untouched, so callers must use the returned record.
pub fn balance(
    reactants: &FlowRecord,
    provider: &PropertyEnum,
) -> Result<BalanceOutcome, CombustionError> {
    for required in REQUIRED_SPECIES {
        if !reactants.contains(required) {
            return Err(CombustionError::MissingSpecies(required.to_string()));
        }
    }

    let air_supply = AirSupply::classify(reactants);
    info!("combustion air supply case: {:?}", air_supply);

    let n_co = reactants.molar("CO").unwrap();
    let n_h2 = reactants.molar("H2").unwrap();
    let n_h2o = reactants.molar("H2O").unwrap();
    let n_ch4 = reactants.molar("CH4").unwrap();
    let n_n2 = reactants.molar("N2").unwrap();

    let co2_product = n_co + n_ch4;
    let h2o_product = n_h2 + n_h2o + 2.0 * n_ch4;

    let mut deltas: Vec<ExtendDelta> = Vec::new();
    let mut theoretical_oxygen = None;

    // the product N2 always uses the reactant N2 as it stood before any air
    // extension
    let n2_product = match air_supply {
        AirSupply::AirAsArgon => {
            let n_ar = reactants.get_ignore_case("Ar").unwrap().molar;
            n_n2 + AIR_N2_PER_O2 * n_ar
        }
        AirSupply::AirAsOxygen => {
            let n_o2 = reactants.get_ignore_case("O2").unwrap().molar;
            theoretical_oxygen = Some(n_o2);
            n_n2 + AIR_N2_PER_O2 * n_o2
        }
        AirSupply::AirInferred => {
            let o2_required = n_co / 2.0 + n_h2 / 2.0 + 2.0 * n_ch4;
            theoretical_oxygen = Some(o2_required);
            let air_nitrogen = AIR_N2_PER_O2 * o2_required;
            deltas.push(ExtendDelta {
                operation: "theoretical air oxygen",
                species: "O2".to_string(),
                molar: o2_required,
                mass: o2_required * molar_mass_of(provider, "O2")?,
            });
            deltas.push(ExtendDelta {
                operation: "air nitrogen with theoretical oxygen",
                species: "N2".to_string(),
                molar: air_nitrogen,
                mass: air_nitrogen * molar_mass_of(provider, "N2")?,
            });
            n_n2 + AIR_N2_PER_O2 * o2_required
        }
    };

    let extended_reactants = if deltas.is_empty() {
        reactants.clone()
    } else {
        reactants.extended(&deltas)
    };

    let mut products = FlowRecord::new();
    for (species, molar) in [
        ("CO2", co2_product),
        ("H2O", h2o_product),
        ("N2", n2_product),
    ] {
        products.insert(
            species,
            SpeciesFlow {
                molar,
                mass: molar * molar_mass_of(provider, species)?,
            },
        );
    }

    info!(
        "combustion balanced: CO2 {:.4}, H2O {:.4}, N2 {:.4} mol/s",
        co2_product, h2o_product, n2_product
    );

    Ok(BalanceOutcome {
        reactants: extended_reactants,
        products,
        air_supply,
        deltas,
        theoretical_oxygen,
    })
}
