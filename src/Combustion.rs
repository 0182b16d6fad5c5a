/// adiabatic flame temperature by the Moran-Shapiro iterative search
pub mod adiabatic;
/// free-O2 demand in the dry combustion gas and excess-air accounting
pub mod free_oxygen;
/// stoichiometric mass balance of the blast-furnace gas combustion
/// # Examples
/// ```
/// use BfgComb::Combustion::stoichiometry::{AirSupply, balance};
/// use BfgComb::GasMixture::flow::{FlowRecord, SpeciesFlow};
/// use BfgComb::Thermodynamics::property_api::create_provider_by_name;
/// let provider = create_provider_by_name("moran");
/// let mut record = FlowRecord::new();
/// for (species, molar) in [
///     ("CO", 0.0446),
///     ("H2", 0.0153),
///     ("H2O", 0.0310),
///     ("CH4", 0.0036),
///     ("N2", 0.0943),
///     ("CO2", 0.0190),
/// ] {
///     record.insert(species, SpeciesFlow { molar, mass: 0.0 });
/// }
/// let outcome = balance(&record, &provider).unwrap();
/// assert_eq!(outcome.air_supply, AirSupply::AirInferred);
/// assert!(outcome.reactants.contains("O2"));
/// ```
pub mod stoichiometry;
