/// process-wide table of formation and reference enthalpies with one-shot
/// best-effort NIST refresh
pub mod enthalpy_table;
/// chemical formula parsing and molar mass calculation
pub mod formula_mass;
/// ideal-gas fallback property source
pub mod ideal_gas;
#[allow(non_snake_case)]
/// best-effort fetch of gas-phase formation enthalpies from the NIST
/// Chemistry WebBook
pub mod NIST_fetch;
#[allow(non_snake_case)]
/// built-in tabulated property source (molar masses, compressibility
/// factors, molar enthalpy grids)
pub mod MoranData;
/// property source interface and dispatch
/// # Examples
/// ```
/// use BfgComb::Thermodynamics::property_api::{
///     GasProperty, PropertyCalculator, create_provider_by_name,
/// };
/// let provider = create_provider_by_name("moran");
/// let h = provider
///     .lookup(GasProperty::MolarEnthalpy, "CO2", 1000.0, 101325.0)
///     .unwrap();
/// println!("h(CO2, 1000 K) = {} kJ/kmol", h);
/// assert!(h > 0.0);
/// ```
pub mod property_api;
