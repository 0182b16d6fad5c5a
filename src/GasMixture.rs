/// correction of normal volumetric flow into mass and molar flow and the
/// per-species flow record
pub mod flow;
/// apparent molar mass, gas constant and compressibility factor of the gas
/// mixture
/// # Examples
/// ```
/// use BfgComb::GasMixture::mixture::characterize;
/// use BfgComb::Thermodynamics::property_api::create_provider_by_name;
/// let provider = create_provider_by_name("moran");
/// let species = vec!["N2".to_string(), "O2".to_string()];
/// let molar_masses = vec![28.013, 31.999];
/// let mole_fractions = vec![0.79, 0.21];
/// let properties =
///     characterize(&species, &molar_masses, &mole_fractions, "fmol", &provider, None).unwrap();
/// println!("apparent molar mass {} g/mol", properties.apparent_molar_mass);
/// assert!(properties.apparent_molar_mass > 28.0);
/// ```
pub mod mixture;
/// tests
pub mod mixture_tests;
