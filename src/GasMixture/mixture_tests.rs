#[cfg(test)]
mod tests {
    use crate::GasMixture::flow::{correct_flow, individual_flows};
    use crate::GasMixture::mixture::{
        FractionBasis, MixtureError, characterize, mole_fractions_from_mass,
    };
    use crate::Thermodynamics::property_api::{ProviderType, create_provider};
    use approx::assert_relative_eq;

    // blast-furnace gas composition of the worked thesis case, mass basis
    fn blast_furnace_gas() -> (Vec<String>, Vec<f64>, Vec<f64>) {
        let species = vec![
            "CO".to_string(),
            "H2".to_string(),
            "H2O".to_string(),
            "CH4".to_string(),
            "N2".to_string(),
            "CO2".to_string(),
        ];
        let molar_masses = vec![28.010, 2.016, 18.015, 16.043, 28.013, 44.010];
        let mass_fractions = vec![0.2215, 0.0546, 0.0988, 0.0102, 0.4673, 0.1476];
        (species, molar_masses, mass_fractions)
    }

    #[test]
    fn test_fraction_basis_descriptors() {
        assert_eq!(
            FractionBasis::from_descriptor("fmass").unwrap(),
            FractionBasis::MassFraction
        );
        assert_eq!(
            FractionBasis::from_descriptor("FMOL").unwrap(),
            FractionBasis::MoleFraction
        );
        assert!(matches!(
            FractionBasis::from_descriptor("volume"),
            Err(MixtureError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unknown_basis_fails_before_any_computation() {
        let provider = create_provider(ProviderType::Moran);
        let (species, molar_masses, mass_fractions) = blast_furnace_gas();
        let result = characterize(
            &species,
            &molar_masses,
            &mass_fractions,
            "volumetric",
            &provider,
            None,
        );
        assert!(matches!(result, Err(MixtureError::InvalidParameter(_))));
    }

    #[test]
    fn test_mole_basis_molar_mass_is_weighted_sum() {
        let provider = create_provider(ProviderType::Moran);
        let species = vec!["N2".to_string(), "O2".to_string()];
        let molar_masses = vec![28.013, 31.999];
        let mole_fractions = vec![0.79, 0.21];
        let properties = characterize(
            &species,
            &molar_masses,
            &mole_fractions,
            "fmol",
            &provider,
            None,
        )
        .unwrap();
        let expected: f64 = 0.79 * 28.013 + 0.21 * 31.999;
        assert_relative_eq!(properties.apparent_molar_mass, expected, epsilon = 1e-9);
        assert_relative_eq!(
            properties.gas_constant,
            8.314462618 / expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_mass_and_mole_basis_agree_on_molar_mass() {
        let provider = create_provider(ProviderType::Moran);
        let (species, molar_masses, mass_fractions) = blast_furnace_gas();

        let from_mass = characterize(
            &species,
            &molar_masses,
            &mass_fractions,
            "fmass",
            &provider,
            None,
        )
        .unwrap();

        // convert the same physical mixture to mole fractions and go the
        // other way
        let mole_fractions = mole_fractions_from_mass(
            &mass_fractions,
            &molar_masses,
            from_mass.apparent_molar_mass,
        );
        let sum: f64 = mole_fractions.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);

        let from_mole = characterize(
            &species,
            &molar_masses,
            &mole_fractions,
            "fmol",
            &provider,
            None,
        )
        .unwrap();

        assert_relative_eq!(
            from_mass.apparent_molar_mass,
            from_mole.apparent_molar_mass,
            epsilon = 1e-6
        );
    }

    // The mixture Z formula is defined over mole fractions, but on a mass
    // basis the fractions are fed in as supplied. This test documents that
    // divergence on a synthetic mixture instead of silently unifying the
    // two bases.
    #[test]
    fn mass_basis_z_uses_fractions_as_given() {
        let provider = create_provider(ProviderType::Moran);
        // H2/CO2: wildly different molar masses so the two fraction bases
        // are far apart
        let species = vec!["H2".to_string(), "CO2".to_string()];
        let molar_masses = vec![2.016, 44.010];
        let mass_fractions = vec![0.5, 0.5];

        let from_mass = characterize(
            &species,
            &molar_masses,
            &mass_fractions,
            "fmass",
            &provider,
            None,
        )
        .unwrap();

        let mole_fractions = mole_fractions_from_mass(
            &mass_fractions,
            &molar_masses,
            from_mass.apparent_molar_mass,
        );
        let from_mole = characterize(
            &species,
            &molar_masses,
            &mole_fractions,
            "fmol",
            &provider,
            None,
        )
        .unwrap();

        // Z(H2) != Z(CO2), so using mass fractions where mole fractions
        // belong must shift the mixture Z
        let difference = (from_mass.compressibility - from_mole.compressibility).abs();
        assert!(
            difference > 1e-4,
            "expected the mass-basis Z approximation to diverge, difference = {}",
            difference
        );
    }

    #[test]
    fn test_correct_flow_is_scale_linear() {
        let (mass_1, molar_1) = correct_flow(4.54, 0.999, 16.354, 368.15);
        let (mass_2, molar_2) = correct_flow(9.08, 0.999, 16.354, 368.15);
        assert_relative_eq!(mass_2, 2.0 * mass_1, epsilon = 1e-9);
        assert_relative_eq!(molar_2, 2.0 * molar_1, epsilon = 1e-9);
    }

    #[test]
    fn test_individual_flows_split_the_totals() {
        let provider = create_provider(ProviderType::Moran);
        let (species, molar_masses, mass_fractions) = blast_furnace_gas();
        let properties = characterize(
            &species,
            &molar_masses,
            &mass_fractions,
            "fmass",
            &provider,
            None,
        )
        .unwrap();
        let (mass_flow, molar_flow) = correct_flow(
            4.54,
            properties.compressibility,
            properties.apparent_molar_mass,
            368.15,
        );

        let record = individual_flows(
            &species,
            &mass_fractions,
            &molar_masses,
            properties.apparent_molar_mass,
            mass_flow,
            molar_flow,
        );

        // mass fractions recombine into the total mass flow
        let total_mass: f64 = record.iter().map(|(_, flow)| flow.mass).sum();
        assert_relative_eq!(total_mass, mass_flow, epsilon = 1e-9);
        // the mole-fraction weights from the mass basis recombine into the
        // total molar flow
        let total_molar = record.total_molar();
        assert_relative_eq!(total_molar, molar_flow, epsilon = 1e-6 * molar_flow);
        // a spot check on one species
        let co = record.get("CO").unwrap();
        assert_relative_eq!(co.mass, 0.2215 * mass_flow, epsilon = 1e-12);
    }
}
