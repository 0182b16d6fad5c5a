use crate::Combustion::adiabatic::FlameTemperatureSolver;
use crate::Combustion::free_oxygen::{DEFAULT_FREE_O2_TARGET, adjust_for_free_oxygen};
use crate::Combustion::stoichiometry::balance;
use crate::GasMixture::flow::{correct_flow, individual_flows};
use crate::GasMixture::mixture::characterize;
use crate::Thermodynamics::enthalpy_table::init_enthalpy_table;
use crate::Thermodynamics::property_api::{PropertyEnum, ProviderType, create_provider};
use crate::Utils::load_from_file::{CompositionTable, load_composition_table};
use crate::Utils::trace_output::{print_balance_summary, print_solution_summary, write_iteration_trace};
use prettytable::{Table, row};
use reqwest::blocking::Client;
use std::time::Duration;

/// gas inlet temperature of the boiler survey, K (95 C)
const GAS_INLET_TEMPERATURE: f64 = 368.15;
/// normal volumetric flow of the worked case, m3/s
const SURVEY_NORMAL_FLOW: f64 = 4.54;

/// the blast-furnace gas composition of the survey; used when no
/// composition file sits next to the binary
fn survey_composition() -> CompositionTable {
    CompositionTable::new(
        vec![
            "CO".to_string(),
            "H2".to_string(),
            "H2O".to_string(),
            "CH4".to_string(),
            "N2".to_string(),
            "CO2".to_string(),
        ],
        vec![28.010, 2.016, 18.015, 16.043, 28.013, 44.010],
        vec![0.2215, 0.0546, 0.0988, 0.0102, 0.4673, 0.1476],
    )
    .unwrap()
}

fn load_or_default_composition() -> CompositionTable {
    match load_composition_table("composicao.json") {
        Ok(composition) => composition,
        Err(_) => {
            println!("no composition file found, using the built-in survey composition");
            survey_composition()
        }
    }
}

/// run the whole balance for one normal flow and return the flame
/// temperature and excess air
fn run_balance(
    composition: &CompositionTable,
    normal_flow: f64,
    provider: &PropertyEnum,
    verbose: bool,
) -> Option<(f64, f64)> {
    let properties = characterize(
        &composition.species,
        &composition.molar_masses,
        &composition.mass_fractions,
        "fmass",
        provider,
        None,
    )
    .ok()?;
    if verbose {
        println!(
            "apparent molar mass {:.4} g/mol, R {:.6} J/(mol K), Z {:.5}",
            properties.apparent_molar_mass, properties.gas_constant, properties.compressibility
        );
    }

    let (mass_flow, molar_flow) = correct_flow(
        normal_flow,
        properties.compressibility,
        properties.apparent_molar_mass,
        GAS_INLET_TEMPERATURE,
    );
    if verbose {
        println!(
            "at {} K the corrected flows are {:.3} (mass) and {:.3} mol/s",
            GAS_INLET_TEMPERATURE, mass_flow, molar_flow
        );
    }

    let record = individual_flows(
        &composition.species,
        &composition.mass_fractions,
        &composition.molar_masses,
        properties.apparent_molar_mass,
        mass_flow,
        molar_flow,
    );

    let balanced = balance(&record, provider).ok()?;
    let theoretical_oxygen = balanced.theoretical_oxygen?;
    let adjusted = adjust_for_free_oxygen(
        &balanced.reactants,
        &balanced.products,
        theoretical_oxygen,
        DEFAULT_FREE_O2_TARGET,
        provider,
    )
    .ok()?;

    let solver = FlameTemperatureSolver::new(provider);
    let solution = solver.solve(&adjusted.reactants, &balanced.products).ok()?;
    if verbose {
        print_balance_summary(&adjusted.reactants, &balanced.products);
        print_solution_summary(&solution, adjusted.excess_air_percent);
        if let Err(e) = write_iteration_trace("adiabatic_flame_trace.csv", &solution.trace) {
            println!("trace not written: {}", e);
        }
    }
    Some((solution.temperature, adjusted.excess_air_percent))
}

pub fn boiler_examples(task: usize) {
    // one-shot, best-effort refresh of the formation enthalpies; a short
    // timeout so an unreachable WebBook cannot stall the balance
    let client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap_or_else(|_| Client::new());
    let status = init_enthalpy_table(client);
    println!("enthalpy table status: {:?}", status);

    let provider = create_provider(ProviderType::Moran);

    match task {
        0 => {
            // the worked survey case: 4.54 Nm3/s of blast-furnace gas at
            // 95 C with a 10% free-O2 target
            let composition = load_or_default_composition();
            match run_balance(&composition, SURVEY_NORMAL_FLOW, &provider, true) {
                Some((temperature, excess_air)) => {
                    println!(
                        "adiabatic flame temperature {:.2} K with {:.3} % excess air",
                        temperature, excess_air
                    );
                }
                None => println!("balance failed for the survey case"),
            }
        }
        1 => {
            // flow sweep of the survey: 14e3 to 17e3 Nm3/h in 500 Nm3/h
            // steps
            let composition = load_or_default_composition();
            let mut table = Table::new();
            table.add_row(row![
                "Normal flow (Nm3/h)",
                "Flame temperature (K)",
                "Excess air (%)"
            ]);
            let mut flow_nm3_h = 14_000.0;
            while flow_nm3_h < 17_000.0 {
                let normal_flow = flow_nm3_h / 3600.0;
                match run_balance(&composition, normal_flow, &provider, false) {
                    Some((temperature, excess_air)) => {
                        table.add_row(row![
                            flow_nm3_h,
                            format!("{:.2}", temperature),
                            format!("{:.3}", excess_air)
                        ]);
                    }
                    None => {
                        table.add_row(row![flow_nm3_h, "failed", "-"]);
                    }
                }
                flow_nm3_h += 500.0;
            }
            table.printstd();
        }
        _ => {
            println!("no such task");
        }
    }
}
