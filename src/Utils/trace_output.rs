use crate::Combustion::adiabatic::{FlameSolution, IterationRecord};
use crate::GasMixture::flow::FlowRecord;
use log::info;
use prettytable::{Table, row};
use std::fs::File;
use std::io::Write;

/// Write the solver iteration trace as CSV, one record per iteration with
/// the fields `iteration`, `temperature_K` and `enthalpy_sum`.
pub fn write_iteration_trace(file_name: &str, trace: &[IterationRecord]) -> Result<(), String> {
    let mut file = File::create(file_name)
        .map_err(|e| format!("Failed to create trace file '{}': {}", file_name, e))?;
    writeln!(file, "iteration,temperature_K,enthalpy_sum")
        .map_err(|e| format!("Failed to write trace file '{}': {}", file_name, e))?;
    for record in trace {
        writeln!(
            file,
            "{},{},{}",
            record.iteration, record.temperature, record.enthalpy_sum
        )
        .map_err(|e| format!("Failed to write trace file '{}': {}", file_name, e))?;
    }
    info!(
        "wrote {} solver iterations to '{}'",
        trace.len(),
        file_name
    );
    Ok(())
}

/// the balanced combustion equation, reactants against products
pub fn equation_table(reactants: &FlowRecord, products: &FlowRecord) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Side", "Species", "Molar flow (mol/s)", "Mass flow"]);
    for (species, flow) in reactants.iter() {
        table.add_row(row![
            "reactant",
            species,
            format!("{:.4}", flow.molar),
            format!("{:.4}", flow.mass)
        ]);
    }
    for (species, flow) in products.iter() {
        table.add_row(row![
            "product",
            species,
            format!("{:.4}", flow.molar),
            format!("{:.4}", flow.mass)
        ]);
    }
    table
}

pub fn print_balance_summary(reactants: &FlowRecord, products: &FlowRecord) {
    equation_table(reactants, products).printstd();
}

/// human-readable summary of the final solver state
pub fn print_solution_summary(solution: &FlameSolution, excess_air_percent: f64) {
    let mut table = Table::new();
    table.add_row(row!["Flame temperature (K)", format!("{:.2}", solution.temperature)]);
    table.add_row(row![
        "Convergence",
        if solution.exact {
            "enthalpy balance met"
        } else {
            "step exhausted (best effort)"
        }
    ]);
    table.add_row(row!["Iterations", solution.iterations]);
    table.add_row(row![
        "Reactant enthalpy (kJ/kmol basis)",
        format!("{:.2}", solution.reactant_enthalpy)
    ]);
    table.add_row(row![
        "Product enthalpy (kJ/kmol basis)",
        format!("{:.2}", solution.product_enthalpy)
    ]);
    table.add_row(row!["Balance ratio", format!("{:.6}", solution.balance_ratio)]);
    table.add_row(row!["Excess air (%)", format!("{:.3}", excess_air_percent)]);
    table.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::NamedTempFile;

    #[test]
    fn test_trace_csv_field_presence() {
        let trace = vec![
            IterationRecord {
                iteration: 1,
                temperature: 1000.0,
                enthalpy_sum: -15391.03,
            },
            IterationRecord {
                iteration: 2,
                temperature: 500.0,
                enthalpy_sum: -55632.72,
            },
        ];
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        write_iteration_trace(&path, &trace).unwrap();

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), "iteration,temperature_K,enthalpy_sum");
        assert!(lines.next().unwrap().starts_with("1,1000"));
        assert_eq!(contents.lines().count(), 3);
    }
}
