/// Module to calculate the atomic composition and molar mass of a chemical formula
///
///
use std::collections::HashMap;
use std::fmt;

// Define a struct to hold element data
pub struct Element {
    name: &'static str,
    atomic_mass: f64,
}

// Define a list of elements and their atomic masses
const ELEMENTS: &[Element] = &[
    Element {
        name: "H",
        atomic_mass: 1.008,
    },
    Element {
        name: "He",
        atomic_mass: 4.0026,
    },
    Element {
        name: "C",
        atomic_mass: 12.011,
    },
    Element {
        name: "N",
        atomic_mass: 14.007,
    },
    Element {
        name: "O",
        atomic_mass: 15.999,
    },
    Element {
        name: "F",
        atomic_mass: 18.998,
    },
    Element {
        name: "Ne",
        atomic_mass: 20.18,
    },
    Element {
        name: "Na",
        atomic_mass: 22.99,
    },
    Element {
        name: "Mg",
        atomic_mass: 24.305,
    },
    Element {
        name: "Si",
        atomic_mass: 28.085,
    },
    Element {
        name: "P",
        atomic_mass: 30.974,
    },
    Element {
        name: "S",
        atomic_mass: 32.065,
    },
    Element {
        name: "Cl",
        atomic_mass: 35.45,
    },
    Element {
        name: "Ar",
        atomic_mass: 39.948,
    },
    Element {
        name: "K",
        atomic_mass: 39.102,
    },
    Element {
        name: "Ca",
        atomic_mass: 40.08,
    },
    Element {
        name: "Fe",
        atomic_mass: 55.845,
    },
    // Add more elements here...
];

#[derive(Debug, PartialEq)]
pub enum FormulaError {
    UnknownElement(String),
    MalformedFormula(String),
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormulaError::UnknownElement(symbol) => {
                write!(f, "Unknown element symbol: {}", symbol)
            }
            FormulaError::MalformedFormula(formula) => {
                write!(f, "Malformed chemical formula: {}", formula)
            }
        }
    }
}

impl std::error::Error for FormulaError {}

fn atomic_mass_of(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|element| element.name == symbol)
        .map(|element| element.atomic_mass)
}

fn filter_phases_marks(formula: &str) -> String {
    let mut formula = formula.to_string();

    let phases = ["(C)", "(c)", "(L)", "(l)", "(G)", "(g)", "(S)", "(s)"];
    for phase in phases {
        formula = formula.replace(phase, "");
    }
    formula
}

/// Parse a chemical formula into a map of element symbol -> atom count.
/// Handles multi-letter symbols, digit counts and parenthesized groups,
/// e.g. "CH4", "CO2", "Na(NO3)2".
pub fn parse_formula(formula: &str) -> Result<HashMap<String, usize>, FormulaError> {
    let formula = filter_phases_marks(formula);
    let chars: Vec<char> = formula.chars().collect();
    let mut stack: Vec<HashMap<String, usize>> = vec![HashMap::new()];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '(' {
            stack.push(HashMap::new());
            i += 1;
        } else if c == ')' {
            if stack.len() < 2 {
                return Err(FormulaError::MalformedFormula(formula.clone()));
            }
            i += 1;
            let mut count_str = String::new();
            while i < chars.len() && chars[i].is_ascii_digit() {
                count_str.push(chars[i]);
                i += 1;
            }
            let multiplier: usize = count_str.parse().unwrap_or(1);
            let group = stack.pop().unwrap();
            let top = stack.last_mut().unwrap();
            for (symbol, count) in group {
                *top.entry(symbol).or_insert(0) += count * multiplier;
            }
        } else if c.is_ascii_uppercase() {
            let mut symbol = c.to_string();
            i += 1;
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                symbol.push(chars[i]);
                i += 1;
            }
            let mut count_str = String::new();
            while i < chars.len() && chars[i].is_ascii_digit() {
                count_str.push(chars[i]);
                i += 1;
            }
            let count: usize = count_str.parse().unwrap_or(1);
            if atomic_mass_of(&symbol).is_none() {
                return Err(FormulaError::UnknownElement(symbol));
            }
            let top = stack.last_mut().unwrap();
            *top.entry(symbol).or_insert(0) += count;
        } else {
            return Err(FormulaError::MalformedFormula(formula.clone()));
        }
    }

    if stack.len() != 1 {
        return Err(FormulaError::MalformedFormula(formula.clone()));
    }
    let composition = stack.pop().unwrap();
    if composition.is_empty() {
        return Err(FormulaError::MalformedFormula(formula.clone()));
    }
    Ok(composition)
}

/// Molar mass of a chemical formula in g/mol together with its atomic composition
pub fn calculate_molar_mass(
    formula: &str,
) -> Result<(f64, HashMap<String, usize>), FormulaError> {
    let composition = parse_formula(formula)?;
    let mut molar_mass = 0.0;
    for (symbol, count) in &composition {
        // elements are validated during parsing
        let mass = atomic_mass_of(symbol).unwrap();
        molar_mass += mass * (*count as f64);
    }
    Ok((molar_mass, composition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_formulas() {
        let (mass, composition) = calculate_molar_mass("CH4").unwrap();
        assert_relative_eq!(mass, 16.043, epsilon = 1e-3);
        assert_eq!(composition.get("C"), Some(&1));
        assert_eq!(composition.get("H"), Some(&4));

        let (mass, _) = calculate_molar_mass("CO2").unwrap();
        assert_relative_eq!(mass, 44.009, epsilon = 1e-3);

        let (mass, _) = calculate_molar_mass("N2").unwrap();
        assert_relative_eq!(mass, 28.014, epsilon = 1e-3);
    }

    #[test]
    fn test_parenthesized_group() {
        let composition = parse_formula("Na(NO3)2").unwrap();
        assert_eq!(composition.get("Na"), Some(&1));
        assert_eq!(composition.get("N"), Some(&2));
        assert_eq!(composition.get("O"), Some(&6));
    }

    #[test]
    fn test_phase_marks_are_ignored() {
        let (mass, _) = calculate_molar_mass("H2O(g)").unwrap();
        assert_relative_eq!(mass, 18.015, epsilon = 1e-3);
    }

    #[test]
    fn test_unknown_element() {
        let result = calculate_molar_mass("Xx2");
        assert!(matches!(result, Err(FormulaError::UnknownElement(_))));
    }

    #[test]
    fn test_malformed_formula() {
        assert!(parse_formula("(CO2").is_err());
        assert!(parse_formula("").is_err());
    }
}
