//! # Adiabatic Flame Temperature
//!
//! ## Aim
//! Solves the energy balance of the combustion for the product temperature
//! at which the enthalpy of the products equals the enthalpy of the
//! reactants, assuming no heat loss through the furnace walls.
//!
//! ## Method
//! The Moran-Shapiro iterative search: starting from the initial guess with
//! a step of half the guess, the product-side enthalpy sum
//! `sum n_i (hf_i + h_i(T) - h_i(T_ref))` is evaluated and compared against
//! the fixed reactant-side sum `sum n_i hf_i` (the sensible heat of the
//! reactants entering near the reference state is neglected). While the two
//! sides differ, the temperature moves one step down or up and the step
//! shrinks by the 0.9 damping factor. Equality is tested after rounding both
//! sides to 2 decimals, which is the deliberate coarse tolerance that
//! guarantees termination; when the step falls to 1 K the current
//! temperature is returned as a best-effort result.
//!
//! The damping makes this a fixed-schedule search, not a bisection: the step
//! shrinks every iteration regardless of bracketing, so the convergence
//! trajectory is part of the method's contract and a standard bracketing
//! root finder is not a drop-in substitute.

use crate::GasMixture::flow::FlowRecord;
use crate::Thermodynamics::enthalpy_table::enthalpy_table;
use crate::Thermodynamics::property_api::{GasProperty, PropertyCalculator, PropertyEnum};
use log::{info, warn};
use std::error::Error;
use std::fmt;

const STEP_DAMPING: f64 = 0.9;
const MINIMUM_STEP: f64 = 1.0; // K

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverMethod {
    Moran,
}

impl SolverMethod {
    pub fn from_name(method_name: &str) -> Result<Self, SolverError> {
        match method_name.to_lowercase().as_str() {
            "moran" => Ok(SolverMethod::Moran),
            other => Err(SolverError::UnknownMethod(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum SolverError {
    UnknownMethod(String),
    /// the energy balance could not be evaluated to an answer; carries the
    /// reason. Distinguishable by construction from a legitimate
    /// temperature: a failed solve never yields a number.
    NoConvergence(String),
    IterationLimitExceeded {
        iterations: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::UnknownMethod(method) => {
                write!(f, "Unknown solver method: {}", method)
            }
            SolverError::NoConvergence(reason) => {
                write!(f, "Solver failed to converge: {}", reason)
            }
            SolverError::IterationLimitExceeded { iterations } => {
                write!(f, "Iteration limit exceeded after {} iterations", iterations)
            }
        }
    }
}

impl Error for SolverError {}

/// one row of the iteration trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord {
    pub iteration: usize,
    pub temperature: f64,
    pub enthalpy_sum: f64,
}

/// converged (or best-effort) flame temperature with its audit data
#[derive(Debug, Clone)]
pub struct FlameSolution {
    pub temperature: f64,
    pub iterations: usize,
    /// true when the rounded enthalpy equality was met; false when the step
    /// fell to 1 K first and the temperature is a best-effort approximation
    pub exact: bool,
    pub reactant_enthalpy: f64,
    pub product_enthalpy: f64,
    /// product over reactant enthalpy at the final temperature
    pub balance_ratio: f64,
    /// per-iteration record, purely diagnostic
    pub trace: Vec<IterationRecord>,
}

/// The sensible-heat terms are referenced to 298 K: the `h_ref` column of
/// the enthalpy table is tabulated there.
pub struct FlameTemperatureSolver<'a> {
    provider: &'a PropertyEnum,
    method: SolverMethod,
    pub initial_guess: f64,
    pub max_iterations: usize,
    pub pressure: f64,
}

impl<'a> FlameTemperatureSolver<'a> {
    pub fn new(provider: &'a PropertyEnum) -> Self {
        Self {
            provider,
            method: SolverMethod::Moran,
            initial_guess: 1000.0,
            max_iterations: 1000,
            pressure: 101325.0,
        }
    }

    pub fn with_method(
        provider: &'a PropertyEnum,
        method_name: &str,
    ) -> Result<Self, SolverError> {
        let method = SolverMethod::from_name(method_name)?;
        let mut solver = Self::new(provider);
        solver.method = method;
        Ok(solver)
    }

    pub fn solve(
        &self,
        reactants: &FlowRecord,
        products: &FlowRecord,
    ) -> Result<FlameSolution, SolverError> {
        match self.method {
            SolverMethod::Moran => self.solve_moran(reactants, products),
        }
    }

    /// fixed reactant-side sum `sum n_i hf_i`
    fn reactant_enthalpy(&self, reactants: &FlowRecord) -> Result<f64, String> {
        let table = enthalpy_table();
        let mut sum = 0.0;
        for (species, flow) in reactants.iter() {
            let hf = table
                .formation_enthalpy(species)
                .ok_or_else(|| format!("no formation enthalpy for reactant {}", species))?;
            sum += flow.molar * hf;
        }
        Ok(sum)
    }

    /// product-side sum `sum n_i (hf_i + h_i(T) - h_i(T_ref))` at the guess
    /// temperature
    fn product_enthalpy(&self, products: &FlowRecord, temperature: f64) -> Result<f64, String> {
        let table = enthalpy_table();
        let mut sum = 0.0;
        for (species, flow) in products.iter() {
            let hf = table
                .formation_enthalpy(species)
                .ok_or_else(|| format!("no formation enthalpy for product {}", species))?;
            let h_ref = table
                .reference_enthalpy(species)
                .ok_or_else(|| format!("no reference enthalpy for product {}", species))?;
            let h_t = self
                .provider
                .lookup(GasProperty::MolarEnthalpy, species, temperature, self.pressure)
                .map_err(|e| e.to_string())?;
            sum += flow.molar * (hf + h_t - h_ref);
        }
        Ok(sum)
    }

    fn solve_moran(
        &self,
        reactants: &FlowRecord,
        products: &FlowRecord,
    ) -> Result<FlameSolution, SolverError> {
        let reactant_sum = self
            .reactant_enthalpy(reactants)
            .map_err(SolverError::NoConvergence)?;

        let mut temperature = self.initial_guess;
        let mut step = self.initial_guess / 2.0;
        let mut iteration = 0;
        let mut product_sum = f64::NAN;
        let mut trace = Vec::new();

        while step > MINIMUM_STEP {
            if iteration >= self.max_iterations {
                warn!(
                    "flame temperature search still open after {} iterations",
                    iteration
                );
                return Err(SolverError::IterationLimitExceeded {
                    iterations: iteration,
                });
            }
            iteration += 1;

            product_sum = match self.product_enthalpy(products, temperature) {
                Ok(sum) => sum,
                Err(reason) => {
                    warn!("enthalpy evaluation failed at {} K: {}", temperature, reason);
                    return Err(SolverError::NoConvergence(reason));
                }
            };
            trace.push(IterationRecord {
                iteration,
                temperature,
                enthalpy_sum: product_sum,
            });

            if round2(product_sum) == round2(reactant_sum) {
                info!(
                    "flame temperature converged at {:.2} K in {} iterations",
                    temperature, iteration
                );
                return Ok(FlameSolution {
                    temperature,
                    iterations: iteration,
                    exact: true,
                    reactant_enthalpy: reactant_sum,
                    product_enthalpy: product_sum,
                    balance_ratio: product_sum / reactant_sum,
                    trace,
                });
            }

            if product_sum > reactant_sum {
                // products too hot, walk down
                temperature -= step;
            } else {
                temperature += step;
            }
            step *= STEP_DAMPING;
        }

        info!(
            "step exhausted at {:.2} K after {} iterations, best-effort result",
            temperature, iteration
        );
        Ok(FlameSolution {
            temperature,
            iterations: iteration,
            exact: false,
            reactant_enthalpy: reactant_sum,
            product_enthalpy: product_sum,
            balance_ratio: product_sum / reactant_sum,
            trace,
        })
    }
}

/// One-call form of the solver matching the original survey routine:
/// method selected by name, the iteration cap explicit, and the theoretical
/// air carried along for the audit log.
pub fn solve_adiabatic_temperature(
    reactants: &FlowRecord,
    products: &FlowRecord,
    theoretical_air: f64,
    method: &str,
    initial_guess: f64,
    max_iterations: usize,
    provider: &PropertyEnum,
) -> Result<FlameSolution, SolverError> {
    let mut solver = FlameTemperatureSolver::with_method(provider, method)?;
    solver.initial_guess = initial_guess;
    solver.max_iterations = max_iterations;
    info!(
        "solving flame temperature against {:.4} mol/s of theoretical air O2",
        theoretical_air
    );
    solver.solve(reactants, products)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
