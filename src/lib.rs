#[allow(non_snake_case)]
pub mod Combustion;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod GasMixture;
#[allow(non_snake_case)]
pub mod Thermodynamics;
#[allow(non_snake_case)]
pub mod Utils;
