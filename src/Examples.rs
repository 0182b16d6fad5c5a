/// worked cases of the boiler combustion balance
pub mod boiler_examples;
