/// loading of the composition table from a structured file
pub mod load_from_file;
/// solver iteration CSV trace and pretty-printed summaries
pub mod trace_output;
