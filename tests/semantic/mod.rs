//! Scope tree tests through the public API:
//! - Host, submodule and IMPORT-controlled lookup
//! - Symbol table bookkeeping and source ordering
//! - Type pools and derived-type instantiation
//! - Scope source ranges and position queries

pub mod tests_instantiation;
pub mod tests_lookup;
pub mod tests_source_ranges;
