//! Contains logic shared by the input and output sides of the pipeline.

pub mod entities;
pub mod flat_to_nested;
pub mod links;
