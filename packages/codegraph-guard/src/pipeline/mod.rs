//! Pipeline - batch analysis over many files

mod batch;
mod inputs;

pub use batch::{BatchReport, BatchRunner};
pub use inputs::{load_unit, load_units, UnitFailure};
