//! Golden-angle phyllotaxis: radius, angle and position of spiral point `n`,
//! plus parameter sweeps over `n`, scale `a` and reference radius `r_lock`.

pub mod config;
pub mod field;
pub mod output;
pub mod sweep;

pub use field::{angle, golden_angle, position, radius, FieldError, DEFAULT_SCALE, PHI};
pub use sweep::{Column, ParameterSweep, SweepRow, SweepTable, COLUMNS};
