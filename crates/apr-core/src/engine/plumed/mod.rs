//! PLUMED input files for APR windows.
//!
//! Each window gets `<path>/<window>/<file_name>` holding a `UNITS` header followed by centroid
//! groups, collective variables and bias potentials. Collective variables and groups are
//! deduplicated within a window only.

pub mod config;
pub mod tables;
pub mod units;
pub mod writer;

pub use config::{PlumedConfig, PlumedConfigBuilder};
pub use units::{EnergyUnit, LengthUnit, PlumedUnits, TimeUnit, UnitError};
pub use writer::{PlumedWriter, WindowBlocks, WindowSummary};
