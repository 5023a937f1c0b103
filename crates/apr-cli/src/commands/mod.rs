pub mod dummy;
pub mod energy;
pub mod plumed;
pub mod windows;
