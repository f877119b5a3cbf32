//! Rule and neighborhood compilation for two-state cellular automata on
//! large toroidal grids.
//!
//! A [`Rule`] compiles into a [`RuleLut`], a [`Kernel`] plus grid geometry
//! into a [`SimParams`]; a stepper reads both, read-only, for a whole
//! generation. [`Universe`] is the CPU reference stepper and
//! [`Simulation`] publishes new table pairs between generations.

pub mod config;
pub mod error;
pub mod kernel;
pub mod params;
pub mod patterns;
pub mod presets;
pub mod rule;
pub mod simulation;
pub mod universe;
pub mod view;

pub use config::{KernelConfig, LifeConfig};
pub use error::{DomainError, LifeError, ParseError, Result};
pub use kernel::{parse_hex_rows, reverse_bits16, Kernel};
pub use params::SimParams;
pub use rule::{NeighborMask, Rule, RuleLut, GAME_OF_LIFE};
pub use simulation::{Simulation, Tables};
pub use universe::Universe;
pub use view::{Camera, ViewParams};
