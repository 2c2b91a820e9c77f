//! Deterministic gameplay randomness.
//!
//! [`MersenneTwister`] is the seeded stream every gameplay roll should draw
//! from. Pass it explicitly to whatever needs it; there is no global
//! generator.
mod geometry;
pub mod library;
pub mod mt64;
pub mod seed;
mod twister;

pub use geometry::DBox;
pub use mt64::Mt64;
pub use twister::MersenneTwister;
pub use twister::RandomFloat;
pub use twister::RandomInteger;
