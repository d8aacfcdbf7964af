//! Diffusion-limited aggregation on a square lattice.
//!
//! Ions released on a circle around the origin random-walk one lattice
//! step at a time until they touch the growing cluster and freeze,
//! building a branching crystal. [`CrystalModel`] owns the bath, the
//! random sequence and a reusable ASCII snapshot; callers drive it one
//! ion at a time or in batches and read state back through
//! origin-centered queries, never through the grid itself.

pub mod config;
pub mod grid;
pub mod model;
pub mod render;
pub mod rng;

pub use config::SimConfig;
pub use model::{CrystalModel, GrowthPhase};
pub use rng::IonRng;
