//! This is the documentation for the **gbtrace** software package, a tracer for general
//! astigmatic Gaussian beams through optical benches.
//!
//! A source beam is propagated through a set of optical components (mirrors, beam splitters,
//! lenses, beam dumps, filters, ...). Every interaction with a component creates a transmitted
//! and a reflected daughter beam whose complex curvature tensors follow from the transfer laws of
//! Gaussian beams at curved interfaces. The result is a binary [`beam_tree::BeamTree`] per source
//! beam, including all stray (ghost) beams up to a given order and power threshold.
//!
//! The usual entry point is a YAML scene file read by [`scene::SceneDocument`], which is turned
//! into a [`simulation::Simulation`].
#![allow(clippy::module_name_repetitions)]

pub mod beam;
pub mod beam_tree;
pub mod components;
pub mod config;
pub mod console;
pub mod diagnostics;
pub mod error;
pub mod refraction;
pub mod report;
pub mod scene;
pub mod simulation;
pub mod surface;
pub mod transfer;
pub mod utils;

pub use beam::GaussianBeam;
pub use components::Component;
pub use config::{SimulationConfig, TraceLimits};
pub use simulation::Simulation;

/// Return the version information of the currently built gbtrace executable.
#[must_use]
pub fn get_version() -> String {
    format!("{} ({})", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_NAME"))
}
