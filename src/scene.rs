#![warn(missing_docs)]
//! Scene files describing an optical bench.
//!
//! A scene is a YAML document holding the input beams, the components and the tracing
//! parameters of a [`Simulation`]. Components are tagged by their `type`:
//!
//! ```yaml
//! name: cavity
//! order: 2
//! threshold: 1.0e-3
//! beams:
//!   - reference: Laser
//!     wx: 1.0e-3
//!     wy: 1.0e-3
//! components:
//!   - type: mirror
//!     reference: M1
//!     position: [1.0, 0.0, 0.0]
//!     phi: 3.141592653589793
//!   - type: beam_dump
//!     reference: D1
//!     position: [-1.0, 0.0, 0.0]
//! ```
//!
//! Missing fields are filled with the defaults of the respective parameter structs.
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{
    beam::{BeamParameters, GaussianBeam},
    components::{
        BeamDumpParameters, BeamSplitterParameters, Component, FilterParameters, GhostParameters,
        MirrorParameters, SpecialParameters, ThickLensParameters, ThinLensParameters,
    },
    config::{SimulationConfig, TraceLimits},
    error::{GbtError, GbtResult},
    simulation::Simulation,
};

/// Description of a single component in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentDescriptor {
    /// a (curved) mirror
    Mirror(MirrorParameters),
    /// a flat beam splitter
    BeamSplitter(BeamSplitterParameters),
    /// a thin lens given by its focal length
    ThinLens(ThinLensParameters),
    /// a thick lens given by its surface curvatures
    ThickLens(ThickLensParameters),
    /// an absorbing beam dump
    BeamDump(BeamDumpParameters),
    /// a wavelength filter
    Filter(FilterParameters),
    /// a virtual observation plane
    Ghost(GhostParameters),
    /// a component with user defined order actions
    Special(SpecialParameters),
}
impl ComponentDescriptor {
    /// Builds the [`Component`] described by this [`ComponentDescriptor`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the parameters are invalid.
    pub fn build(&self) -> GbtResult<Component> {
        match self {
            Self::Mirror(p) => p.build(),
            Self::BeamSplitter(p) => p.build(),
            Self::ThinLens(p) => p.build(),
            Self::ThickLens(p) => p.build(),
            Self::BeamDump(p) => p.build(),
            Self::Filter(p) => p.build(),
            Self::Ghost(p) => p.build(),
            Self::Special(p) => p.build(),
        }
    }
}

/// The content of a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    /// name of the simulation
    pub name: String,
    /// maximum stray order of the traced beams (absent = unlimited)
    pub order: Option<u32>,
    /// power threshold below which beams are no longer traced (W)
    pub threshold: f64,
    /// numerical settings
    pub config: SimulationConfig,
    /// input beams
    pub beams: Vec<BeamParameters>,
    /// components of the optical bench
    pub components: Vec<ComponentDescriptor>,
}
impl Default for SceneDocument {
    /// An empty scene with unlimited order and a negative threshold.
    fn default() -> Self {
        Self {
            name: "Simulation".into(),
            order: None,
            threshold: -1e-3,
            config: SimulationConfig::default(),
            beams: Vec::new(),
            components: Vec::new(),
        }
    }
}
impl SceneDocument {
    /// Reads a [`SceneDocument`] from the file at the given path.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the given path is not found or readable.
    ///   - the parsing of the file failed.
    pub fn from_file(path: &Path) -> GbtResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            GbtError::Scene(format!("cannot read file {} : {}", path.display(), e))
        })?;
        info!("read scene file {}", path.display());
        Self::from_yaml(&contents)
    }
    /// Parses a [`SceneDocument`] from the given YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the parsing failed or the contained
    /// [`SimulationConfig`] is invalid.
    pub fn from_yaml(yaml: &str) -> GbtResult<Self> {
        let document: Self = serde_yaml::from_str(yaml)
            .map_err(|e| GbtError::Scene(format!("parsing of scene failed: {e}")))?;
        document.config.validate()?;
        Ok(document)
    }
    /// Serializes this [`SceneDocument`] to a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization failed.
    pub fn to_yaml(&self) -> GbtResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GbtError::Scene(format!("serialization of scene failed: {e}")))
    }
    /// Builds the beams and components of this scene and returns the resulting [`Simulation`].
    ///
    /// # Errors
    ///
    /// This function will return an error if a beam or a component could not be built.
    pub fn into_simulation(self) -> GbtResult<Simulation> {
        let beams = self
            .beams
            .iter()
            .map(GaussianBeam::from_parameters)
            .collect::<GbtResult<Vec<_>>>()?;
        let components = self
            .components
            .iter()
            .map(ComponentDescriptor::build)
            .collect::<GbtResult<Vec<_>>>()?;
        Ok(Simulation::new(
            &self.name,
            beams,
            components,
            TraceLimits::new(self.order, self.threshold),
            self.config,
        ))
    }
}
