use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::{Component, ComponentKind, SubstrateShape};
use crate::error::GbtResult;

/// Construction parameters of a ghost surface.
///
/// A ghost is a flat disc of zero thickness transmitting every beam unchanged. It splits a beam
/// into two consecutive segments and is used to monitor the beam at a given place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct GhostParameters {
    pub reference: String,
    pub position: Point3<f64>,
    pub theta: f64,
    pub phi: f64,
    pub diameter: f64,
}
impl Default for GhostParameters {
    fn default() -> Self {
        Self {
            reference: "Ghost".into(),
            position: Point3::origin(),
            theta: FRAC_PI_2,
            phi: 0.0,
            diameter: 5e-2,
        }
    }
}
impl GhostParameters {
    /// Creates the ghost [`Component`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the diameter is not positive.
    pub fn build(&self) -> GbtResult<Component> {
        SubstrateShape::flat(self.position, (self.theta, self.phi), self.diameter, 0.0)
            .build(&self.reference, ComponentKind::Ghost)
    }
}
