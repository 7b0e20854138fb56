use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::{Component, ComponentKind, SubstrateShape};
use crate::error::GbtResult;

/// Construction parameters of a beam dump: a flat disc absorbing every beam hitting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BeamDumpParameters {
    pub reference: String,
    pub position: Point3<f64>,
    pub theta: f64,
    pub phi: f64,
    pub diameter: f64,
    pub thickness: f64,
}
impl Default for BeamDumpParameters {
    fn default() -> Self {
        Self {
            reference: "BeamDump".into(),
            position: Point3::origin(),
            theta: FRAC_PI_2,
            phi: 0.0,
            diameter: 5e-2,
            thickness: 1e-2,
        }
    }
}
impl BeamDumpParameters {
    /// Creates the beam dump [`Component`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the diameter is not positive or the thickness is
    /// negative.
    pub fn build(&self) -> GbtResult<Component> {
        SubstrateShape::flat(
            self.position,
            (self.theta, self.phi),
            self.diameter,
            self.thickness,
        )
        .build(&self.reference, ComponentKind::BeamDump)
    }
}
