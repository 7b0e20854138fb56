use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::{Actions, Coefficients, Component, ComponentKind, Substrate, SubstrateShape};
use crate::error::GbtResult;

/// Construction parameters of a special component.
///
/// A substrate like a mirror whose stray order increments are chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SpecialParameters {
    pub reference: String,
    pub position: Point3<f64>,
    pub theta: f64,
    pub phi: f64,
    pub wedge: f64,
    pub alpha: f64,
    pub diameter: f64,
    pub thickness: f64,
    pub hr_curvature: f64,
    pub ar_curvature: f64,
    pub refractive_index: f64,
    pub hr_reflectance: f64,
    pub hr_transmittance: f64,
    pub ar_reflectance: f64,
    pub ar_transmittance: f64,
    pub actions: Actions,
}
impl Default for SpecialParameters {
    fn default() -> Self {
        Self {
            reference: "Special".into(),
            position: Point3::origin(),
            theta: FRAC_PI_2,
            phi: 0.0,
            wedge: 0.0,
            alpha: 0.0,
            diameter: 10e-2,
            thickness: 2e-2,
            hr_curvature: 0.01,
            ar_curvature: 0.0,
            refractive_index: 1.4585,
            hr_reflectance: 0.99,
            hr_transmittance: 0.01,
            ar_reflectance: 0.1,
            ar_transmittance: 0.9,
            actions: Actions::default(),
        }
    }
}
impl SpecialParameters {
    /// Creates the special [`Component`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the parameters are invalid.
    pub fn build(&self) -> GbtResult<Component> {
        let substrate = Substrate::new(
            self.refractive_index,
            Coefficients::new(self.hr_reflectance, self.hr_transmittance)?,
            Coefficients::new(self.ar_reflectance, self.ar_transmittance)?,
            self.actions,
        )?;
        SubstrateShape {
            position: self.position,
            theta: self.theta,
            phi: self.phi,
            wedge: self.wedge,
            alpha: self.alpha,
            diameter: self.diameter,
            thickness: self.thickness,
            hr_curvature: self.hr_curvature,
            ar_curvature: self.ar_curvature,
        }
        .build(&self.reference, ComponentKind::Special(substrate))
    }
}
