use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::{Component, ComponentKind, SubstrateShape};
use crate::error::{GbtError, GbtResult};

/// Construction parameters of a wavelength filter.
///
/// The filter passes beams of its wavelength arriving on its front (HR) side and absorbs all
/// other beams. It is hit tested as a thin element: only the HR plane counts, the thickness is
/// informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct FilterParameters {
    pub reference: String,
    pub position: Point3<f64>,
    pub theta: f64,
    pub phi: f64,
    pub diameter: f64,
    pub thickness: f64,
    /// transmitted vacuum wavelength (m)
    pub wavelength: f64,
}
impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            reference: "Filter".into(),
            position: Point3::origin(),
            theta: FRAC_PI_2,
            phi: 0.0,
            diameter: 10e-2,
            thickness: 2e-2,
            wavelength: 800e-9,
        }
    }
}
impl FilterParameters {
    /// Creates the filter [`Component`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the wavelength or the diameter is not positive and
    /// finite.
    pub fn build(&self) -> GbtResult<Component> {
        if !self.wavelength.is_normal() || self.wavelength.is_sign_negative() {
            return Err(GbtError::Component(
                "filter wavelength must be > 0.0 and finite".into(),
            ));
        }
        SubstrateShape::flat(
            self.position,
            (self.theta, self.phi),
            self.diameter,
            self.thickness,
        )
        .build(
            &self.reference,
            ComponentKind::Filter {
                wavelength: self.wavelength,
            },
        )
    }
}
