#![warn(missing_docs)]
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::{Actions, Coefficients, Component, ComponentKind, Substrate, SubstrateShape};
use crate::error::GbtResult;

/// Construction parameters of a mirror.
///
/// A mirror is a cylindrical substrate with a (possibly curved) HR coating on its front face and
/// a (possibly curved) AR coating on its back face. The back face may be wedged.
///
/// ## Actions
///   - transmission through HR: 1
///   - reflection on HR: 0
///   - transmission through AR: 0
///   - reflection on AR: 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorParameters {
    /// reference of the mirror
    pub reference: String,
    /// center of the HR surface (m)
    pub position: Point3<f64>,
    /// polar angle of the HR normal (rad)
    pub theta: f64,
    /// azimuth of the HR normal (rad)
    pub phi: f64,
    /// wedge angle between HR and AR (rad)
    pub wedge: f64,
    /// orientation of the wedge around the HR normal (rad)
    pub alpha: f64,
    /// diameter (m)
    pub diameter: f64,
    /// thickness at the thinnest edge (m)
    pub thickness: f64,
    /// curvature of the HR surface (1/m, positive = concave)
    pub hr_curvature: f64,
    /// curvature of the AR surface (1/m, positive = concave)
    pub ar_curvature: f64,
    /// refractive index of the substrate
    pub refractive_index: f64,
    /// reflectance of the HR surface
    pub hr_reflectance: f64,
    /// transmittance of the HR surface
    pub hr_transmittance: f64,
    /// reflectance of the AR surface
    pub ar_reflectance: f64,
    /// transmittance of the AR surface
    pub ar_transmittance: f64,
}
impl Default for MirrorParameters {
    /// A flat 5 cm mirror (2 cm thick) at the origin facing the x-axis.
    fn default() -> Self {
        Self {
            reference: "Mirror".into(),
            position: Point3::origin(),
            theta: FRAC_PI_2,
            phi: 0.0,
            wedge: 0.0,
            alpha: 0.0,
            diameter: 5e-2,
            thickness: 2e-2,
            hr_curvature: 0.0,
            ar_curvature: 0.0,
            refractive_index: 1.4585,
            hr_reflectance: 0.99,
            hr_transmittance: 0.01,
            ar_reflectance: 0.1,
            ar_transmittance: 0.9,
        }
    }
}
impl MirrorParameters {
    /// Creates the mirror [`Component`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the parameters are invalid (coefficients outside
    /// [0.0; 1.0], non-positive index or diameter, negative thickness).
    pub fn build(&self) -> GbtResult<Component> {
        let substrate = Substrate::new(
            self.refractive_index,
            Coefficients::new(self.hr_reflectance, self.hr_transmittance)?,
            Coefficients::new(self.ar_reflectance, self.ar_transmittance)?,
            Actions::new(1, 0, 0, 1),
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
        .build(&self.reference, ComponentKind::Mirror(substrate))
    }
}
