use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::{Actions, Coefficients, Component, ComponentKind, Substrate};
use crate::{
    error::{GbtError, GbtResult},
    surface::{half_angle, OpticalSurface},
    utils::geom_transformation::direction_from_angles,
};

/// On-axis distance between the two faces of a diverging thin lens.
const DIVERGING_GAP: f64 = 1e-6;

/// Construction parameters of a thin lens.
///
/// The lens is modelled by two spherical faces of equal curvature (thin lens approximation of
/// the lensmaker's equation): `k = -1 / (2 f (n - 1))`. A converging lens has two convex faces
/// sharing the same chord, a diverging lens two concave faces separated such that their apexes
/// almost touch.
///
/// Reflections on both faces are stray paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ThinLensParameters {
    pub reference: String,
    /// center of the lens (m)
    pub position: Point3<f64>,
    pub theta: f64,
    pub phi: f64,
    /// focal length (m), negative for a diverging lens
    pub focal_length: f64,
    pub diameter: f64,
    pub refractive_index: f64,
    /// reflectance of both faces
    pub reflectance: f64,
    /// transmittance of both faces
    pub transmittance: f64,
}
impl Default for ThinLensParameters {
    /// A 5 cm lens with a focal length of 10 cm.
    fn default() -> Self {
        Self {
            reference: "ThinLens".into(),
            position: Point3::origin(),
            theta: FRAC_PI_2,
            phi: 0.0,
            focal_length: 10e-2,
            diameter: 5e-2,
            refractive_index: 1.4585,
            reflectance: 0.1,
            transmittance: 0.9,
        }
    }
}
impl ThinLensParameters {
    /// Creates the thin lens [`Component`].
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the focal length is zero or not finite
    ///   - the refractive index equals 1.0 (no focusing power)
    ///   - the remaining parameters are invalid
    pub fn build(&self) -> GbtResult<Component> {
        if !self.focal_length.is_normal() {
            return Err(GbtError::Component(
                "focal length must be != 0.0 and finite".into(),
            ));
        }
        let coefficients = Coefficients::new(self.reflectance, self.transmittance)?;
        let substrate = Substrate::new(
            self.refractive_index,
            coefficients,
            coefficients,
            Actions::new(0, 1, 0, 1),
        )?;
        let curvature = -0.5 / (self.focal_length * (self.refractive_index - 1.0));
        if !curvature.is_finite() {
            return Err(GbtError::Component(
                "refractive index of a thin lens must differ from 1.0".into(),
            ));
        }
        let normal = direction_from_angles(self.theta, self.phi);
        let thickness = if self.focal_length > 0.0 {
            0.0
        } else {
            let theta = half_angle(self.diameter, curvature);
            2.0f64.mul_add((1.0 - theta.cos()) / curvature, DIVERGING_GAP)
        };
        let hr = OpticalSurface::new(
            self.position + 0.5 * thickness * normal,
            normal,
            curvature,
            self.diameter,
        )?;
        let ar = OpticalSurface::new(
            self.position - 0.5 * thickness * normal,
            -normal,
            curvature,
            self.diameter,
        )?;
        Component::new(
            &self.reference,
            ComponentKind::ThinLens {
                focal_length: self.focal_length,
                substrate,
            },
            hr,
            ar,
            thickness,
            (0.0, 0.0),
        )
    }
}
