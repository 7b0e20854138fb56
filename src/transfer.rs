//! Transfer of the curvature tensor of a Gaussian beam at a curved surface.
//!
//! At the point of incidence the tensor of the incident beam is expressed in a coordinate system
//! attached to the surface (the transverse basis of the local surface normal). The curvature of
//! the surface is added with a factor depending on the angles of incidence and emergence, and the
//! result is transformed into the transverse basis of the daughter beam. This is the astigmatic
//! generalization of the ABCD law of a curved mirror / refracting interface.
use nalgebra::{Matrix2, Point3, Vector3};
use num::Complex;

use crate::{
    beam::GaussianBeam,
    config::SimulationConfig,
    error::GbtResult,
    surface::OpticalSurface,
    utils::{
        geom_transformation::transverse_basis,
        math_utils::{to_complex, try_inverse_real, ComplexMatrix2},
    },
};

/// Returns the local surface normal oriented against the incident beam and the local curvature
/// with respect to this orientation.
///
/// The curvature is negative if the oriented normal points towards the center of curvature (a
/// concave surface as seen by the incident beam) and positive otherwise.
#[must_use]
pub fn oriented_normal_and_curvature(
    surface: &OpticalSurface,
    point: &Point3<f64>,
    incident: &Vector3<f64>,
    config: &SimulationConfig,
) -> (Vector3<f64>, f64) {
    let towards_center = surface.direction_to_center(point, config);
    let k = surface.curvature().abs();
    if incident.dot(&towards_center) > 0.0 {
        (-towards_center, k)
    } else {
        (towards_center, -k)
    }
}

/// Returns the matrix of scalar products between the axes of two transverse bases.
///
/// `m[i][j] = u_i . l_j`
#[must_use]
pub fn basis_change(
    (ux, uy): (Vector3<f64>, Vector3<f64>),
    (lx, ly): (Vector3<f64>, Vector3<f64>),
) -> Matrix2<f64> {
    Matrix2::new(ux.dot(&lx), ux.dot(&ly), uy.dot(&lx), uy.dot(&ly))
}

/// Geometry and curvature tensor of a beam at its point of incidence on a surface.
#[derive(Debug, Clone)]
pub struct Incidence {
    direction: Vector3<f64>,
    normal: Vector3<f64>,
    curvature: f64,
    n1: f64,
    n2: f64,
    local_q: ComplexMatrix2,
}
impl Incidence {
    /// Prepares the transfer for a beam hitting a surface after propagating `distance`.
    ///
    /// `normal` is the unit surface normal oriented against the beam, `curvature` the local
    /// curvature with respect to this normal (see [`oriented_normal_and_curvature`]). `n1` is
    /// the refractive index of the incident medium, `n2` the one behind the surface.
    ///
    /// # Errors
    ///
    /// This function will return an error if the beam tensor cannot be propagated to the surface
    /// or if the normal is degenerate.
    pub fn new(
        beam: &GaussianBeam,
        distance: f64,
        normal: Vector3<f64>,
        curvature: f64,
        (n1, n2): (f64, f64),
    ) -> GbtResult<Self> {
        let q = beam.propagated_q(distance)?;
        let k_i = basis_change(beam.basis(), transverse_basis(&normal)?);
        let local_q = to_complex(&k_i.transpose()) * q * to_complex(&k_i);
        Ok(Self {
            direction: beam.direction(),
            normal,
            curvature,
            n1,
            n2,
            local_q,
        })
    }
    fn to_daughter(
        &self,
        surface_term: f64,
        scale: f64,
        basis: (Vector3<f64>, Vector3<f64>),
    ) -> GbtResult<ComplexMatrix2> {
        let normal_basis = transverse_basis(&self.normal)?;
        let k_d_inv = try_inverse_real(
            &basis_change(basis, normal_basis),
            "curvature tensor transfer",
        )?;
        let c = ComplexMatrix2::identity() * Complex::new(surface_term * self.curvature, 0.0);
        let q = to_complex(&k_d_inv.transpose()) * (self.local_q - c) * to_complex(&k_d_inv);
        Ok(q * Complex::new(scale, 0.0))
    }
    /// Returns the tensor of the reflected beam in the given transverse basis.
    ///
    /// # Errors
    ///
    /// This function will return [`GbtError::SingularTransform`](crate::error::GbtError) if the
    /// basis of the reflected beam cannot be mapped onto the surface (grazing reflection).
    pub fn reflected_q(
        &self,
        direction: &Vector3<f64>,
        basis: (Vector3<f64>, Vector3<f64>),
    ) -> GbtResult<ComplexMatrix2> {
        let term = self.normal.dot(&self.direction) - self.normal.dot(direction);
        self.to_daughter(term, 1.0, basis)
    }
    /// Returns the tensor of the refracted beam in the given transverse basis.
    ///
    /// # Errors
    ///
    /// This function will return [`GbtError::SingularTransform`](crate::error::GbtError) if the
    /// basis of the refracted beam cannot be mapped onto the surface (grazing refraction).
    pub fn refracted_q(
        &self,
        direction: &Vector3<f64>,
        basis: (Vector3<f64>, Vector3<f64>),
    ) -> GbtResult<ComplexMatrix2> {
        let term = (self.n2 / self.n1).mul_add(-self.normal.dot(direction), self.normal.dot(&self.direction));
        self.to_daughter(term, self.n1 / self.n2, basis)
    }
}
