#![warn(missing_docs)]
//! Module for handling Gaussian beams
//!
//! A [`GaussianBeam`] is described by its complex curvature tensor `Q` in a transverse
//! coordinate system `(ux, uy)` orthogonal to its propagation direction. `Q` is the inverse of the
//! complex beam parameter: for a simple astigmatic beam with the axes aligned to `(ux, uy)`
//! it is `diag(1/qx, 1/qy)` with `q = z - z_waist + i * z_rayleigh`. Working with `1/q` instead
//! of `q` avoids the singularity of the curvature at the waist.
use nalgebra::{Matrix2, Point3, Vector3};
use num::{Complex, Zero};
use serde::{Deserialize, Serialize};
use std::{f64::consts::PI, fmt::Display};

use crate::{
    error::{GbtError, GbtResult},
    surface::Face,
    utils::{
        geom_transformation::{
            direction_from_angles, direction_to_angles, rotate_basis, transverse_basis,
        },
        math_utils::{is_finite, try_inverse_complex, ComplexMatrix2},
    },
};

/// Location of a beam end: the reference of an optical component and the face hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    optic: String,
    face: Face,
}
impl Anchor {
    /// Creates a new [`Anchor`].
    #[must_use]
    pub fn new(optic: &str, face: Face) -> Self {
        Self {
            optic: optic.to_owned(),
            face,
        }
    }
    /// Returns the reference of the optical component of this [`Anchor`].
    #[must_use]
    pub fn optic(&self) -> &str {
        &self.optic
    }
    /// Returns the face of this [`Anchor`].
    #[must_use]
    pub const fn face(&self) -> Face {
        self.face
    }
}
impl Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.optic, self.face)
    }
}

/// Eigen decomposition of a curvature tensor.
///
/// `q1` and `q2` are the complex beam parameters along the two eigen axes, `theta` the (complex)
/// rotation angle of the eigen axes with respect to the transverse basis of the beam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QParam {
    /// complex beam parameter along the first eigen axis
    pub q1: Complex<f64>,
    /// complex beam parameter along the second eigen axis
    pub q2: Complex<f64>,
    /// rotation angle of the eigen axes
    pub theta: Complex<f64>,
}
impl QParam {
    fn of(q: &ComplexMatrix2) -> Self {
        let a = q[(0, 0)];
        let b = q[(0, 1)];
        let d = q[(1, 1)];
        if b.is_zero() {
            // already diagonal: keep the order of the transverse axes
            return Self {
                q1: a.inv(),
                q2: d.inv(),
                theta: Complex::zero(),
            };
        }
        let root = ((a - d) * (a - d) + 4.0 * b * b).sqrt();
        let q1_inv = 0.5 * (a + d + root);
        let q2_inv = 0.5 * (a + d - root);
        let theta = if q1_inv == q2_inv {
            Complex::zero()
        } else {
            0.5 * (2.0 * b / (q1_inv - q2_inv)).asin()
        };
        Self {
            q1: q1_inv.inv(),
            q2: q2_inv.inv(),
            theta,
        }
    }
}

/// Construction parameters of a user defined (simple astigmatic) Gaussian beam.
///
/// The beam propagates along the direction given by the spherical angles `theta` and `phi`.
/// Its transverse axes are the default transverse basis of this direction rotated by `alpha`.
/// The waists `wx` / `wy` lie at the (signed) distances `waist_distance_x` / `waist_distance_y`
/// in front of the beam origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamParameters {
    /// waist radius along the first transverse axis (m)
    pub wx: f64,
    /// waist radius along the second transverse axis (m)
    pub wy: f64,
    /// distance between origin and first waist (m)
    pub waist_distance_x: f64,
    /// distance between origin and second waist (m)
    pub waist_distance_y: f64,
    /// vacuum wavelength (m)
    pub wavelength: f64,
    /// power (W)
    pub power: f64,
    /// origin (m)
    pub position: Point3<f64>,
    /// polar angle of the propagation direction (rad)
    pub theta: f64,
    /// azimuth of the propagation direction (rad)
    pub phi: f64,
    /// rotation of the transverse axes around the propagation direction (rad)
    pub alpha: f64,
    /// user reference of the beam
    pub reference: String,
}
impl Default for BeamParameters {
    /// A 1 W beam at 1064 nm with 1 mm waists at its origin propagating along the x-axis.
    fn default() -> Self {
        Self {
            wx: 1e-3,
            wy: 1e-3,
            waist_distance_x: 0.0,
            waist_distance_y: 0.0,
            wavelength: 1064e-9,
            power: 1.0,
            position: Point3::origin(),
            theta: PI / 2.0,
            phi: 0.0,
            alpha: 0.0,
            reference: "Beam".into(),
        }
    }
}

/// A Gaussian beam with a general astigmatic curvature tensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianBeam {
    q: ComplexMatrix2,
    refractive_index: f64,
    wavelength: f64,
    power: f64,
    position: Point3<f64>,
    direction: Vector3<f64>,
    ux: Vector3<f64>,
    uy: Vector3<f64>,
    reference: String,
    opt_dist: f64,
    length: f64,
    stray_order: u32,
    origin: Option<Anchor>,
    target: Option<Anchor>,
}
impl GaussianBeam {
    /// Creates a new [`GaussianBeam`] from a curvature tensor.
    ///
    /// The tensor is expressed in the default transverse basis of the given direction
    /// (see [`transverse_basis`]). The beam propagates in vacuum (refractive index 1.0), has an
    /// empty reference and a stray order of zero.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the tensor is not finite or not symmetric
    ///   - the tensor does not describe a confined beam (the imaginary parts of its eigen values
    ///     must be negative)
    ///   - the wavelength is not positive and finite
    ///   - the power is negative or not finite
    ///   - the position is not finite
    ///   - the direction has zero length or is not finite
    pub fn new(
        q: ComplexMatrix2,
        wavelength: f64,
        power: f64,
        position: Point3<f64>,
        direction: Vector3<f64>,
    ) -> GbtResult<Self> {
        if !is_finite(&q) {
            return Err(GbtError::Beam("curvature tensor must be finite".into()));
        }
        let off_diagonal = q[(0, 1)] - q[(1, 0)];
        if off_diagonal.norm() > 1e-9 * q.iter().map(|c| c.norm()).fold(1.0, f64::max) {
            return Err(GbtError::Beam("curvature tensor must be symmetric".into()));
        }
        let param = QParam::of(&q);
        if !(param.q1.inv().im < 0.0 && param.q2.inv().im < 0.0) {
            return Err(GbtError::Beam(
                "curvature tensor does not describe a confined beam".into(),
            ));
        }
        if !wavelength.is_normal() || wavelength.is_sign_negative() {
            return Err(GbtError::Beam("wavelength must be > 0.0 and finite".into()));
        }
        if !power.is_finite() || power.is_sign_negative() {
            return Err(GbtError::Beam("power must be >= 0.0 and finite".into()));
        }
        if position.iter().any(|x| !x.is_finite()) {
            return Err(GbtError::Beam("position must be finite".into()));
        }
        let (ux, uy) = transverse_basis(&direction)?;
        Ok(Self {
            q,
            refractive_index: 1.0,
            wavelength,
            power,
            position,
            direction: direction.normalize(),
            ux,
            uy,
            reference: String::new(),
            opt_dist: 0.0,
            length: 0.0,
            stray_order: 0,
            origin: None,
            target: None,
        })
    }
    /// Creates a new simple astigmatic [`GaussianBeam`] from its waists.
    ///
    /// The waist radii `wx`, `wy` are located at the signed distances `waist_distance_x`,
    /// `waist_distance_y` along the propagation direction.
    ///
    /// # Errors
    ///
    /// This function will return an error if the waists are not positive and finite or if
    /// [`GaussianBeam::new`] fails.
    pub fn new_orthogonal(
        (wx, wy): (f64, f64),
        (waist_distance_x, waist_distance_y): (f64, f64),
        wavelength: f64,
        power: f64,
        position: Point3<f64>,
        direction: Vector3<f64>,
    ) -> GbtResult<Self> {
        if !wx.is_normal() || !wy.is_normal() || wx.is_sign_negative() || wy.is_sign_negative() {
            return Err(GbtError::Beam("waists must be > 0.0 and finite".into()));
        }
        if !waist_distance_x.is_finite() || !waist_distance_y.is_finite() {
            return Err(GbtError::Beam("waist distances must be finite".into()));
        }
        let qx = Complex::new(-waist_distance_x, PI * wx * wx / wavelength);
        let qy = Complex::new(-waist_distance_y, PI * wy * wy / wavelength);
        let q = Matrix2::new(qx.inv(), Complex::zero(), Complex::zero(), qy.inv());
        Self::new(q, wavelength, power, position, direction)
    }
    /// Creates a user defined [`GaussianBeam`] from the given [`BeamParameters`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the parameters are invalid (see
    /// [`GaussianBeam::new_orthogonal`]).
    pub fn from_parameters(parameters: &BeamParameters) -> GbtResult<Self> {
        let direction = direction_from_angles(parameters.theta, parameters.phi);
        let beam = Self::new_orthogonal(
            (parameters.wx, parameters.wy),
            (parameters.waist_distance_x, parameters.waist_distance_y),
            parameters.wavelength,
            parameters.power,
            parameters.position,
            direction,
        )?;
        let (ux, uy) = rotate_basis(&beam.ux, &beam.uy, parameters.alpha);
        beam.with_basis(ux, uy)
            .map(|b| b.with_reference(&parameters.reference))
    }
    /// Returns the beam with the given transverse basis in which its tensor is expressed.
    ///
    /// # Errors
    ///
    /// This function will return an error if `(ux, uy, direction)` is not a (direct or indirect)
    /// orthonormal frame.
    pub fn with_basis(self, ux: Vector3<f64>, uy: Vector3<f64>) -> GbtResult<Self> {
        let tolerance = 1e-9;
        if (ux.norm() - 1.0).abs() > tolerance
            || (uy.norm() - 1.0).abs() > tolerance
            || ux.dot(&uy).abs() > tolerance
            || ux.dot(&self.direction).abs() > tolerance
            || uy.dot(&self.direction).abs() > tolerance
        {
            return Err(GbtError::Beam(
                "transverse basis must be orthonormal and perpendicular to the direction".into(),
            ));
        }
        Ok(Self { ux, uy, ..self })
    }
    /// Returns the beam with the given refractive index of the medium it propagates in.
    ///
    /// # Errors
    ///
    /// This function will return an error if the index is not positive and finite.
    pub fn with_refractive_index(self, refractive_index: f64) -> GbtResult<Self> {
        if !refractive_index.is_normal() || refractive_index.is_sign_negative() {
            return Err(GbtError::Beam(
                "refractive index must be > 0.0 and finite".into(),
            ));
        }
        Ok(Self {
            refractive_index,
            ..self
        })
    }
    /// Returns the beam with the given reference.
    #[must_use]
    pub fn with_reference(self, reference: &str) -> Self {
        Self {
            reference: reference.to_owned(),
            ..self
        }
    }
    /// Returns the beam with the given stray order.
    #[must_use]
    pub fn with_stray_order(self, stray_order: u32) -> Self {
        Self {
            stray_order,
            ..self
        }
    }
    /// Returns the beam with the given origin (component and face it starts from).
    #[must_use]
    pub fn with_origin(self, origin: Anchor) -> Self {
        Self {
            origin: Some(origin),
            ..self
        }
    }
    /// Returns the curvature tensor at the beam origin.
    #[must_use]
    pub const fn q(&self) -> ComplexMatrix2 {
        self.q
    }
    /// Returns the refractive index of the medium this beam propagates in.
    #[must_use]
    pub const fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
    /// Returns the vacuum wavelength of this beam.
    #[must_use]
    pub const fn wavelength(&self) -> f64 {
        self.wavelength
    }
    /// Returns the power of this beam.
    #[must_use]
    pub const fn power(&self) -> f64 {
        self.power
    }
    /// Returns the origin of this beam.
    #[must_use]
    pub const fn position(&self) -> Point3<f64> {
        self.position
    }
    /// Returns the unit propagation direction of this beam.
    #[must_use]
    pub const fn direction(&self) -> Vector3<f64> {
        self.direction
    }
    /// Returns the transverse basis `(ux, uy)` of this beam.
    #[must_use]
    pub const fn basis(&self) -> (Vector3<f64>, Vector3<f64>) {
        (self.ux, self.uy)
    }
    /// Returns the reference of this beam.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
    /// Returns the optical path length (refractive index times geometrical length) of this beam.
    #[must_use]
    pub const fn opt_dist(&self) -> f64 {
        self.opt_dist
    }
    /// Returns the geometrical length of this beam.
    ///
    /// The length is zero for beams which do not hit any component (open beams).
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }
    /// Returns the stray order of this beam.
    #[must_use]
    pub const fn stray_order(&self) -> u32 {
        self.stray_order
    }
    /// Returns the component and face this beam starts from (`None` for input beams).
    #[must_use]
    pub const fn origin(&self) -> Option<&Anchor> {
        self.origin.as_ref()
    }
    /// Returns the component and face this beam ends on (`None` for open beams).
    #[must_use]
    pub const fn target(&self) -> Option<&Anchor> {
        self.target.as_ref()
    }
    /// Returns `true` if this beam does not end on a component.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.target.is_none()
    }
    /// Sets the end of this beam after its terminating interaction has been determined.
    ///
    /// The optical path length is updated accordingly.
    pub fn set_target(&mut self, length: f64, target: Anchor) {
        self.length = length;
        self.opt_dist = self.refractive_index * length;
        self.target = Some(target);
    }
    /// Returns the spherical angles `(theta, phi)` of the propagation direction.
    #[must_use]
    pub fn direction_angles(&self) -> (f64, f64) {
        direction_to_angles(&self.direction)
    }
    /// Returns the wavelength within the propagation medium.
    #[must_use]
    pub fn medium_wavelength(&self) -> f64 {
        self.wavelength / self.refractive_index
    }
    /// Returns the curvature tensor after propagating the given distance.
    ///
    /// `Q(d) = (I + d * Q)^-1 * Q`
    ///
    /// # Errors
    ///
    /// This function will return [`GbtError::SingularTransform`] if `I + d * Q` cannot be
    /// inverted.
    pub fn propagated_q(&self, distance: f64) -> GbtResult<ComplexMatrix2> {
        let m = ComplexMatrix2::identity() + self.q * Complex::new(distance, 0.0);
        Ok(try_inverse_complex(&m, "beam propagation")? * self.q)
    }
    /// Returns the eigen decomposition of the curvature tensor at the origin.
    #[must_use]
    pub fn q_param(&self) -> QParam {
        QParam::of(&self.q)
    }
    /// Returns the eigen decomposition of the curvature tensor at the given distance.
    ///
    /// # Errors
    ///
    /// This function will return an error if the tensor cannot be propagated.
    pub fn q_param_at(&self, distance: f64) -> GbtResult<QParam> {
        Ok(QParam::of(&self.propagated_q(distance)?))
    }
    /// Returns the positions of the waists along the propagation direction (relative to the
    /// origin).
    #[must_use]
    pub fn waist_position(&self) -> (f64, f64) {
        let p = self.q_param();
        (-p.q1.re, -p.q2.re)
    }
    /// Returns the Rayleigh ranges along both eigen axes.
    #[must_use]
    pub fn rayleigh_range(&self) -> (f64, f64) {
        let p = self.q_param();
        (p.q1.im.abs(), p.q2.im.abs())
    }
    /// Returns the beam radii (1/e^2 of the intensity) at the given distance from the origin.
    #[must_use]
    pub fn width(&self, distance: f64) -> (f64, f64) {
        let lambda = self.medium_wavelength();
        let (d1, d2) = self.waist_position();
        let (z1, z2) = self.rayleigh_range();
        let w = |d: f64, z: f64| ((lambda / PI) * (distance - d).mul_add(distance - d, z * z) / z).sqrt();
        (w(d1, z1), w(d2, z2))
    }
    /// Returns the maximum beam radius along the beam segment from the origin to the given
    /// distance.
    #[must_use]
    pub fn max_width(&self, distance: f64) -> f64 {
        let (w1, w2) = self.width(0.0);
        let (w3, w4) = self.width(distance);
        w1.max(w2).max(w3).max(w4)
    }
    /// Returns the waist radii along both eigen axes.
    #[must_use]
    pub fn waist_size(&self) -> (f64, f64) {
        let (d1, d2) = self.waist_position();
        (self.width(d1).0, self.width(d2).1)
    }
    /// Returns the radii of curvature of the wavefront at the given distance.
    ///
    /// The radius is infinite at a waist.
    ///
    /// # Errors
    ///
    /// This function will return an error if the tensor cannot be propagated.
    pub fn radius_of_curvature(&self, distance: f64) -> GbtResult<(f64, f64)> {
        let p = self.q_param_at(distance)?;
        Ok((1.0 / p.q1.inv().re, 1.0 / p.q2.inv().re))
    }
    /// Returns the Gouy phases at the given distance.
    #[must_use]
    pub fn gouy_phase(&self, distance: f64) -> (f64, f64) {
        let (d1, d2) = self.waist_position();
        let (z1, z2) = self.rayleigh_range();
        (((distance - d1) / z1).atan(), ((distance - d2) / z2).atan())
    }
    /// Returns the continuation of this beam after propagating the given distance.
    ///
    /// The new beam starts at the propagated position with the propagated curvature tensor and
    /// keeps power, wavelength, basis, reference and stray order. Its length and target are
    /// reset.
    ///
    /// # Errors
    ///
    /// This function will return an error if the tensor cannot be propagated.
    pub fn translated(&self, distance: f64) -> GbtResult<Self> {
        Ok(Self {
            q: self.propagated_q(distance)?,
            position: self.position + distance * self.direction,
            opt_dist: 0.0,
            length: 0.0,
            target: None,
            ..self.clone()
        })
    }
}

impl Display for GaussianBeam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (wp1, wp2) = self.waist_position();
        let (ws1, ws2) = self.waist_size();
        let (z1, z2) = self.rayleigh_range();
        writeln!(f, "Beam: ({}) {{", self.reference)?;
        writeln!(f, "\tPower: {}W", self.power)?;
        writeln!(f, "\tIndex: {}", self.refractive_index)?;
        writeln!(f, "\tWavelength: {}m", self.wavelength)?;
        writeln!(
            f,
            "\tOrigin: ({}, {}, {})m",
            self.position.x, self.position.y, self.position.z
        )?;
        writeln!(
            f,
            "\tDirection: ({}, {}, {})",
            self.direction.x, self.direction.y, self.direction.z
        )?;
        writeln!(f, "\tLength: {}m", self.length)?;
        writeln!(f, "\tOrder: {}", self.stray_order)?;
        writeln!(f, "\tUx: ({}, {}, {})", self.ux.x, self.ux.y, self.ux.z)?;
        writeln!(f, "\tUy: ({}, {}, {})", self.uy.x, self.uy.y, self.uy.z)?;
        writeln!(f, "\tTens: [{}, {}]", self.q[(0, 0)], self.q[(0, 1)])?;
        writeln!(f, "\t      [{}, {}]", self.q[(1, 0)], self.q[(1, 1)])?;
        writeln!(f, "\tWaist Pos: ({wp1}, {wp2})m")?;
        writeln!(f, "\tWaist Size: ({ws1}, {ws2})m")?;
        writeln!(f, "\tRayleigh: ({z1}, {z2})m")?;
        write!(f, "}}")
    }
}
