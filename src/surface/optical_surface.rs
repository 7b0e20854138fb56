//! Module for handling optical surfaces.
//!
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::{intersect_plane, intersect_spherical_surface, sphere::half_angle, sphere_center, Intersection};
use crate::{
    config::SimulationConfig,
    error::{GbtError, GbtResult},
};

/// A circular, flat or spherical surface of an optical component.
///
/// The surface is described by the center of its chord (the disc spanned by its rim), the outward
/// unit normal of the chord, its signed curvature and its diameter. A positive curvature denotes
/// a concave surface: its center of curvature lies on the outer side (in the direction of the
/// normal). A negative curvature denotes a convex surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalSurface {
    center: Point3<f64>,
    normal: Vector3<f64>,
    curvature: f64,
    diameter: f64,
}
impl OpticalSurface {
    /// Creates a new [`OpticalSurface`].
    ///
    /// The given normal vector is normalized.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the center is not finite
    ///   - the normal vector has zero length or is not finite
    ///   - the curvature is not finite
    ///   - the diameter is not positive and finite
    pub fn new(
        center: Point3<f64>,
        normal: Vector3<f64>,
        curvature: f64,
        diameter: f64,
    ) -> GbtResult<Self> {
        if center.iter().any(|x| !x.is_finite()) {
            return Err(GbtError::Geometry("surface center must be finite".into()));
        }
        if normal.norm() < f64::EPSILON || normal.iter().any(|x| !x.is_finite()) {
            return Err(GbtError::Geometry(
                "surface normal must have a non zero length and be finite".into(),
            ));
        }
        if !curvature.is_finite() {
            return Err(GbtError::Geometry("surface curvature must be finite".into()));
        }
        if !diameter.is_normal() || diameter.is_sign_negative() {
            return Err(GbtError::Geometry(
                "surface diameter must be > 0.0 and finite".into(),
            ));
        }
        Ok(Self {
            center,
            normal: normal.normalize(),
            curvature,
            diameter,
        })
    }
    /// Returns the center of the chord of this [`OpticalSurface`].
    #[must_use]
    pub const fn center(&self) -> Point3<f64> {
        self.center
    }
    /// Returns the outward unit normal of the chord of this [`OpticalSurface`].
    #[must_use]
    pub const fn normal(&self) -> Vector3<f64> {
        self.normal
    }
    /// Returns the signed curvature of this [`OpticalSurface`].
    #[must_use]
    pub const fn curvature(&self) -> f64 {
        self.curvature
    }
    /// Returns the diameter of this [`OpticalSurface`].
    #[must_use]
    pub const fn diameter(&self) -> f64 {
        self.diameter
    }
    /// Returns `true` if this surface is regarded as flat for the given config.
    #[must_use]
    pub fn is_flat(&self, config: &SimulationConfig) -> bool {
        self.curvature.abs() < config.flat_curvature()
    }
    /// Returns the center of curvature or `None` for a flat surface.
    #[must_use]
    pub fn center_of_curvature(&self, config: &SimulationConfig) -> Option<Point3<f64>> {
        if self.is_flat(config) {
            None
        } else {
            Some(sphere_center(
                &self.center,
                &self.normal,
                self.curvature,
                self.diameter,
            ))
        }
    }
    /// Returns the point of the surface on its symmetry axis.
    #[must_use]
    pub fn apex(&self, config: &SimulationConfig) -> Point3<f64> {
        if self.is_flat(config) {
            self.center
        } else {
            let theta = half_angle(self.diameter, self.curvature);
            self.center + (theta.cos() - 1.0) / self.curvature * self.normal
        }
    }
    /// Returns the unit vector pointing from the given surface point towards the center of
    /// curvature.
    ///
    /// For flat surfaces the (signed) chord normal is returned: along the outward normal for a
    /// positive (or zero) curvature and against it otherwise.
    #[must_use]
    pub fn direction_to_center(
        &self,
        point: &Point3<f64>,
        config: &SimulationConfig,
    ) -> Vector3<f64> {
        self.center_of_curvature(config).map_or_else(
            || {
                if self.curvature.is_sign_negative() {
                    -self.normal
                } else {
                    self.normal
                }
            },
            |center| (center - point).normalize(),
        )
    }
    /// Calculate the intersection of a ray with this surface.
    ///
    /// Returns `None` if the ray misses the surface.
    #[must_use]
    pub fn intersect(
        &self,
        origin: &Point3<f64>,
        dir: &Vector3<f64>,
        config: &SimulationConfig,
    ) -> Option<Intersection> {
        if self.is_flat(config) {
            intersect_plane(origin, dir, &self.center, &self.normal, self.diameter, config)
        } else {
            // normal pointing towards the center of curvature, positive curvature
            let towards_center = if self.curvature.is_sign_negative() {
                -self.normal
            } else {
                self.normal
            };
            intersect_spherical_surface(
                origin,
                dir,
                &self.center,
                &towards_center,
                self.curvature.abs(),
                self.diameter,
                config,
            )
        }
    }
}
