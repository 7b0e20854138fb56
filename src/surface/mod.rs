//! Module for handling the surfaces of optical components
//!
//! This module contains the ray intersection routines for the basic surface shapes (flat disc,
//! spherical cap, cylinder) as well as the [`OpticalSurface`], a centered and oriented surface
//! with a given curvature and clear aperture.
mod cylinder;
mod optical_surface;
mod plane;
mod sphere;

pub use cylinder::intersect_cylinder;
pub use optical_surface::OpticalSurface;
pub use plane::intersect_plane;
pub use sphere::{half_angle, intersect_spherical_surface, sphere_center};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Result of a successful ray / surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    distance: f64,
    point: Point3<f64>,
}
impl Intersection {
    /// Creates a new [`Intersection`].
    #[must_use]
    pub const fn new(distance: f64, point: Point3<f64>) -> Self {
        Self { distance, point }
    }
    /// Returns the distance along the ray between the ray origin and the intersection point.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }
    /// Returns the intersection point.
    #[must_use]
    pub const fn point(&self) -> Point3<f64> {
        self.point
    }
}

/// The faces of an optical component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Face {
    /// the (highly) reflective front face
    HR,
    /// the anti-reflective back face
    AR,
    /// the cylindrical side of the substrate
    Side,
}
