#![warn(missing_docs)]
//! Optical components of a bench.
//!
//! All components share the same geometric description: a front (HR) surface, a back (AR)
//! surface and the cylindrical side of the substrate in between. What happens to a beam hitting
//! one of these faces depends on the [`ComponentKind`]:
//!
//! | kind          | HR / AR faces                               | side     |
//! |---------------|---------------------------------------------|----------|
//! | mirror        | reflection and refraction                   | absorbs  |
//! | beam splitter | reflection and refraction                   | absorbs  |
//! | thin lens     | reflection and refraction                   | absorbs  |
//! | thick lens    | reflection and refraction                   | absorbs  |
//! | special       | reflection and refraction                   | absorbs  |
//! | beam dump     | absorbs                                     | absorbs  |
//! | filter        | transmits matching wavelengths on HR        | -        |
//! | ghost         | transmits everything                        | -        |
//!
//! The components are usually created from their parameter structs (e.g. [`MirrorParameters`]),
//! which carry the default values of each kind and can be deserialized from a scene file.
mod beam_dump;
mod beam_splitter;
mod filter;
mod ghost;
mod interaction;
mod mirror;
mod special;
mod thick_lens;
mod thin_lens;

pub use beam_dump::BeamDumpParameters;
pub use beam_splitter::BeamSplitterParameters;
pub use filter::FilterParameters;
pub use ghost::GhostParameters;
pub use interaction::Daughters;
pub use mirror::MirrorParameters;
pub use special::SpecialParameters;
pub use thick_lens::ThickLensParameters;
pub use thin_lens::ThinLensParameters;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::Display as StrumDisplay;

use crate::{
    beam::GaussianBeam,
    config::SimulationConfig,
    diagnostics::{DiagnosticKind, Diagnostics},
    error::{GbtError, GbtResult},
    surface::{intersect_cylinder, Face, Intersection, OpticalSurface},
    utils::geom_transformation::{direction_from_angles, direction_to_angles, transverse_basis},
};

/// Reflectance and transmittance of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    reflectance: f64,
    transmittance: f64,
}
impl Coefficients {
    /// Creates new [`Coefficients`].
    ///
    /// # Errors
    ///
    /// This function will return an error if one of the values is outside the interval [0.0; 1.0].
    pub fn new(reflectance: f64, transmittance: f64) -> GbtResult<Self> {
        if !(0.0..=1.0).contains(&reflectance) || !(0.0..=1.0).contains(&transmittance) {
            return Err(GbtError::Component(
                "reflectance and transmittance must be in interval [0.0; 1.0]".into(),
            ));
        }
        Ok(Self {
            reflectance,
            transmittance,
        })
    }
    /// Returns the reflectance.
    #[must_use]
    pub const fn reflectance(&self) -> f64 {
        self.reflectance
    }
    /// Returns the transmittance.
    #[must_use]
    pub const fn transmittance(&self) -> f64 {
        self.transmittance
    }
    /// Returns `true` if the surface would create energy (R + T > 1).
    #[must_use]
    pub fn exceeds_unity(&self) -> bool {
        self.reflectance + self.transmittance > 1.0
    }
}

/// Stray order increments of the four interaction channels of a substrate.
///
/// A value of 0 marks the nominal path of a beam, a value of 1 a stray path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Actions {
    /// increment for a transmission through the HR face
    pub t_on_hr: u32,
    /// increment for a reflection on the HR face
    pub r_on_hr: u32,
    /// increment for a transmission through the AR face
    pub t_on_ar: u32,
    /// increment for a reflection on the AR face
    pub r_on_ar: u32,
}
impl Actions {
    /// Creates new [`Actions`].
    #[must_use]
    pub const fn new(t_on_hr: u32, r_on_hr: u32, t_on_ar: u32, r_on_ar: u32) -> Self {
        Self {
            t_on_hr,
            r_on_hr,
            t_on_ar,
            r_on_ar,
        }
    }
    /// Returns the increment of a transmission through the given face.
    #[must_use]
    pub const fn transmission(&self, face: Face) -> u32 {
        match face {
            Face::HR => self.t_on_hr,
            Face::AR => self.t_on_ar,
            Face::Side => 0,
        }
    }
    /// Returns the increment of a reflection on the given face.
    #[must_use]
    pub const fn reflection(&self, face: Face) -> u32 {
        match face {
            Face::HR => self.r_on_hr,
            Face::AR => self.r_on_ar,
            Face::Side => 0,
        }
    }
}

/// Optical properties of a refracting and reflecting substrate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Substrate {
    refractive_index: f64,
    hr: Coefficients,
    ar: Coefficients,
    actions: Actions,
}
impl Substrate {
    /// Creates a new [`Substrate`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the refractive index is not positive and finite.
    pub fn new(
        refractive_index: f64,
        hr: Coefficients,
        ar: Coefficients,
        actions: Actions,
    ) -> GbtResult<Self> {
        if !refractive_index.is_normal() || refractive_index.is_sign_negative() {
            return Err(GbtError::Component(
                "refractive index must be > 0.0 and finite".into(),
            ));
        }
        Ok(Self {
            refractive_index,
            hr,
            ar,
            actions,
        })
    }
    /// Returns the refractive index of the substrate.
    #[must_use]
    pub const fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
    /// Returns the coefficients of the HR face.
    #[must_use]
    pub const fn hr(&self) -> Coefficients {
        self.hr
    }
    /// Returns the coefficients of the AR face.
    #[must_use]
    pub const fn ar(&self) -> Coefficients {
        self.ar
    }
    /// Returns the stray order increments.
    #[must_use]
    pub const fn actions(&self) -> Actions {
        self.actions
    }
    /// Returns the coefficients of the given face (`None` for the side).
    #[must_use]
    pub const fn coefficients(&self, face: Face) -> Option<Coefficients> {
        match face {
            Face::HR => Some(self.hr),
            Face::AR => Some(self.ar),
            Face::Side => None,
        }
    }
}

/// The kind of an optical component together with its kind specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, StrumDisplay)]
pub enum ComponentKind {
    /// a (possibly curved and wedged) mirror
    #[strum(serialize = "mirror")]
    Mirror(Substrate),
    /// a beam splitter (no stray paths)
    #[strum(serialize = "beam splitter")]
    BeamSplitter(Substrate),
    /// a thin lens modelled by two equally curved surfaces
    #[strum(serialize = "thin lens")]
    ThinLens {
        /// focal length (m)
        focal_length: f64,
        /// substrate of the lens
        substrate: Substrate,
    },
    /// a thick lens with independent surfaces
    #[strum(serialize = "thick lens")]
    ThickLens(Substrate),
    /// a component absorbing every beam
    #[strum(serialize = "beam dump")]
    BeamDump,
    /// a wavelength filter
    #[strum(serialize = "filter")]
    Filter {
        /// transmitted vacuum wavelength (m)
        wavelength: f64,
    },
    /// a non interacting monitor surface
    #[strum(serialize = "ghost")]
    Ghost,
    /// a substrate with user defined stray order increments
    #[strum(serialize = "special")]
    Special(Substrate),
}
impl ComponentKind {
    /// Returns the substrate of this kind or `None` if it does not refract or reflect.
    #[must_use]
    pub const fn substrate(&self) -> Option<&Substrate> {
        match self {
            Self::Mirror(substrate)
            | Self::BeamSplitter(substrate)
            | Self::ThickLens(substrate)
            | Self::Special(substrate)
            | Self::ThinLens { substrate, .. } => Some(substrate),
            Self::BeamDump | Self::Filter { .. } | Self::Ghost => None,
        }
    }
    /// Returns `true` if beams of this kind are checked for clipping at the component edges.
    #[must_use]
    pub const fn is_clipping_capable(&self) -> bool {
        !matches!(self, Self::Filter { .. } | Self::Ghost)
    }
    /// Returns `true` if only the front plane of this kind is hit tested.
    #[must_use]
    pub const fn is_thin_element(&self) -> bool {
        matches!(self, Self::Filter { .. } | Self::Ghost)
    }
}

/// Result of a successful hit test of a beam on a [`Component`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    point: Point3<f64>,
    distance: f64,
    face: Face,
}
impl Hit {
    /// Creates a new [`Hit`].
    #[must_use]
    pub const fn new(intersection: Intersection, face: Face) -> Self {
        Self {
            point: intersection.point(),
            distance: intersection.distance(),
            face,
        }
    }
    /// Returns the point of incidence.
    #[must_use]
    pub const fn point(&self) -> Point3<f64> {
        self.point
    }
    /// Returns the distance between beam origin and point of incidence.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }
    /// Returns the face hit.
    #[must_use]
    pub const fn face(&self) -> Face {
        self.face
    }
}

/// Returns the center and normal of the back face of a wedged substrate.
///
/// The back face lies `thickness` behind the front face (measured at the thinnest edge). It is
/// tilted by `wedge` around the axis given by `alpha` in the transverse basis of the front normal.
///
/// # Errors
///
/// This function will return an error if the front normal is degenerate.
pub fn wedged_back_face(
    hr_center: &Point3<f64>,
    hr_normal: &Vector3<f64>,
    thickness: f64,
    wedge: f64,
    alpha: f64,
    diameter: f64,
) -> GbtResult<(Point3<f64>, Vector3<f64>)> {
    let (a, b) = transverse_basis(hr_normal)?;
    let center = hr_center - (0.5 * wedge.tan()).mul_add(diameter, thickness) * hr_normal;
    let normal = -wedge.cos() * hr_normal + wedge.sin() * (alpha.cos() * a + alpha.sin() * b);
    Ok((center, normal))
}

/// Placement and shape of a (possibly wedged) cylindrical substrate.
///
/// The HR surface is centered at `position` with its normal given by the spherical angles
/// `theta` and `phi`.
struct SubstrateShape {
    position: Point3<f64>,
    theta: f64,
    phi: f64,
    wedge: f64,
    alpha: f64,
    diameter: f64,
    thickness: f64,
    hr_curvature: f64,
    ar_curvature: f64,
}
impl SubstrateShape {
    /// Returns a flat, unwedged disc of the given thickness.
    const fn flat(position: Point3<f64>, (theta, phi): (f64, f64), diameter: f64, thickness: f64) -> Self {
        Self {
            position,
            theta,
            phi,
            wedge: 0.0,
            alpha: 0.0,
            diameter,
            thickness,
            hr_curvature: 0.0,
            ar_curvature: 0.0,
        }
    }
    fn build(&self, reference: &str, kind: ComponentKind) -> GbtResult<Component> {
        let hr_normal = direction_from_angles(self.theta, self.phi);
        let (ar_center, ar_normal) = wedged_back_face(
            &self.position,
            &hr_normal,
            self.thickness,
            self.wedge,
            self.alpha,
            self.diameter,
        )?;
        let hr = OpticalSurface::new(self.position, hr_normal, self.hr_curvature, self.diameter)?;
        let ar = OpticalSurface::new(ar_center, ar_normal, self.ar_curvature, self.diameter)?;
        Component::new(reference, kind, hr, ar, self.thickness, (self.wedge, self.alpha))
    }
}

/// An optical component placed on the bench.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    reference: String,
    kind: ComponentKind,
    hr: OpticalSurface,
    ar: OpticalSurface,
    thickness: f64,
    wedge: f64,
    alpha: f64,
}
impl Component {
    /// Creates a new [`Component`] from its surfaces.
    ///
    /// `thickness`, `wedge` and `alpha` are informational values used for reporting. The geometry
    /// is fully defined by the two surfaces.
    ///
    /// # Errors
    ///
    /// This function will return an error if the reference is empty or the thickness is negative
    /// or not finite.
    pub fn new(
        reference: &str,
        kind: ComponentKind,
        hr: OpticalSurface,
        ar: OpticalSurface,
        thickness: f64,
        (wedge, alpha): (f64, f64),
    ) -> GbtResult<Self> {
        if reference.is_empty() {
            return Err(GbtError::Component("reference must not be empty".into()));
        }
        if !thickness.is_finite() || thickness.is_sign_negative() {
            return Err(GbtError::Component(
                "thickness must be >= 0.0 and finite".into(),
            ));
        }
        Ok(Self {
            reference: reference.to_owned(),
            kind,
            hr,
            ar,
            thickness,
            wedge,
            alpha,
        })
    }
    /// Returns the reference of this [`Component`].
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
    /// Returns the kind of this [`Component`].
    #[must_use]
    pub const fn kind(&self) -> &ComponentKind {
        &self.kind
    }
    /// Returns the HR surface of this [`Component`].
    #[must_use]
    pub const fn hr(&self) -> &OpticalSurface {
        &self.hr
    }
    /// Returns the AR surface of this [`Component`].
    #[must_use]
    pub const fn ar(&self) -> &OpticalSurface {
        &self.ar
    }
    /// Returns the diameter of this [`Component`].
    #[must_use]
    pub const fn diameter(&self) -> f64 {
        self.hr.diameter()
    }
    /// Returns the (nominal) thickness of this [`Component`].
    #[must_use]
    pub const fn thickness(&self) -> f64 {
        self.thickness
    }
    /// Returns the wedge angle of this [`Component`].
    #[must_use]
    pub const fn wedge(&self) -> f64 {
        self.wedge
    }
    /// Returns the orientation of the wedge of this [`Component`].
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }
    /// Returns the center of the given face (the HR center for the side).
    #[must_use]
    pub const fn face_center(&self, face: Face) -> Point3<f64> {
        match face {
            Face::AR => self.ar.center(),
            Face::HR | Face::Side => self.hr.center(),
        }
    }
    /// Length of the cylindrical side between the HR and AR chords.
    fn side_length(&self) -> f64 {
        (self.hr.center() - self.ar.center()).dot(&self.hr.normal())
    }
    /// Determines where a beam hits this component.
    ///
    /// Returns the nearest intersection with one of the faces of this component or `None` if
    /// the beam misses it.
    #[must_use]
    pub fn is_hit(&self, beam: &GaussianBeam, config: &SimulationConfig) -> Option<Hit> {
        let origin = beam.position();
        let dir = beam.direction();
        if self.kind.is_thin_element() {
            let face = if dir.dot(&self.hr.normal()) > 0.0 {
                Face::AR
            } else {
                Face::HR
            };
            return self
                .hr
                .intersect(&origin, &dir, config)
                .map(|intersection| Hit::new(intersection, face));
        }
        let side_length = self.side_length();
        let side = if side_length > config.zero() {
            intersect_cylinder(
                &origin,
                &dir,
                &self.hr.center(),
                &self.hr.normal(),
                side_length,
                self.diameter(),
                config,
            )
        } else {
            None
        };
        [
            (Face::HR, self.hr.intersect(&origin, &dir, config)),
            (Face::AR, self.ar.intersect(&origin, &dir, config)),
            (Face::Side, side),
        ]
        .into_iter()
        .filter_map(|(face, intersection)| intersection.map(|i| Hit::new(i, face)))
        .fold(None, |nearest: Option<Hit>, hit| match nearest {
            Some(n) if n.distance() <= hit.distance() => Some(n),
            _ => Some(hit),
        })
    }
    /// Checks the parameters of this component for physically questionable values.
    ///
    /// The following conditions generate a warning:
    ///   - R + T > 1 on the HR or AR face
    ///   - a refractive index < 1
    ///   - a diameter larger than the diameter of the sphere of the HR or AR surface
    ///   - intersecting HR and AR surfaces
    pub fn geometry_check(&self, config: &SimulationConfig, diagnostics: &mut Diagnostics) {
        let Some(substrate) = self.kind.substrate() else {
            return;
        };
        let mut warn = |message: String| {
            diagnostics.warning(
                DiagnosticKind::InvalidConfiguration,
                format!("in {} '{}', {message}", self.kind, self.reference),
            );
        };
        for (face, coefficients) in [(Face::HR, substrate.hr()), (Face::AR, substrate.ar())] {
            if coefficients.exceeds_unity() {
                warn(format!("on {face}, R + T > 1"));
            }
        }
        if substrate.refractive_index() < 1.0 {
            warn("optical index < 1".into());
        }
        for (face, surface) in [(Face::HR, &self.hr), (Face::AR, &self.ar)] {
            let k = surface.curvature();
            if k != 0.0 && 1.0 / k.abs() < self.diameter() / 2.0 {
                warn(format!(
                    "the diameter of the {} exceeds the diameter of the {face} surface",
                    self.kind
                ));
            }
        }
        if self.surfaces_collide(config) {
            warn("HR and AR surfaces intersect".into());
        }
    }
    fn surfaces_collide(&self, config: &SimulationConfig) -> bool {
        if self.hr.curvature() <= 0.0 && self.ar.curvature() <= 0.0 {
            return false;
        }
        (self.ar.apex(config) - self.hr.apex(config)).dot(&self.hr.normal()) > 0.0
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (theta, phi) = direction_to_angles(&self.hr.normal());
        let c = self.hr.center();
        writeln!(f, "{}: {} {{", self.kind, self.reference)?;
        match &self.kind {
            ComponentKind::ThinLens { focal_length, .. } => {
                writeln!(f, "\tFocal: {}mm", focal_length * 1e3)?;
            }
            ComponentKind::Filter { wavelength } => {
                writeln!(f, "\tWavelength: {}nm", wavelength * 1e9)?;
            }
            _ => {}
        }
        writeln!(f, "\tThick: {}cm", self.thickness * 1e2)?;
        writeln!(f, "\tDiameter: {}cm", self.diameter() * 1e2)?;
        if self.wedge != 0.0 {
            writeln!(f, "\tWedge: {}deg", self.wedge.to_degrees())?;
            writeln!(f, "\tAlpha: {}deg", self.alpha.to_degrees())?;
        }
        writeln!(f, "\tHRCenter: ({}, {}, {})m", c.x, c.y, c.z)?;
        writeln!(
            f,
            "\tHRNorm: ({}, {})deg",
            theta.to_degrees(),
            phi.to_degrees()
        )?;
        if let Some(substrate) = self.kind.substrate() {
            let actions = substrate.actions();
            writeln!(f, "\tIndex: {}", substrate.refractive_index())?;
            writeln!(
                f,
                "\tHRKurv, ARKurv: {}, {}",
                self.hr.curvature(),
                self.ar.curvature()
            )?;
            writeln!(
                f,
                "\tHRr, HRt, ARr, ARt: {}, {}, {}, {}",
                substrate.hr().reflectance(),
                substrate.hr().transmittance(),
                substrate.ar().reflectance(),
                substrate.ar().transmittance()
            )?;
            if matches!(self.kind, ComponentKind::Special(_)) {
                writeln!(f, "\tTonHR, RonHR: {}, {}", actions.t_on_hr, actions.r_on_hr)?;
                writeln!(f, "\tTonAR, RonAR: {}, {}", actions.t_on_ar, actions.r_on_ar)?;
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::test_helper::test_helper::check_warnings;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;
    use std::f64::consts::FRAC_PI_2;

    fn beam_along_x(position: Point3<f64>) -> GaussianBeam {
        GaussianBeam::new_orthogonal(
            (1e-3, 1e-3),
            (0.0, 0.0),
            1064e-9,
            1.0,
            position,
            Vector3::x(),
        )
        .unwrap()
    }
    #[test]
    fn coefficients() {
        assert!(Coefficients::new(0.5, 0.5).is_ok());
        assert_matches!(Coefficients::new(1.1, 0.0), Err(GbtError::Component(_)));
        assert!(Coefficients::new(0.0, -0.1).is_err());
        assert!(Coefficients::new(f64::NAN, 0.0).is_err());
        assert!(Coefficients::new(0.6, 0.6).unwrap().exceeds_unity());
        assert!(!Coefficients::new(0.6, 0.4).unwrap().exceeds_unity());
    }
    #[test]
    fn actions() {
        let a = Actions::new(1, 0, 0, 1);
        assert_eq!(a.transmission(Face::HR), 1);
        assert_eq!(a.reflection(Face::HR), 0);
        assert_eq!(a.transmission(Face::AR), 0);
        assert_eq!(a.reflection(Face::AR), 1);
        assert_eq!(a.reflection(Face::Side), 0);
    }
    #[test]
    fn substrate() {
        let c = Coefficients::new(0.5, 0.5).unwrap();
        assert!(Substrate::new(0.0, c, c, Actions::default()).is_err());
        assert!(Substrate::new(-1.5, c, c, Actions::default()).is_err());
        let s = Substrate::new(1.5, c, c, Actions::default()).unwrap();
        assert_eq!(s.coefficients(Face::HR), Some(c));
        assert_eq!(s.coefficients(Face::Side), None);
    }
    #[test]
    fn kind() {
        assert_eq!(ComponentKind::BeamDump.to_string(), "beam dump");
        assert_eq!(ComponentKind::Ghost.to_string(), "ghost");
        assert!(ComponentKind::BeamDump.is_clipping_capable());
        assert!(!ComponentKind::Ghost.is_clipping_capable());
        assert!(!ComponentKind::Filter { wavelength: 1e-6 }.is_clipping_capable());
        assert!(ComponentKind::BeamDump.substrate().is_none());
    }
    #[test]
    fn back_face() {
        let (c, n) =
            wedged_back_face(&Point3::origin(), &Vector3::x(), 0.02, 0.0, 0.0, 0.05).unwrap();
        assert_abs_diff_eq!(c, Point3::new(-0.02, 0.0, 0.0), epsilon = 1e-15);
        assert_abs_diff_eq!(n, -Vector3::x(), epsilon = 1e-15);
        let wedge: f64 = 0.1;
        let (c, n) =
            wedged_back_face(&Point3::origin(), &Vector3::x(), 0.02, wedge, 0.0, 0.05).unwrap();
        assert_relative_eq!(c.x, -(0.02 + 0.025 * wedge.tan()), max_relative = 1e-12);
        assert_relative_eq!(n.norm(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(n.dot(&-Vector3::x()), wedge.cos(), max_relative = 1e-12);
    }
    #[test]
    fn new() {
        let hr = OpticalSurface::new(Point3::origin(), Vector3::x(), 0.0, 0.05).unwrap();
        assert!(Component::new("", ComponentKind::Ghost, hr, hr, 0.0, (0.0, 0.0)).is_err());
        assert!(Component::new("g", ComponentKind::Ghost, hr, hr, -1.0, (0.0, 0.0)).is_err());
        let c = Component::new("g", ComponentKind::Ghost, hr, hr, 0.0, (0.0, 0.0)).unwrap();
        assert_eq!(c.reference(), "g");
        assert_eq!(c.diameter(), 0.05);
    }
    #[test]
    fn is_hit_faces() {
        let config = SimulationConfig::default();
        // mirror at x = 1 facing the beam
        let mirror = MirrorParameters {
            position: Point3::new(1.0, 0.0, 0.0),
            theta: FRAC_PI_2,
            phi: std::f64::consts::PI,
            ..Default::default()
        }
        .build()
        .unwrap();
        let hit = mirror
            .is_hit(&beam_along_x(Point3::origin()), &config)
            .unwrap();
        assert_eq!(hit.face(), Face::HR);
        assert_relative_eq!(hit.distance(), 1.0, max_relative = 1e-12);
        // from behind: AR face first
        let hit = mirror
            .is_hit(&beam_along_x(Point3::new(1.5, 0.0, 0.0)), &config);
        assert!(hit.is_none());
        let beam = GaussianBeam::new_orthogonal(
            (1e-3, 1e-3),
            (0.0, 0.0),
            1064e-9,
            1.0,
            Point3::new(2.0, 0.0, 0.0),
            -Vector3::x(),
        )
        .unwrap();
        let hit = mirror.is_hit(&beam, &config).unwrap();
        assert_eq!(hit.face(), Face::AR);
        assert_relative_eq!(hit.distance(), 0.98, max_relative = 1e-12);
        // through the side
        let beam = GaussianBeam::new_orthogonal(
            (1e-3, 1e-3),
            (0.0, 0.0),
            1064e-9,
            1.0,
            Point3::new(1.01, -1.0, 0.0),
            Vector3::y(),
        )
        .unwrap();
        let hit = mirror.is_hit(&beam, &config).unwrap();
        assert_eq!(hit.face(), Face::Side);
        assert_relative_eq!(hit.distance(), 1.0 - 0.025, max_relative = 1e-12);
        // miss
        let beam = beam_along_x(Point3::new(0.0, 1.0, 0.0));
        assert!(mirror.is_hit(&beam, &config).is_none());
    }
    #[test]
    fn is_hit_thin_element() {
        let config = SimulationConfig::default();
        let ghost = GhostParameters {
            position: Point3::new(1.0, 0.0, 0.0),
            phi: std::f64::consts::PI,
            ..Default::default()
        }
        .build()
        .unwrap();
        let hit = ghost
            .is_hit(&beam_along_x(Point3::origin()), &config)
            .unwrap();
        assert_eq!(hit.face(), Face::HR);
        let beam = GaussianBeam::new_orthogonal(
            (1e-3, 1e-3),
            (0.0, 0.0),
            1064e-9,
            1.0,
            Point3::new(2.0, 0.0, 0.0),
            -Vector3::x(),
        )
        .unwrap();
        assert_eq!(ghost.is_hit(&beam, &config).unwrap().face(), Face::AR);
    }
    #[test]
    fn geometry_check_valid() {
        testing_logger::setup();
        let mut diagnostics = Diagnostics::default();
        let mirror = MirrorParameters::default().build().unwrap();
        mirror.geometry_check(&SimulationConfig::default(), &mut diagnostics);
        assert!(diagnostics.is_empty());
        check_warnings(vec![]);
    }
    #[test]
    fn geometry_check_invalid() {
        testing_logger::setup();
        let mut diagnostics = Diagnostics::default();
        let mirror = MirrorParameters {
            reference: "M1".into(),
            hr_reflectance: 0.9,
            hr_transmittance: 0.2,
            refractive_index: 0.9,
            hr_curvature: 50.0,
            thickness: 0.01,
            ..Default::default()
        }
        .build()
        .unwrap();
        mirror.geometry_check(&SimulationConfig::default(), &mut diagnostics);
        assert_eq!(diagnostics.len(), 4);
        check_warnings(vec![
            "in mirror 'M1', on HR, R + T > 1",
            "in mirror 'M1', optical index < 1",
            "in mirror 'M1', the diameter of the mirror exceeds the diameter of the HR surface",
            "in mirror 'M1', HR and AR surfaces intersect",
        ]);
    }
    #[test]
    fn geometry_check_no_substrate() {
        let mut diagnostics = Diagnostics::default();
        let dump = BeamDumpParameters::default().build().unwrap();
        dump.geometry_check(&SimulationConfig::default(), &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
    #[test]
    fn display() {
        let mirror = MirrorParameters {
            reference: "M1".into(),
            ..Default::default()
        }
        .build()
        .unwrap();
        let text = mirror.to_string();
        assert!(text.starts_with("mirror: M1 {"));
        assert!(text.contains("\tThick: 2cm"));
        assert!(text.ends_with('}'));
    }
}
