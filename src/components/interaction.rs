//! Interaction of a beam with the face of a component.
use approx::relative_eq;
use nalgebra::Vector3;

use super::{Component, ComponentKind, Hit, Substrate};
use crate::{
    beam::{Anchor, GaussianBeam},
    config::{SimulationConfig, TraceLimits},
    diagnostics::{DiagnosticKind, Diagnostics},
    error::GbtResult,
    refraction::compute_daughter_directions,
    surface::Face,
    transfer::{oriented_normal_and_curvature, Incidence},
    utils::{geom_transformation::transverse_basis, math_utils::ComplexMatrix2},
};

/// The daughter beams created by an interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Daughters {
    /// the transmitted (refracted) beam
    pub transmitted: Option<GaussianBeam>,
    /// the reflected beam
    pub reflected: Option<GaussianBeam>,
}
impl Daughters {
    /// Returns `true` if no daughter beam was created.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.transmitted.is_none() && self.reflected.is_none()
    }
}

/// Properties of a prospective daughter beam.
struct Channel {
    power: f64,
    stray_order: u32,
    refractive_index: f64,
    reference: String,
}

impl Component {
    /// Computes the daughter beams of a beam hitting this component.
    ///
    /// The given beam is ended at the point of incidence: its length, optical path and target are
    /// set from the hit. Daughter beams start at the point of incidence, carry the reference of
    /// the parent extended by `t` (transmitted) or `r` (reflected) and are suppressed if their
    /// power falls below the threshold or their stray order exceeds the maximum order.
    ///
    /// # Errors
    ///
    /// This function will return an error if the curvature tensor of a daughter beam cannot be
    /// computed (singular transform, e.g. at grazing incidence).
    pub fn interact(
        &self,
        beam: &mut GaussianBeam,
        hit: &Hit,
        limits: &TraceLimits,
        config: &SimulationConfig,
        diagnostics: &mut Diagnostics,
    ) -> GbtResult<Daughters> {
        let anchor = Anchor::new(&self.reference, hit.face());
        beam.set_target(hit.distance(), anchor.clone());
        match &self.kind {
            ComponentKind::BeamDump => {
                self.absorb(beam, hit.face(), diagnostics);
                Ok(Daughters::default())
            }
            ComponentKind::Ghost => {
                let transmitted = beam.translated(hit.distance())?.with_origin(anchor);
                Ok(Daughters {
                    transmitted: Some(transmitted),
                    reflected: None,
                })
            }
            ComponentKind::Filter { wavelength } => {
                if hit.face() == Face::HR
                    && relative_eq!(*wavelength, beam.wavelength(), max_relative = 1e-9)
                {
                    let reference = format!("{}t", beam.reference());
                    let transmitted = beam
                        .translated(hit.distance())?
                        .with_reference(&reference)
                        .with_origin(anchor);
                    Ok(Daughters {
                        transmitted: Some(transmitted),
                        reflected: None,
                    })
                } else {
                    self.absorb(beam, hit.face(), diagnostics);
                    Ok(Daughters::default())
                }
            }
            ComponentKind::Mirror(substrate)
            | ComponentKind::BeamSplitter(substrate)
            | ComponentKind::ThickLens(substrate)
            | ComponentKind::Special(substrate)
            | ComponentKind::ThinLens { substrate, .. } => {
                if hit.face() == Face::Side {
                    self.absorb(beam, hit.face(), diagnostics);
                    Ok(Daughters::default())
                } else {
                    self.refract_and_reflect(substrate, beam, hit, limits, config, diagnostics)
                }
            }
        }
    }
    fn absorb(&self, beam: &GaussianBeam, face: Face, diagnostics: &mut Diagnostics) {
        diagnostics.info(
            DiagnosticKind::Absorbed,
            format!(
                "beam {} absorbed on ({}, {face})",
                beam.reference(),
                self.reference
            ),
        );
    }
    /// Returns `true` if a daughter beam with the given power and order survives.
    fn admit(
        &self,
        channel: &Channel,
        limits: &TraceLimits,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        if limits.below_threshold(channel.power) {
            diagnostics.info(
                DiagnosticKind::ThresholdReached,
                format!(
                    "reached power threshold for beam {} on {}",
                    channel.reference, self.reference
                ),
            );
            return false;
        }
        if limits.order_exceeded(channel.stray_order) {
            diagnostics.info(
                DiagnosticKind::OrderReached,
                format!(
                    "reached maximum order for beam {} on {}",
                    channel.reference, self.reference
                ),
            );
            return false;
        }
        true
    }
    fn refract_and_reflect(
        &self,
        substrate: &Substrate,
        beam: &GaussianBeam,
        hit: &Hit,
        limits: &TraceLimits,
        config: &SimulationConfig,
        diagnostics: &mut Diagnostics,
    ) -> GbtResult<Daughters> {
        let face = hit.face();
        let (surface, coefficients) = match face {
            Face::AR => (&self.ar, substrate.ar()),
            _ => (&self.hr, substrate.hr()),
        };
        let actions = substrate.actions();
        let direction = beam.direction();
        let (n1, n2) = if direction.dot(&surface.normal()) < 0.0 {
            (beam.refractive_index(), substrate.refractive_index())
        } else {
            (substrate.refractive_index(), 1.0)
        };
        let (normal, curvature) =
            oriented_normal_and_curvature(surface, &hit.point(), &direction, config);
        let directions = compute_daughter_directions(&direction, &normal, n1, n2);

        let transmitted_channel = Channel {
            power: beam.power() * coefficients.transmittance(),
            stray_order: beam.stray_order() + actions.transmission(face),
            refractive_index: n2,
            reference: format!("{}t", beam.reference()),
        };
        let reflected_channel = Channel {
            power: beam.power() * coefficients.reflectance(),
            stray_order: beam.stray_order() + actions.reflection(face),
            refractive_index: n1,
            reference: format!("{}r", beam.reference()),
        };
        let refracted_direction = if self.admit(&transmitted_channel, limits, diagnostics) {
            if directions.total_reflection() {
                diagnostics.warning(
                    DiagnosticKind::TotalReflection,
                    format!(
                        "total reflection of beam {} on ({}, {face})",
                        beam.reference(),
                        self.reference
                    ),
                );
            }
            directions.refracted()
        } else {
            None
        };
        let reflected_direction = self
            .admit(&reflected_channel, limits, diagnostics)
            .then(|| directions.reflected());
        if refracted_direction.is_none() && reflected_direction.is_none() {
            return Ok(Daughters::default());
        }

        let incidence = Incidence::new(beam, hit.distance(), normal, curvature, (n1, n2))?;
        let transmitted = refracted_direction
            .map(|dir| -> GbtResult<GaussianBeam> {
                let basis = transverse_basis(&dir)?;
                let q = incidence.refracted_q(&dir, basis)?;
                self.daughter(beam, hit, q, dir, &transmitted_channel)
            })
            .transpose()?;
        let reflected = reflected_direction
            .map(|dir| -> GbtResult<GaussianBeam> {
                let basis = transverse_basis(&dir)?;
                let q = incidence.reflected_q(&dir, basis)?;
                self.daughter(beam, hit, q, dir, &reflected_channel)
            })
            .transpose()?;
        Ok(Daughters {
            transmitted,
            reflected,
        })
    }
    fn daughter(
        &self,
        parent: &GaussianBeam,
        hit: &Hit,
        q: ComplexMatrix2,
        direction: Vector3<f64>,
        channel: &Channel,
    ) -> GbtResult<GaussianBeam> {
        Ok(GaussianBeam::new(
            q,
            parent.wavelength(),
            channel.power,
            hit.point(),
            direction,
        )?
        .with_refractive_index(channel.refractive_index)?
        .with_reference(&channel.reference)
        .with_stray_order(channel.stray_order)
        .with_origin(Anchor::new(&self.reference, hit.face())))
    }
}
