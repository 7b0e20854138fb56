#![warn(missing_docs)]
//! A complete beam tracing run.
//!
//! A [`Simulation`] bundles the input beams, the components of the optical bench, the
//! [`TraceLimits`] and the [`SimulationConfig`]. Running it traces one [`BeamTree`] per input
//! beam.
use log::info;
use serde::Serialize;

use crate::{
    beam::GaussianBeam,
    beam_tree::{build_tree, BeamTree},
    components::Component,
    config::{SimulationConfig, TraceLimits},
    diagnostics::{DiagnosticKind, Diagnostics},
    error::GbtResult,
};

/// A beam tracing run on an optical bench.
#[derive(Debug, Clone)]
pub struct Simulation {
    name: String,
    beams: Vec<GaussianBeam>,
    components: Vec<Component>,
    limits: TraceLimits,
    config: SimulationConfig,
}
impl Simulation {
    /// Creates a new [`Simulation`].
    #[must_use]
    pub fn new(
        name: &str,
        beams: Vec<GaussianBeam>,
        components: Vec<Component>,
        limits: TraceLimits,
        config: SimulationConfig,
    ) -> Self {
        Self {
            name: name.to_owned(),
            beams,
            components,
            limits,
            config,
        }
    }
    /// Returns the name of this [`Simulation`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Returns the input beams.
    #[must_use]
    pub fn beams(&self) -> &[GaussianBeam] {
        &self.beams
    }
    /// Returns the components of the optical bench.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }
    /// Returns the maximum stray order (`None` = unlimited).
    #[must_use]
    pub const fn order(&self) -> Option<u32> {
        self.limits.order()
    }
    /// Returns the power threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.limits.threshold()
    }
    /// Returns the [`SimulationConfig`] of this [`Simulation`].
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }
    /// Returns the number of optics.
    ///
    /// Optics are all components with a substrate (i.e. not beam dumps, filters or ghosts).
    #[must_use]
    pub fn number_of_optics(&self) -> usize {
        self.components
            .iter()
            .filter(|c| c.kind().substrate().is_some())
            .count()
    }
    /// Checks the parameters of this [`Simulation`] before running it.
    ///
    /// Warns about parameters that might prevent the tracing from terminating and about
    /// physically invalid components.
    #[must_use]
    pub fn advisories(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::default();
        if self.threshold() < 0.0 {
            diagnostics.warning(
                DiagnosticKind::NonTerminating,
                "running simulation with negative threshold, termination not guaranteed".into(),
            );
        }
        if self.order().is_none() {
            diagnostics.warning(
                DiagnosticKind::NonTerminating,
                "running simulation with infinite order, termination not guaranteed".into(),
            );
        }
        for component in &self.components {
            component.geometry_check(&self.config, &mut diagnostics);
        }
        diagnostics
    }
    /// Runs this [`Simulation`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the tracing of one of the input beams fails. A beam
    /// whose daughters cannot be computed only ends its own branch (see [`build_tree`]).
    pub fn run(&self) -> GbtResult<SimulationResult> {
        let mut diagnostics = self.advisories();
        let mut trees = Vec::with_capacity(self.beams.len());
        for beam in &self.beams {
            info!("tracing beam {}", beam.reference());
            let mut outcome = build_tree(beam.clone(), &self.components, &self.limits, &self.config)?;
            info!(
                "beam {} created {} beams",
                beam.reference(),
                outcome.tree.number_of_beams()
            );
            diagnostics.append(&mut outcome.diagnostics);
            trees.push(outcome.tree);
        }
        Ok(SimulationResult { trees, diagnostics })
    }
}

/// The result of a [`Simulation`] run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    trees: Vec<BeamTree>,
    diagnostics: Diagnostics,
}
impl SimulationResult {
    /// Returns the beam trees, one per input beam.
    #[must_use]
    pub fn trees(&self) -> &[BeamTree] {
        &self.trees
    }
    /// Returns all diagnostics of the run (advisories first).
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        beam::BeamParameters,
        components::{BeamDumpParameters, MirrorParameters},
        transfer::oriented_normal_and_curvature,
        utils::test_helper::test_helper::check_warnings,
    };
    use nalgebra::{Point3, Vector3};

    fn beam() -> GaussianBeam {
        GaussianBeam::from_parameters(&BeamParameters::default()).unwrap()
    }
    fn dump() -> Component {
        BeamDumpParameters {
            reference: "D".into(),
            position: Point3::new(1.0, 0.0, 0.0),
            phi: std::f64::consts::PI,
            ..Default::default()
        }
        .build()
        .unwrap()
    }
    #[test]
    fn new() {
        let s = Simulation::new(
            "test",
            vec![beam()],
            vec![dump()],
            TraceLimits::new(Some(2), 1e-3),
            SimulationConfig::default(),
        );
        assert_eq!(s.name(), "test");
        assert_eq!(s.beams().len(), 1);
        assert_eq!(s.components().len(), 1);
        assert_eq!(s.order(), Some(2));
        assert_eq!(s.threshold(), 1e-3);
        assert_eq!(s.number_of_optics(), 0);
    }
    #[test]
    fn advisories() {
        testing_logger::setup();
        let s = Simulation::new(
            "test",
            vec![],
            vec![],
            TraceLimits::new(None, -1e-3),
            SimulationConfig::default(),
        );
        let diagnostics = s.advisories();
        assert_eq!(
            diagnostics.of_kind(DiagnosticKind::NonTerminating).count(),
            2
        );
        check_warnings(vec![
            "running simulation with negative threshold, termination not guaranteed",
            "running simulation with infinite order, termination not guaranteed",
        ]);
    }
    #[test]
    fn advisories_invalid_component() {
        let mirror = MirrorParameters {
            reference: "M".into(),
            refractive_index: 0.9,
            ..Default::default()
        }
        .build()
        .unwrap();
        let s = Simulation::new(
            "test",
            vec![],
            vec![mirror],
            TraceLimits::new(Some(1), 1e-3),
            SimulationConfig::default(),
        );
        assert_eq!(s.number_of_optics(), 1);
        let diagnostics = s.advisories();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().message(),
            "in mirror 'M', optical index < 1"
        );
    }
    #[test]
    fn run() {
        let second = BeamParameters {
            reference: "Beam2".into(),
            position: Point3::new(0.0, 1.0, 0.0),
            ..Default::default()
        };
        let s = Simulation::new(
            "test",
            vec![beam(), GaussianBeam::from_parameters(&second).unwrap()],
            vec![dump()],
            TraceLimits::new(Some(1), 1e-3),
            SimulationConfig::default(),
        );
        let result = s.run().unwrap();
        assert_eq!(result.trees().len(), 2);
        assert_eq!(result.trees()[0].root().reference(), "Beam");
        assert!(!result.trees()[0].root().is_open());
        assert!(result.trees()[1].root().is_open());
        assert_eq!(
            result
                .diagnostics()
                .of_kind(DiagnosticKind::Absorbed)
                .count(),
            1
        );
        assert_eq!(
            result
                .diagnostics()
                .of_kind(DiagnosticKind::OpenBeam)
                .count(),
            1
        );
    }
    #[test]
    fn run_with_beam_at_critical_angle() {
        let config = SimulationConfig::default();
        let angle = 32.0_f64.to_radians();
        let internal = GaussianBeam::new_orthogonal(
            (1e-3, 1e-3),
            (0.0, 0.0),
            1064e-9,
            1.0,
            Point3::new(-1.01, 0.0, 0.0),
            Vector3::new(-angle.cos(), angle.sin(), 0.0),
        )
        .unwrap()
        .with_reference("G");
        let position = Point3::new(-1.0, 0.0, 0.0);
        let geometry = MirrorParameters {
            position,
            ..Default::default()
        }
        .build()
        .unwrap();
        let hit = geometry.is_hit(&internal, &config).unwrap();
        let (normal, _) = oriented_normal_and_curvature(
            geometry.ar(),
            &hit.point(),
            &internal.direction(),
            &config,
        );
        let sin_theta1 = (-internal.direction().dot(&normal))
            .clamp(-1.0, 1.0)
            .acos()
            .sin();
        let start = (1.0 / sin_theta1).to_bits();
        let n = (start - 8..=start + 8)
            .map(f64::from_bits)
            .find(|n| n * sin_theta1 == 1.0)
            .unwrap();
        let mirror = MirrorParameters {
            reference: "M".into(),
            position,
            refractive_index: n,
            ..Default::default()
        }
        .build()
        .unwrap();
        let s = Simulation::new(
            "critical",
            vec![internal.with_refractive_index(n).unwrap(), beam()],
            vec![mirror, dump()],
            TraceLimits::new(Some(2), 1e-3),
            config,
        );
        let result = s.run().unwrap();
        assert_eq!(result.trees().len(), 2);
        let grazing = result.trees()[0].root();
        assert_eq!(grazing.target().unwrap().optic(), "M");
        assert!(result.trees()[0].reflected(0).is_some());
        assert!(result.trees()[0].transmitted(0).is_none());
        assert!(
            result
                .diagnostics()
                .of_kind(DiagnosticKind::TotalReflection)
                .count()
                >= 1
        );
        assert_eq!(result.diagnostics().errors().count(), 0);
        assert_eq!(result.trees()[1].root().target().unwrap().optic(), "D");
    }
}
