#![warn(missing_docs)]
//! Text output of a simulation run.
//!
//! The report is a plain text document listing the simulation parameters, the components and
//! every traced beam. Blocks are delimited by braces and indented by one tab per nesting level.
use chrono::Local;

use crate::{
    beam_tree::{BeamNode, BeamTree},
    simulation::{Simulation, SimulationResult},
};

/// Indents the given lines by one tab per level of open braces.
///
/// A line containing `}` closes a level before being written, a line containing `{` opens a
/// level after being written.
#[must_use]
pub fn formatter<S: AsRef<str>>(lines: &[S]) -> String {
    let mut level = 0usize;
    let mut text = String::new();
    for line in lines {
        let line = line.as_ref();
        if line.contains('}') {
            level = level.saturating_sub(1);
        }
        text.push_str(&"\t".repeat(level));
        text.push_str(line);
        text.push('\n');
        if line.contains('{') {
            level += 1;
        }
    }
    text
}

fn beam_entry(node: &BeamNode) -> Vec<String> {
    let beam = node.beam();
    let origin = beam
        .origin()
        .map_or_else(|| "(input)".to_owned(), ToString::to_string);
    let first = match beam.target() {
        None => format!("{origin} [open] {} {{", beam.reference()),
        Some(target) => {
            let end = if node.is_leaf() { " [end]" } else { "" };
            format!(
                "{origin} {}m{end} {target} {} {{",
                beam.length(),
                beam.reference()
            )
        }
    };
    let (wp1, wp2) = beam.waist_position();
    let (ws1, ws2) = beam.waist_size();
    let (theta, phi) = beam.direction_angles();
    vec![
        first,
        format!("Waist Pos: ({wp1}, {wp2})m"),
        format!("Waist Size: ({}, {})mm", ws1 * 1e3, ws2 * 1e3),
        format!(
            "Direction: ({}, {})deg",
            theta.to_degrees(),
            phi.to_degrees()
        ),
        "}".to_owned(),
    ]
}

/// Returns the listing of all beams of the given tree (in pre-order).
///
/// With `short_output` beams propagating inside optics (refractive index other than 1) are
/// omitted.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn beam_listing(tree: &BeamTree, short_output: bool) -> Vec<String> {
    let mut lines = vec![format!("Tree: Root beam = {} {{", tree.root().reference())];
    for node in tree {
        if short_output && node.beam().refractive_index() != 1.0 {
            continue;
        }
        lines.extend(beam_entry(node));
    }
    lines.push("}".to_owned());
    lines
}

/// Returns the text report of a finished [`Simulation`].
#[must_use]
pub fn simulation_report(simulation: &Simulation, result: &SimulationResult) -> String {
    let order = simulation
        .order()
        .map_or_else(|| "inf".to_owned(), |o| o.to_string());
    let mut lines = vec![
        "########gbtrace output file for simulation:########".to_owned(),
        format!("\t\t\t{}\n", simulation.name()),
        format!("{0}META DATA{0}", "#".repeat(10)),
        format!("Generated at: {}", Local::now().format("%c")),
        format!("Simulation Order: {order}"),
        format!("Simulation Threshold: {}mW", simulation.threshold() * 1e3),
        format!("Number of Components: {}", simulation.components().len()),
        format!("Number of Optics: {}\n", simulation.number_of_optics()),
        format!("{0}SIMULATION DATA{0}", "#".repeat(10)),
        format!("Simulation: {} {{", simulation.name()),
        "Components: {".to_owned(),
    ];
    for component in simulation.components() {
        let c = component.hr().center();
        lines.push(format!(
            "{} ({}) ({}, {}, {})",
            component.kind(),
            component.reference(),
            c.x,
            c.y,
            c.z
        ));
    }
    lines.push("}".to_owned());
    lines.push("BeamTrees: {".to_owned());
    for tree in result.trees() {
        lines.push("Tree: {".to_owned());
        lines.push(format!("Root beam: {}", tree.root().reference()));
        lines.push(format!("Number of beams: {}", tree.number_of_beams()));
        lines.push("}".to_owned());
    }
    lines.push("}".to_owned());
    lines.push("}\n".to_owned());
    lines.push(format!("{0}BEAM LISTING{0}", "#".repeat(10)));
    for tree in result.trees() {
        lines.extend(beam_listing(tree, simulation.config().short_output()));
    }
    formatter(&lines)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        beam::{BeamParameters, GaussianBeam},
        components::{BeamDumpParameters, MirrorParameters},
        config::{SimulationConfig, TraceLimits},
    };
    use nalgebra::Point3;
    use std::f64::consts::PI;

    fn simulation(config: SimulationConfig) -> Simulation {
        let mirror = MirrorParameters {
            reference: "M".into(),
            position: Point3::new(1.0, 0.0, 0.0),
            phi: PI,
            ..Default::default()
        }
        .build()
        .unwrap();
        Simulation::new(
            "report",
            vec![GaussianBeam::from_parameters(&BeamParameters::default()).unwrap()],
            vec![mirror],
            TraceLimits::new(Some(1), 1e-3),
            config,
        )
    }
    #[test]
    fn formatter_indent() {
        let text = formatter(&["a {", "b {", "c", "}", "}", "d"]);
        assert_eq!(text, "a {\n\tb {\n\t\tc\n\t}\n}\nd\n");
        assert_eq!(formatter(&["}", "a"]), "}\na\n");
    }
    #[test]
    fn dump_listing() {
        let dump = BeamDumpParameters {
            reference: "D".into(),
            position: Point3::new(1.0, 0.0, 0.0),
            phi: PI,
            ..Default::default()
        }
        .build()
        .unwrap();
        let s = Simulation::new(
            "dump",
            vec![GaussianBeam::from_parameters(&BeamParameters::default()).unwrap()],
            vec![dump],
            TraceLimits::new(Some(1), 1e-3),
            SimulationConfig::default(),
        );
        let result = s.run().unwrap();
        let lines = beam_listing(&result.trees()[0], false);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Tree: Root beam = Beam {");
        assert_eq!(lines[1], "(input) 1m [end] (D, HR) Beam {");
        assert!(lines[2].starts_with("Waist Pos: ("));
        assert!(lines[3].starts_with("Waist Size: ("));
        assert!(lines[4].starts_with("Direction: ("));
        assert_eq!(lines[5], "}");
        assert_eq!(lines[6], "}");
    }
    #[test]
    fn full_listing() {
        let s = simulation(SimulationConfig::default());
        let result = s.run().unwrap();
        let lines = beam_listing(&result.trees()[0], false);
        let entries: Vec<&String> = lines.iter().filter(|l| l.ends_with(" {")).collect();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[1], "(input) 1m (M, HR) Beam {");
        assert!(entries[2].starts_with("(M, HR) 0.02"));
        assert!(entries[2].ends_with("m (M, AR) Beamt {"));
        assert_eq!(entries[3], "(M, AR) [open] Beamtt {");
        assert_eq!(entries[4], "(M, HR) [open] Beamr {");
    }
    #[test]
    fn short_listing() {
        let s = simulation(SimulationConfig::default().with_short_output(true));
        let result = s.run().unwrap();
        let lines = beam_listing(&result.trees()[0], true);
        let entries: Vec<&String> = lines.iter().filter(|l| l.ends_with(" {")).collect();
        assert_eq!(entries.len(), 4);
        assert!(!lines.iter().any(|l| l.contains("Beamt {")));
        let report = simulation_report(&s, &result);
        assert!(!report.contains("Beamt {"));
        assert!(report.contains("Beamtt {"));
    }
    #[test]
    fn report() {
        let s = simulation(SimulationConfig::default());
        let result = s.run().unwrap();
        let report = simulation_report(&s, &result);
        assert!(report.starts_with("########gbtrace output file for simulation:########\n"));
        assert!(report.contains("Simulation Order: 1\n"));
        assert!(report.contains("Simulation Threshold: 1mW\n"));
        assert!(report.contains("Number of Components: 1\n"));
        assert!(report.contains("Number of Optics: 1\n"));
        assert!(report.contains("\tComponents: {\n\t\tmirror (M) (1, 0, 0)\n\t}\n"));
        assert!(report.contains("\t\t\tRoot beam: Beam\n\t\t\tNumber of beams: 4\n"));
        assert!(report.contains("\n\t(input) 1m (M, HR) Beam {\n\t\tWaist Pos: ("));
        assert!(report.ends_with("\t}\n}\n"));
    }
}
