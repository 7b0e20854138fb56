#![warn(missing_docs)]
//! The tree of beams created by a source beam.
//!
//! Every interaction of a beam with a component creates up to two daughter beams (transmitted
//! and reflected), which are traced in turn. The result is a binary [`BeamTree`]. The tree is
//! stored as an arena: the nodes live in a flat vector in depth-first pre-order (transmitted
//! subtree before reflected subtree) and refer to their children by index.
use serde::Serialize;

use crate::{
    beam::GaussianBeam,
    components::{Component, Daughters, Hit},
    config::{SimulationConfig, TraceLimits},
    diagnostics::{DiagnosticKind, Diagnostics},
    error::{GbtError, GbtResult},
    surface::{intersect_plane, Face},
};

/// A node of a [`BeamTree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamNode {
    beam: GaussianBeam,
    depth: usize,
    transmitted: Option<usize>,
    reflected: Option<usize>,
}
impl BeamNode {
    const fn new(beam: GaussianBeam, depth: usize) -> Self {
        Self {
            beam,
            depth,
            transmitted: None,
            reflected: None,
        }
    }
    /// Returns the beam of this node.
    #[must_use]
    pub const fn beam(&self) -> &GaussianBeam {
        &self.beam
    }
    /// Returns the depth of this node (0 for the root).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }
    /// Returns the index of the transmitted daughter.
    #[must_use]
    pub const fn transmitted_index(&self) -> Option<usize> {
        self.transmitted
    }
    /// Returns the index of the reflected daughter.
    #[must_use]
    pub const fn reflected_index(&self) -> Option<usize> {
        self.reflected
    }
    /// Returns `true` if this node has no daughters.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.transmitted.is_none() && self.reflected.is_none()
    }
}

/// A binary tree of beams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamTree {
    nodes: Vec<BeamNode>,
}
impl BeamTree {
    /// Returns the root beam.
    #[must_use]
    pub fn root(&self) -> &GaussianBeam {
        &self.nodes[0].beam
    }
    /// Returns the node with the given index.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&BeamNode> {
        self.nodes.get(index)
    }
    /// Returns the transmitted daughter of the node with the given index.
    #[must_use]
    pub fn transmitted(&self, index: usize) -> Option<&BeamNode> {
        self.node(index)
            .and_then(|n| n.transmitted)
            .and_then(|i| self.node(i))
    }
    /// Returns the reflected daughter of the node with the given index.
    #[must_use]
    pub fn reflected(&self, index: usize) -> Option<&BeamNode> {
        self.node(index)
            .and_then(|n| n.reflected)
            .and_then(|i| self.node(i))
    }
    /// Returns the total number of beams in this tree.
    #[must_use]
    pub fn number_of_beams(&self) -> usize {
        self.nodes.len()
    }
    /// Returns the number of levels of this tree (1 for a single beam).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0)
    }
    /// Returns an iterator over all nodes in depth-first pre-order (transmitted before reflected).
    pub fn iter(&self) -> std::slice::Iter<'_, BeamNode> {
        self.nodes.iter()
    }
    /// Returns an iterator over all beams in pre-order.
    pub fn beams(&self) -> impl Iterator<Item = &GaussianBeam> {
        self.nodes.iter().map(|n| &n.beam)
    }
}
impl<'a> IntoIterator for &'a BeamTree {
    type Item = &'a BeamNode;
    type IntoIter = std::slice::Iter<'a, BeamNode>;
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// A traced [`BeamTree`] together with the diagnostics issued while building it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamTreeOutcome {
    /// the tree of beams
    pub tree: BeamTree,
    /// events issued while building the tree
    pub diagnostics: Diagnostics,
}

#[derive(Clone, Copy)]
enum Branch {
    Transmitted,
    Reflected,
}

/// A beam waiting to be traced.
struct Pending {
    beam: GaussianBeam,
    parent: Option<(usize, Branch)>,
    depth: usize,
}

/// Returns the component hit first by the beam.
///
/// Ties are resolved in favour of the component listed first.
fn nearest_hit<'a>(
    beam: &GaussianBeam,
    components: &'a [Component],
    config: &SimulationConfig,
) -> Option<(usize, &'a Component, Hit)> {
    let mut nearest: Option<(usize, &Component, Hit)> = None;
    for (index, component) in components.iter().enumerate() {
        if let Some(hit) = component.is_hit(beam, config) {
            if nearest
                .as_ref()
                .map_or(true, |(_, _, n)| hit.distance() < n.distance())
            {
                nearest = Some((index, component, hit));
            }
        }
    }
    nearest
}

/// Warns if the beam passes close to the edge of a component it does not hit.
///
/// The faces of all clipping capable components (except the one hit) are enlarged by the clip
/// factor times the beam width. A hit on the enlarged face outside the real aperture before the
/// actual impact means that the wings of the beam touch the component.
fn check_anti_clipping(
    beam: &GaussianBeam,
    components: &[Component],
    selected: Option<(usize, f64)>,
    config: &SimulationConfig,
    diagnostics: &mut Diagnostics,
) {
    let (selected_index, distance) = selected.map_or((None, f64::INFINITY), |(i, d)| (Some(i), d));
    let width = beam.max_width(if distance.is_finite() { distance } else { 0.0 });
    for (index, component) in components.iter().enumerate() {
        if Some(index) == selected_index || !component.kind().is_clipping_capable() {
            continue;
        }
        let enlarged = 2.0f64.mul_add(config.clip_factor() * width, component.diameter());
        let touches = [component.hr(), component.ar()].into_iter().any(|surface| {
            intersect_plane(
                &beam.position(),
                &beam.direction(),
                &surface.center(),
                &surface.normal(),
                enlarged,
                config,
            )
            .is_some_and(|i| {
                i.distance() < distance
                    && (i.point() - surface.center()).norm() > component.diameter() / 2.0
            })
        });
        if touches {
            diagnostics.warning(
                DiagnosticKind::AntiClipping,
                format!(
                    "anti-clipping of beam {} on {}",
                    beam.reference(),
                    component.reference()
                ),
            );
        }
    }
}

/// Warns if the beam hits a component close to its edge.
fn check_clipping(
    beam: &GaussianBeam,
    component: &Component,
    hit: &Hit,
    config: &SimulationConfig,
    diagnostics: &mut Diagnostics,
) {
    if hit.face() == Face::Side || !component.kind().is_clipping_capable() {
        return;
    }
    let width = beam.max_width(hit.distance());
    let offset = (hit.point() - component.face_center(hit.face())).norm();
    if config.clip_factor().mul_add(width, offset) > component.diameter() / 2.0 {
        diagnostics.warning(
            DiagnosticKind::Clipping,
            format!(
                "clipping of beam {} on ({}, {})",
                beam.reference(),
                component.reference(),
                hit.face()
            ),
        );
    }
}

/// Ends the branch of a beam whose daughters cannot be computed.
///
/// A [`GbtError::SingularTransform`] is recorded as an error diagnostic and the beam becomes a
/// leaf. All other errors are passed on.
fn end_on_singular_transform(
    result: GbtResult<Daughters>,
    beam: &GaussianBeam,
    component: &Component,
    face: Face,
    diagnostics: &mut Diagnostics,
) -> GbtResult<Daughters> {
    match result {
        Err(GbtError::SingularTransform(message)) => {
            diagnostics.error(
                DiagnosticKind::SingularTransform,
                format!(
                    "tracing of beam {} stopped on ({}, {face}): {message}",
                    beam.reference(),
                    component.reference()
                ),
            );
            Ok(Daughters::default())
        }
        result => result,
    }
}

/// Traces a beam through the given components and returns the tree of all daughter beams.
///
/// For every beam the nearest component is searched and the daughters of the interaction are
/// traced in turn (transmitted before reflected) until they leave the setup, get absorbed or are
/// suppressed by the given [`TraceLimits`]. Without components the tree consists of the source
/// beam only.
///
/// Termination is only guaranteed for a positive threshold and a finite order. A beam whose
/// daughters cannot be computed ends its branch with an error diagnostic, the remaining branches
/// are still traced. With `short_output`, clipping and open beam events of beams inside optics
/// are not reported.
///
/// # Errors
///
/// This function will return an error if a beam cannot be propagated to its impact point.
pub fn build_tree(
    beam: GaussianBeam,
    components: &[Component],
    limits: &TraceLimits,
    config: &SimulationConfig,
) -> GbtResult<BeamTreeOutcome> {
    let mut diagnostics = Diagnostics::default();
    if components.is_empty() {
        return Ok(BeamTreeOutcome {
            tree: BeamTree {
                nodes: vec![BeamNode::new(beam, 0)],
            },
            diagnostics,
        });
    }
    let mut nodes: Vec<BeamNode> = Vec::new();
    let mut stack = vec![Pending {
        beam,
        parent: None,
        depth: 0,
    }];
    while let Some(Pending {
        mut beam,
        parent,
        depth,
    }) = stack.pop()
    {
        let index = nodes.len();
        match parent {
            Some((p, Branch::Transmitted)) => nodes[p].transmitted = Some(index),
            Some((p, Branch::Reflected)) => nodes[p].reflected = Some(index),
            None => {}
        }
        #[allow(clippy::float_cmp)]
        let reported = !config.short_output() || beam.refractive_index() == 1.0;
        let nearest = nearest_hit(&beam, components, config);
        if config.anti_clip() && reported {
            check_anti_clipping(
                &beam,
                components,
                nearest.as_ref().map(|(i, _, hit)| (*i, hit.distance())),
                config,
                &mut diagnostics,
            );
        }
        let Some((_, component, hit)) = nearest else {
            if reported {
                diagnostics.info(
                    DiagnosticKind::OpenBeam,
                    format!("reached open beam {}", beam.reference()),
                );
            }
            nodes.push(BeamNode::new(beam, depth));
            continue;
        };
        let daughters = end_on_singular_transform(
            component.interact(&mut beam, &hit, limits, config, &mut diagnostics),
            &beam,
            component,
            hit.face(),
            &mut diagnostics,
        )?;
        if reported {
            check_clipping(&beam, component, &hit, config, &mut diagnostics);
        }
        nodes.push(BeamNode::new(beam, depth));
        if let Some(reflected) = daughters.reflected {
            stack.push(Pending {
                beam: reflected,
                parent: Some((index, Branch::Reflected)),
                depth: depth + 1,
            });
        }
        if let Some(transmitted) = daughters.transmitted {
            stack.push(Pending {
                beam: transmitted,
                parent: Some((index, Branch::Transmitted)),
                depth: depth + 1,
            });
        }
    }
    Ok(BeamTreeOutcome {
        tree: BeamTree { nodes },
        diagnostics,
    })
}
