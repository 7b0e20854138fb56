use criterion::{criterion_group, criterion_main, Criterion};
use gbtrace::{
    beam::{BeamParameters, GaussianBeam},
    beam_tree::build_tree,
    components::MirrorParameters,
    config::{SimulationConfig, TraceLimits},
};
use nalgebra::Point3;
use std::f64::consts::PI;

fn criterion_cavity(c: &mut Criterion) {
    let mirror = |reference: &str, x: f64, phi: f64| {
        MirrorParameters {
            reference: reference.into(),
            position: Point3::new(x, 0.0, 0.0),
            phi,
            hr_reflectance: 0.9,
            hr_transmittance: 0.1,
            ..Default::default()
        }
        .build()
        .unwrap()
    };
    let components = vec![mirror("M1", 0.0, 0.0), mirror("M2", 1.0, PI)];
    let beam = GaussianBeam::from_parameters(&BeamParameters {
        position: Point3::new(0.5, 0.0, 0.0),
        ..Default::default()
    })
    .unwrap();
    let limits = TraceLimits::new(Some(3), 1e-6);
    let config = SimulationConfig::default();
    c.bench_function("cavity", |b| {
        b.iter(|| build_tree(beam.clone(), &components, &limits, &config).unwrap())
    });
}

criterion_group!(benches, criterion_cavity);
criterion_main!(benches);
