use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hector_core::{BeamConfig, Particle, PlaneVector, StateVector};

fn interpolation_bench(c: &mut Criterion) {
    let config = BeamConfig::default();
    let initial = StateVector::blank(&config);
    let mut particle = Particle::from_state(initial, 0.0);
    for step in 1..2_000 {
        let s = step as f64 * 0.5;
        let mut state = initial;
        state.set_position(PlaneVector::new(1e-6 * s, -5e-7 * s));
        particle.add_position(s, state).unwrap();
    }
    let probes: Vec<f64> = (0..4_000).map(|idx| idx as f64 * 0.2437).collect();

    c.bench_function("state_vector_at", |b| {
        b.iter(|| {
            for s in &probes {
                black_box(particle.state_vector_at(*s));
            }
        });
    });

    c.bench_function("momentum_at", |b| {
        b.iter(|| {
            for s in &probes {
                black_box(particle.momentum_at(*s));
            }
        });
    });
}

criterion_group!(benches, interpolation_bench);
criterion_main!(benches);
