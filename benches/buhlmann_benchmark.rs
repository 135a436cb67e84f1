use criterion::{criterion_group, criterion_main, Criterion};
use deco_core::{BuhlmannConfig, BuhlmannEngine, DecoEngine, Depth, Dive, GasBlend};

fn buhlmann_dive(low_gf: f64, high_gf: f64) -> Dive {
    let config = BuhlmannConfig::default()
        .with_gradient_factors(low_gf, high_gf)
        .unwrap();
    Dive::new(DecoEngine::Buhlmann(BuhlmannEngine::new(config)), GasBlend::air())
}

pub fn buhlmann_ceiling_benchmark(c: &mut Criterion) {
    c.bench_function("Buhlmann ceiling after a 20m/5s dip", |b| {
        b.iter(|| {
            let mut dive = buhlmann_dive(0.3, 0.7);
            dive.descend_at_rate(Depth::from_meters(20.0), 240.0).unwrap();
            dive.ceiling().unwrap();
        })
    });
}

pub fn buhlmann_deco_benchmark(c: &mut Criterion) {
    let ean50 = GasBlend::new(0.5, 0.5, 0.0).unwrap();
    c.bench_function("Buhlmann deco with an EAN50 switch", |b| {
        b.iter(|| {
            let mut dive = buhlmann_dive(0.3, 0.7);
            dive.descend(Depth::from_meters(40.0)).unwrap();
            dive.stay(20.0).unwrap();
            dive.add_deco_gas(Depth::from_meters(21.0), ean50);
            dive.decompress().unwrap();
        })
    });
}

pub fn buhlmann_full(c: &mut Criterion) {
    let ean50 = GasBlend::new(0.5, 0.5, 0.0).unwrap();
    c.bench_function("Buhlmann full reference-dive-3-shaped profile", |b| {
        b.iter(|| {
            let mut dive = buhlmann_dive(0.3, 0.7);
            dive.add_deco_gas(Depth::from_meters(21.0), ean50);
            dive.descend_at_rate(Depth::from_meters(45.0), 5.0).unwrap();
            dive.stay(6.0).unwrap();
            let stops = dive.decompress().unwrap();
            let _ = dive.pulmonary_oxygen_toxicity().otus();
            let _ = dive.cns_oxygen_toxicity().fraction();
            let _ = stops.len();
        })
    });
}

criterion_group!(
    benches,
    buhlmann_ceiling_benchmark,
    buhlmann_deco_benchmark,
    buhlmann_full,
);
criterion_main!(benches);
