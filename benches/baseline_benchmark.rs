// Baseline Benchmark Suite for Performance Comparison
//
// Run with: cargo bench --bench baseline_benchmark
// Save baseline: cargo bench --bench baseline_benchmark -- --save-baseline main
// Compare: cargo bench --bench baseline_benchmark -- --baseline main

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deco_core::{BuhlmannConfig, BuhlmannEngine, DecoEngine, Depth, Dive, GasBlend, VpmBConfig, VpmBEngine};

fn buhlmann_dive() -> Dive {
    Dive::new(
        DecoEngine::Buhlmann(BuhlmannEngine::new(BuhlmannConfig::default())),
        GasBlend::air(),
    )
}

fn vpmb_dive() -> Dive {
    Dive::new(DecoEngine::VpmB(VpmBEngine::new(VpmBConfig::default())), GasBlend::air())
}

/// Benchmark ceiling calculation at various depths after a short bottom segment.
pub fn ceiling_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ceiling Calculations");

    for depth in [10.0, 20.0, 30.0, 40.0] {
        group.bench_with_input(BenchmarkId::new("ceiling at depth", format!("{depth}m")), &depth, |b, &d| {
            b.iter(|| {
                let mut dive = buhlmann_dive();
                dive.descend(Depth::from_meters(d)).unwrap();
                dive.stay(5.0).unwrap();
                black_box(dive.ceiling().unwrap());
            })
        });
    }

    group.finish();
}

/// Benchmark simple single-gas decompression (shallow, minimal deco).
pub fn simple_deco(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple Deco");

    group.bench_function("40m/20min air, no deco gas", |b| {
        b.iter(|| {
            let mut dive = buhlmann_dive();
            dive.descend(Depth::from_meters(40.0)).unwrap();
            dive.stay(20.0).unwrap();
            black_box(dive.decompress().unwrap());
        })
    });

    group.finish();
}

/// Benchmark multi-gas decompression with a scheduled EAN50 switch.
pub fn gas_switch_deco(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gas Switch Deco");
    let ean50 = GasBlend::new(0.5, 0.5, 0.0).unwrap();

    group.bench_function("40m/20min air with EAN50 at 21m", |b| {
        b.iter(|| {
            let mut dive = buhlmann_dive();
            dive.add_deco_gas(Depth::from_meters(21.0), ean50);
            dive.descend(Depth::from_meters(40.0)).unwrap();
            dive.stay(20.0).unwrap();
            black_box(dive.decompress().unwrap());
        })
    });

    group.finish();
}

/// Benchmark trimix decompression (deep, long bottom time, multi-gas).
pub fn complex_deco(c: &mut Criterion) {
    let mut group = c.benchmark_group("Complex Deco");
    let trimix = GasBlend::new(0.18, 0.37, 0.45).unwrap();
    let ean50 = GasBlend::new(0.5, 0.5, 0.0).unwrap();
    let oxygen = GasBlend::new(1.0, 0.0, 0.0).unwrap();

    group.bench_function("70m/25min trimix multi-gas", |b| {
        b.iter(|| {
            let mut dive = Dive::new(
                DecoEngine::Buhlmann(BuhlmannEngine::new(BuhlmannConfig::default())),
                trimix,
            );
            dive.add_deco_gas(Depth::from_meters(21.0), ean50);
            dive.add_deco_gas(Depth::from_meters(6.0), oxygen);
            dive.descend(Depth::from_meters(70.0)).unwrap();
            dive.stay(25.0).unwrap();
            black_box(dive.decompress().unwrap());
        })
    });

    group.finish();
}

/// Benchmark VPM-B's critical-volume iteration against the same profile.
pub fn vpmb_critical_volume_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("VPM-B Critical Volume Loop");

    group.bench_function("45m/25min air", |b| {
        b.iter(|| {
            let mut dive = vpmb_dive();
            dive.descend(Depth::from_meters(45.0)).unwrap();
            dive.stay(25.0).unwrap();
            black_box(dive.decompress().unwrap());
        })
    });

    group.finish();
}

/// Benchmark travel/ascent step application in isolation.
pub fn travel_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Travel Calculations");

    group.bench_function("ascent 40m to surface @ 10m/min", |b| {
        b.iter(|| {
            let mut dive = buhlmann_dive();
            dive.descend(Depth::from_meters(40.0)).unwrap();
            dive.stay(10.0).unwrap();
            black_box(dive.ascend(Depth::zero()).unwrap());
        });
    });

    group.finish();
}

/// Benchmark the auxiliary oxygen-toxicity and consumption trackers riding along on
/// every step of a moderately deep dive.
pub fn auxiliary_model_tracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("Auxiliary Models");

    group.bench_function("OTU/CNS/consumption over a 30m/20min dive", |b| {
        b.iter(|| {
            let mut dive = buhlmann_dive();
            dive.descend(Depth::from_meters(30.0)).unwrap();
            dive.stay(20.0).unwrap();
            black_box(dive.pulmonary_oxygen_toxicity().otus());
            black_box(dive.cns_oxygen_toxicity().fraction());
            black_box(dive.consumption().consumption(&GasBlend::air()));
        });
    });

    group.finish();
}

/// Benchmark `Dive` cloning, the cheap substitute for the teacher's model-forking
/// probes -- this crate's scheduler instead mutates and undoes the one live `Dive`.
pub fn dive_cloning(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dive Cloning");

    let mut dive = buhlmann_dive();
    dive.descend(Depth::from_meters(40.0)).unwrap();
    dive.stay(20.0).unwrap();

    group.bench_function("clone a 16-compartment dive mid-profile", |b| {
        b.iter(|| {
            let _cloned = black_box(dive.clone());
        });
    });

    group.finish();
}

criterion_group!(
    baseline_benches,
    ceiling_calculations,
    simple_deco,
    gas_switch_deco,
    complex_deco,
    vpmb_critical_volume_loop,
    travel_calculations,
    auxiliary_model_tracking,
    dive_cloning,
);

criterion_main!(baseline_benches);
