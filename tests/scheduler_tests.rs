use deco_core::{DecompressionEngine, Depth, FirstStopAnchor};


use fixtures::{buhlmann_dive, gas_air, vpmb_dive};

/// Under `RoundedCeilingAtStartOfDeco`, the engine's `first_stop` anchor is pinned to a
/// multiple of 3 m even though the ceiling itself is continuous.
#[test]
fn first_stop_anchor_rounds_to_multiple_of_three() {
    let mut dive = buhlmann_dive(gas_air(), 0.3, 0.7);
    let mut settings = dive.scheduler_settings();
    settings.first_stop_anchor = FirstStopAnchor::RoundedCeilingAtStartOfDeco;
    dive.set_scheduler_settings(settings);

    dive.descend(Depth::from_meters(40.0)).unwrap();
    dive.stay(25.0).unwrap();
    dive.decompress().unwrap();

    let first_stop = dive
        .engine()
        .first_stop()
        .expect("decompression should have committed a first stop");
    assert!((first_stop.as_meters() % 3.0).abs() < 1e-9);
}

/// Every committed stop is a multiple of 3 m above `last_stop`, and at or deeper than it.
#[test]
fn stops_align_to_three_meter_grid_above_last_stop() {
    let mut dive = buhlmann_dive(gas_air(), 0.3, 0.7);
    dive.set_last_stop(Depth::from_meters(3.0));
    dive.descend(Depth::from_meters(45.0)).unwrap();
    dive.stay(25.0).unwrap();

    let stops = dive.decompress().unwrap();
    assert!(!stops.is_empty());
    for stop in &stops {
        assert!(stop.depth.as_meters() >= 3.0);
        assert!((stop.depth.as_meters() % 3.0).abs() < 1e-6);
    }
}

/// Stop depths strictly decrease across the schedule.
#[test]
fn stop_depths_strictly_decrease() {
    let mut dive = buhlmann_dive(gas_air(), 0.3, 0.7);
    dive.descend(Depth::from_meters(50.0)).unwrap();
    dive.stay(20.0).unwrap();

    let stops = dive.decompress().unwrap();
    for pair in stops.windows(2) {
        assert!(pair[0].depth.as_meters() > pair[1].depth.as_meters());
    }
}

/// VPM-B's critical-volume loop terminates well inside the iteration cap for a
/// moderate profile, and every committed stop sits on the 3 m grid.
#[test]
fn vpmb_critical_volume_loop_converges_on_grid() {
    let mut dive = vpmb_dive(gas_air(), 3);
    dive.descend(Depth::from_meters(45.0)).unwrap();
    dive.stay(20.0).unwrap();

    let stops = dive.decompress().unwrap();
    assert!(!stops.is_empty());
    assert_eq!(dive.depth(), Depth::zero());
    for stop in &stops {
        assert!(stop.depth.as_meters() >= 6.0);
        assert!((stop.depth.as_meters() % 3.0).abs() < 1e-6);
    }
}

/// Disabling the critical-volume algorithm stops after a single pass and still
/// produces a valid, surfacing schedule.
#[test]
fn vpmb_single_pass_without_cva_still_surfaces() {
    let mut dive = {
        use deco_core::{DecoEngine, Dive, VpmBConfig, VpmBEngine};
        let config = VpmBConfig::default().with_critical_volume_algorithm(false);
        Dive::new(DecoEngine::VpmB(VpmBEngine::new(config)), gas_air())
    };
    dive.descend(Depth::from_meters(45.0)).unwrap();
    dive.stay(20.0).unwrap();

    let stops = dive.decompress().unwrap();
    assert!(!stops.is_empty());
    assert_eq!(dive.depth(), Depth::zero());
}
