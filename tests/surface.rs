use chrono::{DateTime, TimeZone, Utc};
use ndarray::{Array1, Array2, array};
use pinnacle::{
    BIN_DEPTH, DISTANCE_TO_SURFACE, Error, ProfileDataset, SURFACE_LEVEL, SurfaceMode,
    SurfaceParams, Variable, add_bin_depth, find_surface_level,
};

fn times(n: usize) -> Vec<DateTime<Utc>> {
    (0..n)
        .map(|i| Utc.timestamp_opt(1_622_505_600 + 60 * i as i64, 0).unwrap())
        .collect()
}

fn make_dataset(range: Array1<f64>, depth: Array1<f64>, amp: Array2<f64>) -> ProfileDataset {
    ProfileDataset::new(times(depth.len()), range)
        .with_variable("NAV_DEPTH", Variable::Time(depth))
        .unwrap()
        .with_variable("SerEAAcnt", Variable::TimeRange(amp))
        .unwrap()
}

fn params(mode: SurfaceMode) -> SurfaceParams {
    SurfaceParams {
        mode,
        ..SurfaceParams::default()
    }
}

fn outputs(data: &ProfileDataset) -> (Vec<f64>, Vec<f64>) {
    (
        data.time_series(SURFACE_LEVEL).unwrap().to_vec(),
        data.time_series(DISTANCE_TO_SURFACE).unwrap().to_vec(),
    )
}

/// Deterministic pseudo-random amplitudes in [0, 100).
fn scrambled(ntime: usize, nrange: usize) -> Array2<f64> {
    Array2::from_shape_fn((ntime, nrange), |(t, r)| ((t * 37 + r * 91 + t * r * 13) % 100) as f64)
}

#[test]
fn max_picks_the_strongest_cell() {
    let data = make_dataset(
        array![0.0, 50.0, 100.0, 150.0],
        array![20.0],
        array![[1.0, 2.0, 10.0, 3.0]],
    );
    let out = find_surface_level(&data, &params(SurfaceMode::Max)).unwrap();

    assert_eq!(
        out.profile(BIN_DEPTH).unwrap().row(0).to_vec(),
        vec![20.0, -30.0, -80.0, -130.0]
    );
    let (surface, distance) = outputs(&out);
    assert_eq!(distance, vec![100.0]);
    assert_eq!(surface, vec![80.0]);
}

#[test]
fn max_plus_ignores_cells_far_above_the_surface() {
    // -bin_depth = [-20, 30, 80, 130]; zmax = 50 rules out the two far cells
    let data = make_dataset(
        array![0.0, 50.0, 100.0, 150.0],
        array![20.0],
        array![[1.0, 2.0, 10.0, 3.0]],
    );
    let out = find_surface_level(
        &data,
        &params(SurfaceMode::MaxAboveSurfaceLimit { zmax: 50.0 }),
    )
    .unwrap();
    let (surface, distance) = outputs(&out);
    assert_eq!(distance, vec![50.0]);
    assert_eq!(surface, vec![30.0]);
}

#[test]
fn max_plus_plus_never_selects_near_cells() {
    let range = Array1::range(0.0, 300.0, 10.0);
    let depth = Array1::linspace(150.0, 250.0, 12);
    let data = make_dataset(range.clone(), depth, scrambled(12, range.len()));
    let rmin = 60.0;
    let out = find_surface_level(
        &data,
        &params(SurfaceMode::MaxAboveSurfaceAndMinRange { zmax: 1000.0, rmin }),
    )
    .unwrap();
    let (_, distance) = outputs(&out);
    for d in distance {
        assert!(d > rmin, "selected range {} within rmin", d);
    }
}

#[test]
fn fully_masked_sample_falls_back_to_first_cell() {
    let data = make_dataset(
        array![5.0, 50.0, 100.0],
        array![20.0],
        array![[1.0, 7.0, 3.0]],
    );
    let out = find_surface_level(
        &data,
        &params(SurfaceMode::MaxAboveSurfaceAndMinRange {
            zmax: 100.0,
            rmin: 1000.0,
        }),
    )
    .unwrap();
    let (surface, distance) = outputs(&out);
    assert_eq!(distance, vec![5.0]);
    assert_eq!(surface, vec![-15.0]);
}

#[test]
fn precomputed_bin_depth_gives_same_result() {
    let range = Array1::range(0.0, 200.0, 8.0);
    let depth = Array1::linspace(30.0, 90.0, 9);
    let data = make_dataset(range.clone(), depth, scrambled(9, range.len()));

    for mode in [
        SurfaceMode::Max,
        SurfaceMode::MaxAboveSurfaceLimit { zmax: 10.0 },
        SurfaceMode::MaxAboveSurfaceAndMinRange {
            zmax: 10.0,
            rmin: 40.0,
        },
    ] {
        let direct = find_surface_level(&data, &params(mode)).unwrap();
        let with_depth = add_bin_depth(&data, "NAV_DEPTH").unwrap();
        let staged = find_surface_level(&with_depth, &params(mode)).unwrap();
        assert_eq!(outputs(&direct), outputs(&staged), "mode {}", mode);
    }
}

#[test]
fn existing_bin_depth_is_not_recomputed() {
    let data = make_dataset(array![0.0, 50.0], array![20.0], array![[1.0, 9.0]])
        .with_variable(BIN_DEPTH, Variable::TimeRange(array![[-500.0, -500.0]]))
        .unwrap();
    let out = find_surface_level(
        &data,
        &params(SurfaceMode::MaxAboveSurfaceLimit { zmax: 100.0 }),
    )
    .unwrap();
    // Every cell sits 500 m above the surface, so both are masked and index 0 wins
    let (_, distance) = outputs(&out);
    assert_eq!(distance, vec![0.0]);
    assert_eq!(out.profile(BIN_DEPTH).unwrap()[(0, 1)], -500.0);
}

#[test]
fn equal_maxima_resolve_to_lowest_range() {
    let data = make_dataset(array![10.0, 20.0, 30.0], array![0.0], array![[4.0, 9.0, 9.0]]);
    let (_, distance) = outputs(&find_surface_level(&data, &params(SurfaceMode::Max)).unwrap());
    assert_eq!(distance, vec![20.0]);
}

#[test]
fn missing_samples_are_skipped_or_dropped() {
    let nan = f64::NAN;
    let data = make_dataset(
        array![0.0, 50.0, 100.0],
        array![10.0, 10.0],
        array![[nan, 4.0, nan], [nan, nan, nan]],
    );
    let (surface, distance) =
        outputs(&find_surface_level(&data, &params(SurfaceMode::Max)).unwrap());
    assert_eq!(distance[0], 50.0);
    assert_eq!(surface[0], 40.0);
    assert!(distance[1].is_nan());
    assert!(surface[1].is_nan());
}

#[test]
fn dropout_sample_stays_missing_under_min_range() {
    let nan = f64::NAN;
    let data = make_dataset(
        array![10.0, 50.0, 150.0],
        array![200.0, 200.0],
        array![[1.0, 2.0, 9.0], [nan, nan, nan]],
    );
    let out = find_surface_level(
        &data,
        &params(SurfaceMode::MaxAboveSurfaceAndMinRange {
            zmax: 100.0,
            rmin: 100.0,
        }),
    )
    .unwrap();
    let (surface, distance) = outputs(&out);
    assert_eq!(distance[0], 150.0);
    assert_eq!(surface[0], -50.0);
    assert!(distance[1].is_nan());
    assert!(surface[1].is_nan());
}

#[test]
fn dropout_sample_within_surface_limit_stays_missing() {
    // -bin_depth = [-10, 30, 80]; every cell is inside zmax, nothing is zeroed
    let nan = f64::NAN;
    let data = make_dataset(
        array![10.0, 50.0, 100.0],
        array![20.0],
        array![[nan, nan, nan]],
    );
    let out = find_surface_level(
        &data,
        &params(SurfaceMode::MaxAboveSurfaceLimit { zmax: 100.0 }),
    )
    .unwrap();
    let (surface, distance) = outputs(&out);
    assert!(distance[0].is_nan());
    assert!(surface[0].is_nan());
}

#[test]
fn dropout_sample_beyond_surface_limit_takes_the_zeroed_cell() {
    // -bin_depth = [-10, 30, 130]; the far cell is zeroed before missing samples
    // are dropped, so the sample resolves to it
    let nan = f64::NAN;
    let data = make_dataset(
        array![10.0, 50.0, 150.0],
        array![20.0],
        array![[nan, nan, nan]],
    );
    let out = find_surface_level(
        &data,
        &params(SurfaceMode::MaxAboveSurfaceLimit { zmax: 100.0 }),
    )
    .unwrap();
    let (surface, distance) = outputs(&out);
    assert_eq!(distance, vec![150.0]);
    assert_eq!(surface, vec![130.0]);

    // With every cell beyond zmax the first one wins
    let out = find_surface_level(
        &data,
        &params(SurfaceMode::MaxAboveSurfaceLimit { zmax: -50.0 }),
    )
    .unwrap();
    let (_, distance) = outputs(&out);
    assert_eq!(distance, vec![10.0]);
}

#[test]
fn results_round_half_to_even() {
    let data = make_dataset(array![0.0, 2.5], array![0.0], array![[0.0, 1.0]]);
    let (surface, distance) =
        outputs(&find_surface_level(&data, &params(SurfaceMode::Max)).unwrap());
    assert_eq!(distance, vec![2.0]);
    assert_eq!(surface, vec![2.0]);
}

#[test]
fn input_dataset_is_left_untouched() {
    let data = make_dataset(array![0.0, 50.0], array![20.0], array![[1.0, 2.0]]);
    let before = data.clone();
    let out = find_surface_level(&data, &SurfaceParams::default()).unwrap();
    assert_eq!(data, before);
    assert!(!data.contains(BIN_DEPTH));
    assert!(out.contains(BIN_DEPTH) && out.contains(SURFACE_LEVEL) && out.contains(DISTANCE_TO_SURFACE));
}

#[test]
fn missing_variables_are_lookup_errors() {
    let data = make_dataset(array![0.0, 50.0], array![20.0], array![[1.0, 2.0]]);

    let mut p = SurfaceParams::default();
    p.depth_variable = "DEPTH".to_string();
    assert!(matches!(
        find_surface_level(&data, &p),
        Err(Error::Lookup { name }) if name == "DEPTH"
    ));

    let mut p = SurfaceParams::default();
    p.backscatter_variable = "AMP".to_string();
    assert!(matches!(
        find_surface_level(&data, &p),
        Err(Error::Lookup { name }) if name == "AMP"
    ));
}

#[test]
fn unknown_mode_name_is_rejected() {
    assert!(matches!(
        SurfaceMode::from_name("max+++", 100.0, 100.0),
        Err(Error::InvalidMode { .. })
    ));
}
