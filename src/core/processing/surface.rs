use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};
use tracing::{debug, info};

use crate::core::dataset::{BIN_DEPTH, DISTANCE_TO_SURFACE, ProfileDataset, SURFACE_LEVEL, Variable};
use crate::core::params::SurfaceParams;
use crate::error::Result;
use crate::types::SurfaceMode;

/// Return a copy of `data` with `bin_depth = depth(time) - range`, the depth of
/// every range cell assuming a vertical beam.
pub fn add_bin_depth(data: &ProfileDataset, depth_variable: &str) -> Result<ProfileDataset> {
    let depth = data.time_series(depth_variable)?;
    let bin_depth = compute_bin_depth(depth, data.range());
    data.assign(BIN_DEPTH, Variable::TimeRange(bin_depth))
}

fn compute_bin_depth(depth: ArrayView1<'_, f64>, range: ArrayView1<'_, f64>) -> Array2<f64> {
    let mut bin_depth = Array2::<f64>::zeros((depth.len(), range.len()));
    Zip::indexed(&mut bin_depth).for_each(|(t, r), v| {
        *v = depth[t] - range[r];
    });
    bin_depth
}

/// Detect the surface from backscatter levels.
///
/// For each time sample the range cell with maximum (masked) amplitude is taken as
/// the surface. Returns a new dataset with:
/// - `distance_to_surface`: range of that cell from the ADCP, rounded
/// - `surface_level`: z-coordinate of the surface from the AUV depth, rounded
/// - `bin_depth`: added when the input does not carry it yet
///
/// Time samples whose amplitudes are all missing get `NaN` in both outputs.
pub fn find_surface_level(data: &ProfileDataset, params: &SurfaceParams) -> Result<ProfileDataset> {
    let data = if data.contains(BIN_DEPTH) {
        data.clone()
    } else {
        add_bin_depth(data, &params.depth_variable)?
    };

    let depth = data.time_series(&params.depth_variable)?;
    let bin_depth = data.profile(BIN_DEPTH)?;
    let range = data.range();
    let (amp, dropped) = masked_amplitude(
        data.profile(&params.backscatter_variable)?,
        bin_depth,
        range,
        params.mode,
    );

    let ntime = data.ntime();
    let mut distance_to_surface = Array1::<f64>::from_elem(ntime, f64::NAN);
    let mut surface_level = Array1::<f64>::from_elem(ntime, f64::NAN);
    let mut detected = 0usize;

    for (t, row) in amp.axis_iter(Axis(0)).enumerate() {
        if dropped[t] {
            continue;
        }
        let Some(idx) = nan_argmax(row) else {
            continue;
        };
        distance_to_surface[t] = range[idx].round_ties_even();
        surface_level[t] = (-depth[t] + range[idx]).round_ties_even();
        detected += 1;
    }

    debug!(
        "Surface search over {} time samples x {} range cells",
        ntime,
        data.nrange()
    );
    info!(
        "Surface detection ({}): {} of {} time samples resolved",
        params.mode, detected, ntime
    );

    data.assign(SURFACE_LEVEL, Variable::Time(surface_level))?
        .with_variable(DISTANCE_TO_SURFACE, Variable::Time(distance_to_surface))
}

/// Apply the mode's masking policy. Excluded cells are set to 0 rather than removed,
/// so they can still win the argmax when every candidate of a sample is excluded.
///
/// Also returns which time samples are dropped for having no valid amplitude.
/// The check runs after the `zmax` mask but before the `rmin` mask, so a
/// dropout sample in `max++` stays missing instead of resolving to a near cell.
fn masked_amplitude(
    amp: ArrayView2<'_, f64>,
    bin_depth: ArrayView2<'_, f64>,
    range: ArrayView1<'_, f64>,
    mode: SurfaceMode,
) -> (Array2<f64>, Vec<bool>) {
    let mut masked = amp.to_owned();
    match mode {
        SurfaceMode::Max => {}
        SurfaceMode::MaxAboveSurfaceLimit { zmax } => {
            mask_above_surface(&mut masked, bin_depth, zmax);
        }
        SurfaceMode::MaxAboveSurfaceAndMinRange { zmax, rmin } => {
            mask_above_surface(&mut masked, bin_depth, zmax);
            let dropped = all_missing_rows(&masked);
            for mut row in masked.axis_iter_mut(Axis(0)) {
                Zip::from(&mut row).and(&range).for_each(|v, &r| {
                    if !(r > rmin) {
                        *v = 0.0;
                    }
                });
            }
            return (masked, dropped);
        }
    }
    let dropped = all_missing_rows(&masked);
    (masked, dropped)
}

fn all_missing_rows(amp: &Array2<f64>) -> Vec<bool> {
    amp.axis_iter(Axis(0))
        .map(|row| row.iter().all(|v| v.is_nan()))
        .collect()
}

fn mask_above_surface(amp: &mut Array2<f64>, bin_depth: ArrayView2<'_, f64>, zmax: f64) {
    // A NaN depth fails the comparison and is masked too
    Zip::from(amp).and(&bin_depth).for_each(|v, &d| {
        if !(-d < zmax) {
            *v = 0.0;
        }
    });
}

/// Index of the largest non-NaN value; the first one wins on ties.
/// `None` when every value is NaN.
fn nan_argmax(values: ArrayView1<'_, f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
