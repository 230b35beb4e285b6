//! High-level, ergonomic library API: run surface detection from and to dataset
//! files, render depth-corrected backscatter profiles, and save figures as
//! PNG/TIFF/JPEG with optional metadata sidecars. Prefer these entrypoints over
//! the low-level processing modules when integrating pinnacle.
use std::collections::BTreeMap;
use std::path::Path;

use ndarray::Array1;
use tracing::info;

use crate::core::dataset::{ProfileDataset, SURFACE_LEVEL};
use crate::core::params::{RenderParams, SurfaceParams};
use crate::core::processing::offset_grid::{MeshStyle, OffsetGridOptions, render_offset_grid};
use crate::core::processing::surface::find_surface_level;
use crate::error::Result;
use crate::io::dataset_json::{read_dataset, write_dataset};
use crate::io::writers::{
    create_metadata_sidecar, extract_figure_metadata, write_rgb_jpeg, write_rgb_png,
    write_rgb_tiff,
};
use crate::plot::colormap::Rgb;
use crate::plot::figure::{Axes, Figure, with_current_axes};
use crate::plot::time_axis::{date2num, nice_time_axis};
use crate::types::OutputFormat;

const SURFACE_COLOR: Rgb = [220, 30, 30];

/// Read a dataset JSON, detect the surface and write the augmented dataset.
pub fn detect_surface_to_path(
    input: &Path,
    output: &Path,
    params: &SurfaceParams,
) -> Result<ProfileDataset> {
    let data = read_dataset(input)?;
    let detected = find_surface_level(&data, params)?;
    write_dataset(&detected, output)?;
    Ok(detected)
}

/// Plot backscatter against true z-level and time.
///
/// Each time sample becomes one pixel column spanning `range - depth`, so the
/// image follows the AUV's depth changes. The detected `surface_level` is drawn
/// on top when present and `overlay_surface` is set. `None` draws on the
/// current figure.
pub fn render_profile(
    ax: Option<&mut Axes>,
    data: &ProfileDataset,
    params: &RenderParams,
) -> Result<()> {
    match ax {
        Some(ax) => render_profile_on(ax, data, params),
        None => with_current_axes(|ax| render_profile_on(ax, data, params)),
    }
}

fn render_profile_on(ax: &mut Axes, data: &ProfileDataset, params: &RenderParams) -> Result<()> {
    let amp = data.profile(&params.backscatter_variable)?;
    let depth = data.time_series(&params.depth_variable)?;

    let x: Array1<f64> = data.time().iter().map(date2num).collect();
    let y_offset = depth.mapv(|d| -d);
    let options = OffsetGridOptions {
        x_pixel_scale: params.x_pixel_scale,
        vmin: params.vmin,
        vmax: params.vmax,
        style: MeshStyle {
            colormap: params.colormap,
            ..MeshStyle::default()
        },
    };

    render_offset_grid(
        Some(&mut *ax),
        x.view(),
        data.range(),
        amp.t(),
        y_offset.view(),
        &options,
    )?;

    if params.overlay_surface && data.contains(SURFACE_LEVEL) {
        let surface = data.time_series(SURFACE_LEVEL)?;
        ax.plot(&x.to_vec(), &surface.to_vec(), SURFACE_COLOR, 2)?;
    }

    nice_time_axis(Some(ax));
    Ok(())
}

/// Render a profile into a new figure sized from `params`.
pub fn render_profile_figure(data: &ProfileDataset, params: &RenderParams) -> Result<Figure> {
    let mut fig = Figure::new(params.width, params.height);
    render_profile(Some(fig.axes_mut()), data, params)?;
    Ok(fig)
}

/// Rasterize and encode a figure.
pub fn save_figure(fig: &Figure, output: &Path, format: OutputFormat) -> Result<()> {
    let img = fig.render();
    match format {
        OutputFormat::PNG => write_rgb_png(output, &img)?,
        OutputFormat::TIFF => write_rgb_tiff(output, &img)?,
        OutputFormat::JPEG => write_rgb_jpeg(output, &img)?,
    }
    info!("Saved {}x{} {:?} figure: {:?}", fig.width, fig.height, format, output);
    Ok(())
}

/// `save_figure` plus a JSON sidecar describing axes, ticks and colour scale.
pub fn save_figure_with_metadata(
    fig: &Figure,
    output: &Path,
    format: OutputFormat,
    extras: BTreeMap<String, serde_json::Value>,
) -> Result<()> {
    save_figure(fig, output, format)?;
    let metadata = extract_figure_metadata(fig, extras);
    create_metadata_sidecar(output, &metadata)?;
    Ok(())
}

/// Render a profile and save it, with a sidecar when `sidecar` is set.
pub fn render_profile_to_path(
    data: &ProfileDataset,
    output: &Path,
    format: OutputFormat,
    params: &RenderParams,
    sidecar: bool,
) -> Result<()> {
    let fig = render_profile_figure(data, params)?;
    if sidecar {
        let mut extras = BTreeMap::new();
        extras.insert(
            "backscatter_variable".to_string(),
            serde_json::Value::String(params.backscatter_variable.clone()),
        );
        extras.insert(
            "depth_variable".to_string(),
            serde_json::Value::String(params.depth_variable.clone()),
        );
        extras.insert(
            "time_start".to_string(),
            serde_json::json!(data.time().first().map(|t| t.to_rfc3339())),
        );
        extras.insert(
            "time_end".to_string(),
            serde_json::json!(data.time().last().map(|t| t.to_rfc3339())),
        );
        save_figure_with_metadata(&fig, output, format, extras)
    } else {
        save_figure(&fig, output, format)
    }
}
