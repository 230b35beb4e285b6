use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::plot::figure::Figure;
use crate::plot::ticks::Tick;
use crate::types::Colormap;

/// Colour scale shared by the meshes of a figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub colormap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
}

/// What a rendered figure shows, written next to the raster as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureMetadata {
    pub width: u32,
    pub height: u32,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub major_ticks: Vec<Tick>,
    pub minor_ticks: Vec<Tick>,
    pub mesh_count: usize,
    pub line_count: usize,
    pub color_scale: Option<ColorScale>,
    /// Caller-provided fields (e.g. detection mode, variable names)
    pub extras: BTreeMap<String, serde_json::Value>,
}

/// Collect axis limits, ticks and colour scale from a figure
pub fn extract_figure_metadata(
    fig: &Figure,
    extras: BTreeMap<String, serde_json::Value>,
) -> FigureMetadata {
    let ax = fig.axes();
    let (major_ticks, minor_ticks) = fig.x_ticks();
    let color_scale = ax.meshes().next().map(|m| ColorScale {
        colormap: m.colormap,
        vmin: m.vmin,
        vmax: m.vmax,
    });

    FigureMetadata {
        width: fig.width,
        height: fig.height,
        xlim: ax.get_xlim(),
        ylim: ax.get_ylim(),
        major_ticks,
        minor_ticks,
        mesh_count: ax.meshes().count(),
        line_count: ax.lines().count(),
        color_scale,
        extras,
    }
}

/// Write `<output>.json` next to a rendered image and return its path
pub fn create_metadata_sidecar(output_path: &Path, metadata: &FigureMetadata) -> Result<PathBuf> {
    let sidecar_path = output_path.with_extension("json");
    let json_string = serde_json::to_string_pretty(metadata)?;
    std::fs::write(&sidecar_path, json_string)?;
    info!("Created metadata sidecar: {:?}", sidecar_path);
    Ok(sidecar_path)
}
