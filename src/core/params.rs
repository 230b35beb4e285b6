use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Colormap, SurfaceMode};

/// Variable holding the AUV depth time series in pinnacle datasets
pub const DEFAULT_DEPTH_VARIABLE: &str = "NAV_DEPTH";
/// Variable holding the backscatter amplitude profiles in pinnacle datasets
pub const DEFAULT_BACKSCATTER_VARIABLE: &str = "SerEAAcnt";

/// Surface detection parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    #[serde(flatten)]
    pub mode: SurfaceMode,
    pub depth_variable: String,
    pub backscatter_variable: String,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            mode: SurfaceMode::default(),
            depth_variable: DEFAULT_DEPTH_VARIABLE.to_string(),
            backscatter_variable: DEFAULT_BACKSCATTER_VARIABLE.to_string(),
        }
    }
}

/// Profile rendering parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    pub colormap: Colormap,
    /// Lower end of the colour scale; None means the data minimum
    pub vmin: Option<f64>,
    /// Upper end of the colour scale; None means the data maximum
    pub vmax: Option<f64>,
    /// Fixed column width in x units instead of the reconstructed cell width
    pub x_pixel_scale: Option<f64>,
    pub depth_variable: String,
    pub backscatter_variable: String,
    /// Draw the detected surface level on top of the profile when available
    pub overlay_surface: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            colormap: Colormap::Viridis,
            vmin: None,
            vmax: None,
            x_pixel_scale: None,
            depth_variable: DEFAULT_DEPTH_VARIABLE.to_string(),
            backscatter_variable: DEFAULT_BACKSCATTER_VARIABLE.to_string(),
            overlay_surface: true,
        }
    }
}

/// Combined parameter set loaded from a JSON config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinnacleParams {
    pub surface: SurfaceParams,
    pub render: RenderParams,
}

impl PinnacleParams {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
