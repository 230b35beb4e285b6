//! Shared types and enums used across pinnacle.
//! Includes the surface detection policy (`SurfaceMode`), the colour scale
//! (`Colormap`) and the raster output format (`OutputFormat`).
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default height above the nominal surface beyond which cells are ignored (m).
pub const DEFAULT_ZMAX: f64 = 100.0;
/// Default along-beam range below which cells are ignored (m).
pub const DEFAULT_RMIN: f64 = 100.0;

/// Masking policy applied to the backscatter field before the per-time argmax.
///
/// The thresholds travel with the variant that uses them, so a plain `Max`
/// search carries none and the strictest policy carries both.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum SurfaceMode {
    /// Range cell with maximum amplitude, no masking.
    #[serde(rename = "max")]
    Max,
    /// As `Max`, but cells more than `zmax` metres above the nominal surface are zeroed.
    #[serde(rename = "max+")]
    MaxAboveSurfaceLimit { zmax: f64 },
    /// As `MaxAboveSurfaceLimit`, and cells at `range <= rmin` are zeroed as well.
    #[serde(rename = "max++")]
    MaxAboveSurfaceAndMinRange { zmax: f64, rmin: f64 },
}

impl SurfaceMode {
    /// Resolve a mode name (`max`, `max+`, `max++`) with the thresholds it may need.
    pub fn from_name(name: &str, zmax: f64, rmin: f64) -> Result<Self> {
        match name.trim() {
            "max" => Ok(SurfaceMode::Max),
            "max+" => Ok(SurfaceMode::MaxAboveSurfaceLimit { zmax }),
            "max++" => Ok(SurfaceMode::MaxAboveSurfaceAndMinRange { zmax, rmin }),
            other => Err(Error::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SurfaceMode::Max => "max",
            SurfaceMode::MaxAboveSurfaceLimit { .. } => "max+",
            SurfaceMode::MaxAboveSurfaceAndMinRange { .. } => "max++",
        }
    }
}

impl Default for SurfaceMode {
    fn default() -> Self {
        SurfaceMode::MaxAboveSurfaceAndMinRange {
            zmax: DEFAULT_ZMAX,
            rmin: DEFAULT_RMIN,
        }
    }
}

impl std::fmt::Display for SurfaceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceMode::Max => write!(f, "max"),
            SurfaceMode::MaxAboveSurfaceLimit { zmax } => write!(f, "max+(zmax={})", zmax),
            SurfaceMode::MaxAboveSurfaceAndMinRange { zmax, rmin } => {
                write!(f, "max++(zmax={}, rmin={})", zmax, rmin)
            }
        }
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Viridis,
    Gray,
    Jet,
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Viridis => write!(f, "viridis"),
            Colormap::Gray => write!(f, "gray"),
            Colormap::Jet => write!(f, "jet"),
        }
    }
}

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum OutputFormat {
    PNG,
    TIFF,
    JPEG, // Lossy, preview only
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::PNG => "png",
            OutputFormat::TIFF => "tiff",
            OutputFormat::JPEG => "jpg",
        }
    }

    /// Guess the format from a file extension; `None` when it is not recognised.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::PNG),
            "tif" | "tiff" => Some(OutputFormat::TIFF),
            "jpg" | "jpeg" => Some(OutputFormat::JPEG),
            _ => None,
        }
    }
}
