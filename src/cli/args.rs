use clap::Parser;
use std::path::PathBuf;

use pinnacle::types::{Colormap, OutputFormat};

#[derive(Parser)]
#[command(name = "pinnacle", version, about = "Pinnacle ADCP surface detection and profile plots")]
pub struct CliArgs {
    /// Input dataset (JSON with time/range coordinates and variables)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the dataset augmented with surface_level/distance_to_surface here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render the depth-corrected backscatter profile to this image
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Image format; guessed from the --plot extension when omitted
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// JSON parameter file; replaces the detection and rendering flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Surface detection mode (max, max+, max++)
    #[arg(long, default_value = "max++")]
    pub mode: String,

    /// Ignore cells more than this many metres above the nominal surface (max+, max++)
    #[arg(long, default_value_t = pinnacle::types::DEFAULT_ZMAX)]
    pub zmax: f64,

    /// Ignore cells closer than this many metres to the ADCP (max++)
    #[arg(long, default_value_t = pinnacle::types::DEFAULT_RMIN)]
    pub rmin: f64,

    /// Name of the AUV depth variable
    #[arg(long, default_value = pinnacle::core::params::DEFAULT_DEPTH_VARIABLE)]
    pub depth_variable: String,

    /// Name of the backscatter variable
    #[arg(long, default_value = pinnacle::core::params::DEFAULT_BACKSCATTER_VARIABLE)]
    pub backscatter_variable: String,

    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Colormap for the backscatter image
    #[arg(long, value_enum, default_value_t = Colormap::Viridis)]
    pub colormap: Colormap,

    /// Colour scale minimum (defaults to the data minimum)
    #[arg(long)]
    pub vmin: Option<f64>,

    /// Colour scale maximum (defaults to the data maximum)
    #[arg(long)]
    pub vmax: Option<f64>,

    /// Fixed pixel column width in days instead of the sample spacing
    #[arg(long)]
    pub x_pixel_scale: Option<f64>,

    /// Do not draw the detected surface on the plot
    #[arg(long, default_value_t = false)]
    pub no_surface: bool,

    /// Write a JSON metadata sidecar next to the plot
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
