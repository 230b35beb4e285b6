use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pinnacle::core::params::{PinnacleParams, RenderParams, SurfaceParams};
use pinnacle::types::{OutputFormat, SurfaceMode};
use pinnacle::{find_surface_level, read_dataset, render_profile_to_path, write_dataset};

use super::args::CliArgs;
use super::errors::AppError;

fn params_from_args(args: &CliArgs) -> Result<PinnacleParams, AppError> {
    if let Some(config) = &args.config {
        info!("Loading parameters from {:?}", config);
        return Ok(PinnacleParams::from_json_file(config)?);
    }

    let mode = SurfaceMode::from_name(&args.mode, args.zmax, args.rmin)?;
    Ok(PinnacleParams {
        surface: SurfaceParams {
            mode,
            depth_variable: args.depth_variable.clone(),
            backscatter_variable: args.backscatter_variable.clone(),
        },
        render: RenderParams {
            width: args.width,
            height: args.height,
            colormap: args.colormap,
            vmin: args.vmin,
            vmax: args.vmax,
            x_pixel_scale: args.x_pixel_scale,
            depth_variable: args.depth_variable.clone(),
            backscatter_variable: args.backscatter_variable.clone(),
            overlay_surface: !args.no_surface,
        },
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    if args.output.is_none() && args.plot.is_none() {
        return Err(AppError::NoOutput.into());
    }

    let params = params_from_args(&args)?;
    let plot_format = match &args.plot {
        Some(path) => Some(
            args.format
                .or_else(|| OutputFormat::from_path(path))
                .ok_or_else(|| AppError::UnknownFormat { path: path.clone() })?,
        ),
        None => None,
    };

    let data = read_dataset(&args.input).map_err(AppError::from)?;
    let detected = find_surface_level(&data, &params.surface).map_err(AppError::from)?;

    if let Some(output) = &args.output {
        write_dataset(&detected, output).map_err(AppError::from)?;
        info!("Wrote augmented dataset: {:?}", output);
    }

    if let (Some(plot), Some(format)) = (&args.plot, plot_format) {
        if params.render.depth_variable != params.surface.depth_variable {
            warn!(
                "Rendering with depth variable {} while detection used {}",
                params.render.depth_variable, params.surface.depth_variable
            );
        }
        render_profile_to_path(&detected, plot, format, &params.render, args.sidecar)
            .map_err(AppError::from)?;
        info!("Successfully rendered: {:?} -> {:?}", args.input, plot);
    }

    Ok(())
}
