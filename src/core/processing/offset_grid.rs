use ndarray::{Array1, ArrayView1, ArrayView2, Axis, s};
use tracing::{debug, warn};

use crate::core::processing::edges::get_edges;
use crate::error::{Error, Result};
use crate::plot::figure::{Axes, QuadMesh, with_current_axes};
use crate::types::Colormap;

/// Appearance of the drawn pixel columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStyle {
    pub colormap: Colormap,
    pub alpha: f64,
}

impl Default for MeshStyle {
    fn default() -> Self {
        Self {
            colormap: Colormap::Viridis,
            alpha: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OffsetGridOptions {
    /// Draw every column with this fixed width (x units), centred on its cell
    pub x_pixel_scale: Option<f64>,
    /// Colour scale minimum; None means the NaN-ignoring minimum of `z`
    pub vmin: Option<f64>,
    /// Colour scale maximum; None means the NaN-ignoring maximum of `z`
    pub vmax: Option<f64>,
    pub style: MeshStyle,
}

/// Pseudocolor plot of `z` where every column `i` is shifted vertically by `y_offset[i]`.
///
/// `z` has shape `(Ny, Nx)`, `x` length `Nx`, `y` length `Ny` and `y_offset` length `Nx`.
/// Columns with a NaN offset are drawn unshifted and fully masked, so they stay blank.
/// The inputs are not modified. `None` draws on the current figure.
///
/// ```
/// use ndarray::{Array1, Array2};
/// use pinnacle::{Axes, OffsetGridOptions, render_offset_grid};
///
/// let (ny, nx) = (30, 40);
/// let x = Array1::range(0.0, nx as f64, 1.0);
/// let y = Array1::range(0.0, ny as f64, 1.0);
/// let z = Array2::from_shape_fn((ny, nx), |(j, i)| (i * j) as f64);
/// let y_offset = Array1::linspace(0.0, 50.0, nx);
///
/// let mut ax = Axes::default();
/// render_offset_grid(
///     Some(&mut ax),
///     x.view(),
///     y.view(),
///     z.view(),
///     y_offset.view(),
///     &OffsetGridOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(ax.meshes().count(), nx);
/// ```
pub fn render_offset_grid(
    ax: Option<&mut Axes>,
    x: ArrayView1<'_, f64>,
    y: ArrayView1<'_, f64>,
    z: ArrayView2<'_, f64>,
    y_offset: ArrayView1<'_, f64>,
    options: &OffsetGridOptions,
) -> Result<()> {
    match ax {
        Some(ax) => draw_offset_grid(ax, x, y, z, y_offset, options),
        None => with_current_axes(|ax| draw_offset_grid(ax, x, y, z, y_offset, options)),
    }
}

fn draw_offset_grid(
    ax: &mut Axes,
    x: ArrayView1<'_, f64>,
    y: ArrayView1<'_, f64>,
    z: ArrayView2<'_, f64>,
    y_offset: ArrayView1<'_, f64>,
    options: &OffsetGridOptions,
) -> Result<()> {
    let (ny, nx) = z.dim();

    if ny != y.len() {
        return Err(Error::shape_mismatch("y", "first dimension of z", ny, y.len()));
    }
    if nx != x.len() {
        return Err(Error::shape_mismatch("x", "second dimension of z", nx, x.len()));
    }
    if y_offset.len() != nx {
        return Err(Error::shape_mismatch(
            "y_offset",
            "second dimension of z",
            nx,
            y_offset.len(),
        ));
    }
    if let Some(scale) = options.x_pixel_scale {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::InvalidArgument {
                arg: "x_pixel_scale",
                value: scale.to_string(),
            });
        }
    }

    // Colour limits come from the data before NaN-offset columns are masked
    let (vmin, vmax) = color_limits(z, options.vmin, options.vmax);

    let x_edges = get_edges(x)?;
    let y_edges = get_edges(y)?;

    let mut masked_columns = 0usize;
    for i in 0..nx {
        let (offset, values) = if y_offset[i].is_nan() {
            masked_columns += 1;
            (0.0, Array1::from_elem(ny, f64::NAN).insert_axis(Axis(1)))
        } else {
            (y_offset[i], z.slice(s![.., i..i + 1]).to_owned())
        };

        let column_edges = match options.x_pixel_scale {
            None => x_edges.slice(s![i..i + 2]).to_owned(),
            Some(scale) => {
                let x_center = (x_edges[i] + x_edges[i + 1]) / 2.0;
                Array1::from(vec![x_center - 0.5 * scale, x_center + 0.5 * scale])
            }
        };

        ax.pcolormesh(QuadMesh {
            x_edges: column_edges,
            y_edges: &y_edges + offset,
            values,
            vmin,
            vmax,
            colormap: options.style.colormap,
            alpha: options.style.alpha,
        })?;
    }

    ax.set_xlim(x_edges[0], x_edges[nx]);

    debug!(
        "Offset grid {}x{} drawn with vmin={} vmax={} ({} masked columns)",
        ny, nx, vmin, vmax, masked_columns
    );
    Ok(())
}

fn color_limits(z: ArrayView2<'_, f64>, vmin: Option<f64>, vmax: Option<f64>) -> (f64, f64) {
    let (data_min, data_max) = z
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let vmin = vmin.unwrap_or(data_min);
    let vmax = vmax.unwrap_or(data_max);
    if vmin.is_finite() && vmax.is_finite() {
        (vmin, vmax)
    } else {
        warn!("No finite colour limits in grid data; falling back to [0, 1]");
        (
            if vmin.is_finite() { vmin } else { 0.0 },
            if vmax.is_finite() { vmax } else { 1.0 },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn color_limits_ignore_nan() {
        let z = array![[1.0, f64::NAN], [-2.0, 4.0]];
        assert_eq!(color_limits(z.view(), None, None), (-2.0, 4.0));
        assert_eq!(color_limits(z.view(), Some(0.0), None), (0.0, 4.0));
    }

    #[test]
    fn color_limits_fall_back_for_missing_data() {
        let z = array![[f64::NAN]];
        assert_eq!(color_limits(z.view(), None, None), (0.0, 1.0));
        assert_eq!(color_limits(z.view(), Some(5.0), Some(9.0)), (5.0, 9.0));
    }
}
