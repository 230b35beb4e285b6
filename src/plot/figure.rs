//! Raster drawing surface: a `Figure` owns one `Axes` which records artists
//! (pseudocolor meshes and polylines) in data coordinates, and rasterizes them
//! into an RGB image on demand.
//!
//! A process-wide current figure backs the drawing functions that take an
//! optional `&mut Axes`; it is (re)initialised with [`new_figure`] and handed
//! over with [`take_current_figure`].
use std::sync::{Mutex, PoisonError};

use image::RgbImage;
use ndarray::{Array1, Array2, ArrayView1};
use once_cell::sync::Lazy;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use crate::error::{Error, Result};
use crate::plot::colormap::{ColorLut, Rgb};
use crate::plot::ticks::{AxisTicks, Tick};
use crate::types::Colormap;

const BLACK: Rgb = [0, 0, 0];
const WHITE: Rgb = [255, 255, 255];
const MAJOR_TICK_LEN: u32 = 6;
const MINOR_TICK_LEN: u32 = 3;

/// Cell-edge pseudocolor mesh: `values` has shape `(ny, nx)` with
/// `y_edges.len() == ny + 1` and `x_edges.len() == nx + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMesh {
    pub x_edges: Array1<f64>,
    pub y_edges: Array1<f64>,
    pub values: Array2<f64>,
    pub vmin: f64,
    pub vmax: f64,
    pub colormap: Colormap,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Rgb,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    Mesh(QuadMesh),
    Line(Line),
}

impl Artist {
    fn x_data(&self) -> ArrayView1<'_, f64> {
        match self {
            Artist::Mesh(m) => m.x_edges.view(),
            Artist::Line(l) => ArrayView1::from(l.x.as_slice()),
        }
    }

    fn y_data(&self) -> ArrayView1<'_, f64> {
        match self {
            Artist::Mesh(m) => m.y_edges.view(),
            Artist::Line(l) => ArrayView1::from(l.y.as_slice()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axes {
    artists: Vec<Artist>,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    xaxis: AxisTicks,
}

impl Axes {
    pub fn pcolormesh(&mut self, mesh: QuadMesh) -> Result<()> {
        let (ny, nx) = mesh.values.dim();
        if mesh.x_edges.len() != nx + 1 {
            return Err(Error::shape_mismatch(
                "x_edges",
                "second dimension of values plus one",
                nx + 1,
                mesh.x_edges.len(),
            ));
        }
        if mesh.y_edges.len() != ny + 1 {
            return Err(Error::shape_mismatch(
                "y_edges",
                "first dimension of values plus one",
                ny + 1,
                mesh.y_edges.len(),
            ));
        }
        self.artists.push(Artist::Mesh(mesh));
        Ok(())
    }

    pub fn plot(&mut self, x: &[f64], y: &[f64], color: Rgb, width: u32) -> Result<()> {
        if x.len() != y.len() {
            return Err(Error::shape_mismatch("y", "x", x.len(), y.len()));
        }
        self.artists.push(Artist::Line(Line {
            x: x.to_vec(),
            y: y.to_vec(),
            color,
            width: width.max(1),
        }));
        Ok(())
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn meshes(&self) -> impl Iterator<Item = &QuadMesh> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Mesh(m) => Some(m),
            Artist::Line(_) => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Line(l) => Some(l),
            Artist::Mesh(_) => None,
        })
    }

    pub fn set_xlim(&mut self, left: f64, right: f64) {
        self.xlim = Some((left, right));
    }

    pub fn set_ylim(&mut self, bottom: f64, top: f64) {
        self.ylim = Some((bottom, top));
    }

    /// Explicit x limits, or the extent of the drawn artists.
    pub fn get_xlim(&self) -> Option<(f64, f64)> {
        self.xlim
            .or_else(|| extent(self.artists.iter().flat_map(|a| a.x_data().into_iter().copied())))
    }

    /// Explicit y limits, or the extent of the drawn artists.
    pub fn get_ylim(&self) -> Option<(f64, f64)> {
        self.ylim
            .or_else(|| extent(self.artists.iter().flat_map(|a| a.y_data().into_iter().copied())))
    }

    pub fn xaxis(&self) -> &AxisTicks {
        &self.xaxis
    }

    pub fn xaxis_mut(&mut self) -> &mut AxisTicks {
        &mut self.xaxis
    }

    pub fn clear(&mut self) {
        *self = Axes::default();
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Pixel rectangle the axes occupy inside the figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    axes: Axes,
}

impl Default for Figure {
    fn default() -> Self {
        Figure::new(800, 600)
    }
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            background: WHITE,
            axes: Axes::default(),
        }
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut Axes {
        &mut self.axes
    }

    /// Axes rectangle, leaving room for tick marks and labels on the left and bottom.
    pub fn plot_area(&self) -> PlotArea {
        let left = (self.width / 12).min(80);
        let right = (self.width / 40).min(20);
        let top = (self.height / 30).min(20);
        let bottom = (self.height / 8).min(60);
        PlotArea {
            left,
            top,
            width: self.width.saturating_sub(left + right).max(1),
            height: self.height.saturating_sub(top + bottom).max(1),
        }
    }

    /// Visible x-axis ticks as `(major, minor)`.
    pub fn x_ticks(&self) -> (Vec<Tick>, Vec<Tick>) {
        match self.axes.get_xlim() {
            Some((lo, hi)) => (
                self.axes.xaxis.major_ticks(lo, hi),
                self.axes.xaxis.minor_ticks(lo, hi),
            ),
            None => (Vec::new(), Vec::new()),
        }
    }

    /// Rasterize the figure: artists in drawing order, then the frame and x ticks.
    pub fn render(&self) -> RgbImage {
        let Some(mut pixmap) = Pixmap::new(self.width, self.height) else {
            return RgbImage::from_pixel(self.width, self.height, image::Rgb(self.background));
        };
        let [r, g, b] = self.background;
        pixmap.fill(Color::from_rgba8(r, g, b, 255));
        let area = self.plot_area();

        if let (Some(xlim), Some(ylim)) = (self.axes.get_xlim(), self.axes.get_ylim()) {
            let tf = AxesTransform::new(area, xlim, ylim);
            for artist in &self.axes.artists {
                match artist {
                    Artist::Mesh(mesh) => draw_mesh(&mut pixmap, &tf, mesh),
                    Artist::Line(line) => draw_line(&mut pixmap, &tf, line),
                }
            }
            let (major, minor) = self.x_ticks();
            let bottom = (area.top + area.height) as f32;
            for (ticks, len) in [(&major, MAJOR_TICK_LEN), (&minor, MINOR_TICK_LEN)] {
                for tick in ticks {
                    let px = tf.x(tick.value).floor();
                    if px >= area.left as f64 && px < (area.left + area.width) as f64 {
                        let mark = Rect::from_xywh(px as f32, bottom, 1.0, len as f32);
                        fill_rect(&mut pixmap, mark, BLACK, 1.0);
                    }
                }
            }
        }

        draw_frame(&mut pixmap, area);
        to_rgb_image(&pixmap)
    }
}

/// Data to pixel mapping. Pixel y grows downwards, so the upper y limit sits at the top.
struct AxesTransform {
    area: PlotArea,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl AxesTransform {
    fn new(area: PlotArea, xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        let (x0, x1) = nonsingular(xlim);
        let (y0, y1) = nonsingular(ylim);
        Self { area, x0, x1, y0, y1 }
    }

    fn x(&self, x: f64) -> f64 {
        self.area.left as f64 + (x - self.x0) / (self.x1 - self.x0) * self.area.width as f64
    }

    fn y(&self, y: f64) -> f64 {
        self.area.top as f64 + (self.y1 - y) / (self.y1 - self.y0) * self.area.height as f64
    }

    fn clip_rect(&self) -> Option<Rect> {
        Rect::from_xywh(
            self.area.left as f32,
            self.area.top as f32,
            self.area.width as f32,
            self.area.height as f32,
        )
    }
}

fn nonsingular((lo, hi): (f64, f64)) -> (f64, f64) {
    if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn ordered(a: f64, b: f64) -> (f32, f32) {
    if a <= b {
        (a as f32, b as f32)
    } else {
        (b as f32, a as f32)
    }
}

fn draw_mesh(pixmap: &mut Pixmap, tf: &AxesTransform, mesh: &QuadMesh) {
    let Some(clip) = tf.clip_rect() else {
        return;
    };
    let lut = ColorLut::new(mesh.colormap);
    let (ny, nx) = mesh.values.dim();
    for i in 0..nx {
        let (left, right) = ordered(tf.x(mesh.x_edges[i]), tf.x(mesh.x_edges[i + 1]));
        for j in 0..ny {
            let Some(color) = lut.map(mesh.values[(j, i)], mesh.vmin, mesh.vmax) else {
                continue;
            };
            let (top, bottom) = ordered(tf.y(mesh.y_edges[j + 1]), tf.y(mesh.y_edges[j]));
            let cell = Rect::from_ltrb(left, top, right, bottom).and_then(|c| c.intersect(&clip));
            fill_rect(pixmap, cell, color, mesh.alpha);
        }
    }
}

fn draw_line(pixmap: &mut Pixmap, tf: &AxesTransform, line: &Line) {
    let mut pb = PathBuilder::new();
    let mut pen_down = false;
    for (&x, &y) in line.x.iter().zip(&line.y) {
        // Missing points break the line
        if !(x.is_finite() && y.is_finite()) {
            pen_down = false;
            continue;
        }
        let (px, py) = (tf.x(x) as f32, tf.y(y) as f32);
        if pen_down {
            pb.line_to(px, py);
        } else {
            pb.move_to(px, py);
            pen_down = true;
        }
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(line.color[0], line.color[1], line.color[2], 255);
    paint.anti_alias = true;
    let stroke = Stroke {
        width: line.width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    let clip = plot_area_mask(pixmap, tf);
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), clip.as_ref());
}

fn plot_area_mask(pixmap: &Pixmap, tf: &AxesTransform) -> Option<Mask> {
    let mut mask = Mask::new(pixmap.width(), pixmap.height())?;
    let area = PathBuilder::from_rect(tf.clip_rect()?);
    mask.fill_path(&area, FillRule::Winding, false, Transform::identity());
    Some(mask)
}

fn draw_frame(pixmap: &mut Pixmap, area: PlotArea) {
    let (l, t) = (area.left as f32, area.top as f32);
    let (w, h) = (area.width as f32, area.height as f32);
    fill_rect(pixmap, Rect::from_xywh(l, t, w + 1.0, 1.0), BLACK, 1.0);
    fill_rect(pixmap, Rect::from_xywh(l, t + h, w + 1.0, 1.0), BLACK, 1.0);
    fill_rect(pixmap, Rect::from_xywh(l, t, 1.0, h + 1.0), BLACK, 1.0);
    fill_rect(pixmap, Rect::from_xywh(l + w, t, 1.0, h + 1.0), BLACK, 1.0);
}

fn fill_rect(pixmap: &mut Pixmap, rect: Option<Rect>, color: Rgb, alpha: f64) {
    let Some(rect) = rect else {
        return;
    };
    let mut paint = Paint::default();
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    paint.set_color_rgba8(color[0], color[1], color[2], a);
    // Adjacent cells must not leave seams
    paint.anti_alias = false;
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

/// The background is opaque, so dropping alpha after demultiplying is lossless.
fn to_rgb_image(pixmap: &Pixmap) -> RgbImage {
    let mut img = RgbImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue()];
    }
    img
}

static CURRENT_FIGURE: Lazy<Mutex<Figure>> = Lazy::new(|| Mutex::new(Figure::default()));

/// Replace the current figure with an empty one of the given size.
pub fn new_figure(width: u32, height: u32) {
    let mut fig = CURRENT_FIGURE.lock().unwrap_or_else(PoisonError::into_inner);
    *fig = Figure::new(width, height);
}

/// Run `f` against the current figure's axes.
pub fn with_current_axes<R>(f: impl FnOnce(&mut Axes) -> R) -> R {
    let mut fig = CURRENT_FIGURE.lock().unwrap_or_else(PoisonError::into_inner);
    f(fig.axes_mut())
}

/// Hand over the current figure, leaving a fresh default one in its place.
pub fn take_current_figure() -> Figure {
    let mut fig = CURRENT_FIGURE.lock().unwrap_or_else(PoisonError::into_inner);
    std::mem::take(&mut *fig)
}
