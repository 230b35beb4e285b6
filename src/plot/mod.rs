//! Drawing surface for the renderers: figures and axes that record artists,
//! colormaps, and x-axis tick placement including date ticks.
pub mod colormap;
pub mod figure;
pub mod ticks;
pub mod time_axis;

pub use figure::{Artist, Axes, Figure, Line, QuadMesh, new_figure, take_current_figure, with_current_axes};
pub use time_axis::{date2num, nice_time_axis, num2date};
