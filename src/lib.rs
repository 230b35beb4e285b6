#![doc = r#"
pinnacle — surface detection and depth-offset rendering for AUV pinnacle ADCP data.

This crate works on gridded `(time, range)` profiles from an acoustic Doppler
current profiler mounted on an autonomous underwater vehicle. It finds the water
surface from backscatter intensity and draws range-gated data as a
depth-corrected pseudocolor image aligned to a time axis. It powers the
`pinnacle` CLI and can be embedded in your own Rust applications.

Add dependency
--------------
```toml
[dependencies]
pinnacle = "0.1"
```

Detect the surface
------------------
```rust
use chrono::{TimeZone, Utc};
use ndarray::array;
use pinnacle::{ProfileDataset, SurfaceMode, SurfaceParams, Variable, find_surface_level};

fn main() -> pinnacle::Result<()> {
    let time = vec![Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap()];
    let data = ProfileDataset::new(time, array![0.0, 50.0, 100.0, 150.0])
        .with_variable("NAV_DEPTH", Variable::Time(array![20.0]))?
        .with_variable("SerEAAcnt", Variable::TimeRange(array![[1.0, 2.0, 10.0, 3.0]]))?;

    let params = SurfaceParams {
        mode: SurfaceMode::Max,
        ..SurfaceParams::default()
    };
    let detected = find_surface_level(&data, &params)?;

    assert_eq!(detected.time_series("distance_to_surface")?[0], 100.0);
    assert_eq!(detected.time_series("surface_level")?[0], 80.0);
    Ok(())
}
```

Render a depth-offset grid
--------------------------
```rust
use ndarray::{Array1, Array2};
use pinnacle::{Figure, OffsetGridOptions, OutputFormat, render_offset_grid, save_figure};

fn draw(path: &std::path::Path) -> pinnacle::Result<()> {
    let (ny, nx) = (300, 400);
    let x = Array1::range(0.0, nx as f64, 1.0);
    let y = Array1::range(0.0, ny as f64, 1.0);
    let z = Array2::from_shape_fn((ny, nx), |(j, i)| ((i + j) % 17) as f64);
    let y_offset = Array1::linspace(0.0, 50.0, nx);

    let mut fig = Figure::new(800, 400);
    render_offset_grid(
        Some(fig.axes_mut()),
        x.view(),
        y.view(),
        z.view(),
        y_offset.view(),
        &OffsetGridOptions::default(),
    )?;
    save_figure(&fig, path, OutputFormat::PNG)
}
```

Drawing context
---------------
Renderers take `Option<&mut Axes>`. Passing `None` draws on the process-wide
current figure, which is reset with [`new_figure`] and handed over with
[`take_current_figure`].

Error handling
--------------
All public functions return `pinnacle::Result<T>`; match on `pinnacle::Error` to
handle specific cases, e.g. a missing variable or mismatched array shapes.

```rust
use ndarray::{Array1, Array2};
use pinnacle::{Axes, Error, OffsetGridOptions, render_offset_grid};

let z = Array2::<f64>::zeros((3, 4));
let x = Array1::<f64>::zeros(3);
let y = Array1::<f64>::zeros(3);
let y_offset = Array1::<f64>::zeros(4);
let mut ax = Axes::default();

match render_offset_grid(Some(&mut ax), x.view(), y.view(), z.view(), y_offset.view(), &OffsetGridOptions::default()) {
    Err(Error::ShapeMismatch { array, .. }) => assert_eq!(array, "x"),
    other => panic!("unexpected: {other:?}"),
}
```

Useful modules
--------------
- [`api`] — high-level entry points (dataset files, profile rendering, saving).
- [`core`] — dataset model, parameters and processing primitives.
- [`plot`] — figures, axes, colormaps and time-axis ticks.
- [`io`] — dataset JSON and raster writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod plot;
pub mod types;

// Curated public API surface
// Types
pub use core::dataset::{
    BIN_DEPTH, DISTANCE_TO_SURFACE, ProfileDataset, SURFACE_LEVEL, Variable,
};
pub use core::params::{PinnacleParams, RenderParams, SurfaceParams};
pub use error::{Error, Result};
pub use types::{Colormap, OutputFormat, SurfaceMode};

// Processing
pub use core::processing::edges::get_edges;
pub use core::processing::offset_grid::{MeshStyle, OffsetGridOptions, render_offset_grid};
pub use core::processing::surface::{add_bin_depth, find_surface_level};

// Drawing surface
pub use plot::{
    Axes, Figure, QuadMesh, date2num, new_figure, nice_time_axis, num2date,
    take_current_figure, with_current_axes,
};

// I/O
pub use io::{dataset_from_json, dataset_to_json, read_dataset, write_dataset};

// High-level API re-exports
pub use api::{
    detect_surface_to_path, render_profile, render_profile_figure, render_profile_to_path,
    save_figure, save_figure_with_metadata,
};
