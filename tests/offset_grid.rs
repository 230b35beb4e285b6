use ndarray::{Array1, Array2, array};
use pinnacle::plot::ticks::{Locator, TickFormatter};
use pinnacle::{
    Axes, Error, OffsetGridOptions, get_edges, new_figure, nice_time_axis, render_offset_grid,
    take_current_figure,
};

fn grid(ny: usize, nx: usize) -> (Array1<f64>, Array1<f64>, Array2<f64>) {
    let x = Array1::range(0.0, nx as f64, 1.0);
    let y = Array1::range(0.0, ny as f64 * 2.0, 2.0);
    let z = Array2::from_shape_fn((ny, nx), |(j, i)| (10 * j + i) as f64);
    (x, y, z)
}

fn draw(
    x: &Array1<f64>,
    y: &Array1<f64>,
    z: &Array2<f64>,
    y_offset: &Array1<f64>,
    options: &OffsetGridOptions,
) -> pinnacle::Result<Axes> {
    let mut ax = Axes::default();
    render_offset_grid(
        Some(&mut ax),
        x.view(),
        y.view(),
        z.view(),
        y_offset.view(),
        options,
    )?;
    Ok(ax)
}

#[test]
fn every_column_is_shifted_by_its_offset() {
    let (x, y, z) = grid(3, 4);
    let y_offset = array![0.0, -5.0, 10.0, 2.5];
    let ax = draw(&x, &y, &z, &y_offset, &OffsetGridOptions::default()).unwrap();

    let y_edges = get_edges(y.view()).unwrap();
    let x_edges = get_edges(x.view()).unwrap();
    let meshes: Vec<_> = ax.meshes().collect();
    assert_eq!(meshes.len(), 4);
    for (i, mesh) in meshes.iter().enumerate() {
        assert_eq!(mesh.x_edges.to_vec(), vec![x_edges[i], x_edges[i + 1]]);
        assert_eq!(mesh.y_edges, &y_edges + y_offset[i]);
        assert_eq!(mesh.values.column(0), z.column(i));
    }
    assert_eq!(ax.get_xlim(), Some((-0.5, 3.5)));
}

#[test]
fn colour_limits_are_shared_across_columns() {
    let (x, y, z) = grid(3, 4);
    let y_offset = Array1::zeros(4);
    let ax = draw(&x, &y, &z, &y_offset, &OffsetGridOptions::default()).unwrap();
    for mesh in ax.meshes() {
        assert_eq!((mesh.vmin, mesh.vmax), (0.0, 23.0));
    }

    let options = OffsetGridOptions {
        vmin: Some(-1.0),
        vmax: Some(5.0),
        ..OffsetGridOptions::default()
    };
    let ax = draw(&x, &y, &z, &y_offset, &options).unwrap();
    for mesh in ax.meshes() {
        assert_eq!((mesh.vmin, mesh.vmax), (-1.0, 5.0));
    }
}

#[test]
fn missing_offset_blanks_the_column() {
    let (x, y, mut z) = grid(3, 4);
    // Column 2 holds the global maximum, which must still set the colour scale
    z[(1, 2)] = 500.0;
    let y_offset = array![1.0, 1.0, f64::NAN, 1.0];
    let z_before = z.clone();
    let ax = draw(&x, &y, &z, &y_offset, &OffsetGridOptions::default()).unwrap();

    let blank = ax.meshes().nth(2).unwrap();
    assert!(blank.values.iter().all(|v| v.is_nan()));
    assert_eq!(blank.y_edges, get_edges(y.view()).unwrap());
    assert_eq!(blank.vmax, 500.0);

    let neighbour = ax.meshes().nth(3).unwrap();
    assert!(neighbour.values.iter().all(|v| !v.is_nan()));
    assert_eq!(z, z_before);
    assert!(y_offset[2].is_nan());
}

#[test]
fn fixed_pixel_width_is_centred_on_the_cell() {
    let x = array![0.0, 1.0, 3.0];
    let y = array![0.0, 10.0];
    let z = Array2::from_elem((2, 3), 1.0);
    let options = OffsetGridOptions {
        x_pixel_scale: Some(0.2),
        ..OffsetGridOptions::default()
    };
    let ax = draw(&x, &y, &z, &Array1::zeros(3), &options).unwrap();

    // x edges are [-0.5, 0.5, 2.0, 4.0]
    let centres: Vec<f64> = ax
        .meshes()
        .map(|m| (m.x_edges[0] + m.x_edges[1]) / 2.0)
        .collect();
    let widths: Vec<f64> = ax.meshes().map(|m| m.x_edges[1] - m.x_edges[0]).collect();
    assert_eq!(centres, vec![0.0, 1.25, 3.0]);
    for w in widths {
        assert!((w - 0.2).abs() < 1e-12);
    }
    assert_eq!(ax.get_xlim(), Some((-0.5, 4.0)));
}

#[test]
fn invalid_pixel_width_is_rejected() {
    let (x, y, z) = grid(3, 4);
    for scale in [0.0, -1.0, f64::NAN] {
        let options = OffsetGridOptions {
            x_pixel_scale: Some(scale),
            ..OffsetGridOptions::default()
        };
        let err = draw(&x, &y, &z, &Array1::zeros(4), &options).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "x_pixel_scale", .. }));
    }
}

#[test]
fn mismatched_x_is_reported() {
    let (_, y, z) = grid(3, 4);
    let x = Array1::zeros(3);
    let err = draw(&x, &y, &z, &Array1::zeros(4), &OffsetGridOptions::default()).unwrap_err();
    assert!(matches!(
        &err,
        Error::ShapeMismatch { array, expected: 4, found: 3, .. } if array == "x"
    ));
    assert!(
        err.to_string()
            .starts_with("x must have same length as second dimension of z")
    );
}

#[test]
fn mismatched_y_is_reported() {
    let (x, _, z) = grid(3, 4);
    let y = Array1::zeros(4);
    let err = draw(&x, &y, &z, &Array1::zeros(4), &OffsetGridOptions::default()).unwrap_err();
    assert!(
        err.to_string()
            .starts_with("y must have same length as first dimension of z")
    );
}

#[test]
fn mismatched_offset_is_reported() {
    let (x, y, z) = grid(3, 4);
    let err = draw(&x, &y, &z, &Array1::zeros(5), &OffsetGridOptions::default()).unwrap_err();
    assert!(matches!(
        &err,
        Error::ShapeMismatch { array, expected: 4, found: 5, .. } if array == "y_offset"
    ));
}

#[test]
fn single_sample_axis_has_no_edges() {
    let x = array![0.0, 1.0];
    let y = array![5.0];
    let z = array![[1.0, 2.0]];
    let err = draw(&x, &y, &z, &Array1::zeros(2), &OffsetGridOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Domain { .. }));
}

// The only test in this binary that touches the current figure
#[test]
fn current_figure_receives_grid_and_time_axis() {
    let (x, y, z) = grid(3, 4);
    let y_offset = Array1::zeros(4);

    new_figure(640, 480);
    render_offset_grid(
        None,
        x.view(),
        y.view(),
        z.view(),
        y_offset.view(),
        &OffsetGridOptions::default(),
    )
    .unwrap();
    nice_time_axis(None);
    let fig = take_current_figure();

    assert_eq!((fig.width, fig.height), (640, 480));
    assert_eq!(fig.axes().meshes().count(), 4);
    let xaxis = fig.axes().xaxis();
    assert_eq!(xaxis.major_locator, Locator::Day);
    assert_eq!(xaxis.major_formatter, TickFormatter::date("%Y %b %d"));
    assert_eq!(xaxis.major_pad, 10.0);

    // The slot is left with a fresh figure
    assert_eq!(take_current_figure().axes().meshes().count(), 0);
}
