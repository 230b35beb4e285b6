use ndarray::{Array1, ArrayView1};

use crate::error::{Error, Result};

/// Reconstruct cell boundaries from `N >= 2` ordered cell centers.
///
/// Interior edges are midpoints between neighbours; the outer edges extrapolate
/// half of the first and last gap, so the result has `N + 1` values.
pub fn get_edges(centers: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
    let n = centers.len();
    if n < 2 {
        return Err(Error::Domain {
            reason: format!("at least 2 centers are required to reconstruct edges, got {}", n),
        });
    }

    let mut edges = Array1::<f64>::zeros(n + 1);
    edges[0] = centers[0] - (centers[1] - centers[0]) / 2.0;
    for i in 0..n - 1 {
        edges[i + 1] = centers[i] + (centers[i + 1] - centers[i]) / 2.0;
    }
    edges[n] = centers[n - 1] + (centers[n - 1] - centers[n - 2]) / 2.0;
    Ok(edges)
}
