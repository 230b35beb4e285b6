//! Raster writers for rendered figures (PNG, TIFF, JPEG) and the JSON
//! sidecar that records what the image shows.
pub mod jpeg;
pub mod metadata;
pub mod png;
pub mod tiff;

pub use self::jpeg::write_rgb_jpeg;
pub use self::metadata::{FigureMetadata, create_metadata_sidecar, extract_figure_metadata};
pub use self::png::write_rgb_png;
pub use self::tiff::write_rgb_tiff;
