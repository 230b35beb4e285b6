pub mod edges;
pub mod offset_grid;
pub mod surface;
