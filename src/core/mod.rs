//! Core building blocks: the labeled profile dataset, parameter sets, and the
//! processing primitives (surface detection, edge reconstruction, offset grid
//! rendering) consumed by the high-level `api` module.
pub mod dataset;
pub mod params;
pub mod processing;
