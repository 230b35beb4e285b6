//! I/O layer: JSON (de)serialization of profile datasets and `writers`
//! for PNG/TIFF/JPEG figure output with metadata sidecars.
pub mod dataset_json;
pub use dataset_json::{dataset_from_json, dataset_to_json, read_dataset, write_dataset};

pub mod writers;
