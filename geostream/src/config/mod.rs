//! Configuration file support.
//!
//! A YAML file (see [`Config`]) sets streaming defaults and lists layers. Command line arguments
//! override the file through the `override_optional_*` methods.

mod layer;
mod main;

pub use layer::LayerConfig;
pub use main::{Config, DEFAULT_OUTPUT_DIR};
