//! Inference layer: synthetic corpus, nearest-neighbour classification,
//! template ranking, and narrative guidance.

mod catalog;
pub mod config;
pub mod corpus;
mod error;
pub mod features;
pub mod knn;
pub mod narrative;
pub mod scorer;

pub use catalog::{Catalog, CatalogStats};
pub use config::EngineConfig;
pub use corpus::{Corpus, LabelHistogram, Sample, TrainingCase};
pub use error::{CatalogError, ConfigError};
pub use features::Normalizer;
pub use knn::{InferenceResult, Neighbor};
