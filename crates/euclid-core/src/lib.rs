pub mod config;
pub mod generation;
pub mod id;
pub mod model;
pub mod sample;
pub mod store;

pub use config::CanvasConfig;
pub use generation::{ArtifactKind, generate_artifacts};
pub use id::{NodeId, SuffixGenerator};
pub use model::*;
pub use store::{NodeStore, StoreError};
