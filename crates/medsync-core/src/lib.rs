//! MedSync Core — domain models, repository traits, and the pure
//! linkage components (key normalization and counterpart matching).

pub mod error;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod repository;

pub use error::{MedsyncError, MedsyncResult};
