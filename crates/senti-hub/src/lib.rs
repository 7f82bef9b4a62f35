//! Hub layer: hosted inference over HTTP and model file downloads for local inference.

#[cfg(feature = "http")]
pub mod error;
#[cfg(feature = "http")]
pub mod fetch;
#[cfg(feature = "http")]
pub mod inference;

#[cfg(feature = "http")]
pub use error::HubError;
#[cfg(feature = "http")]
pub use fetch::{ModelFetcher, DEFAULT_HUB_URL, MODEL_FILES};
#[cfg(feature = "http")]
pub use inference::{InferenceClient, DEFAULT_ENDPOINT};
