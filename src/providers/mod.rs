//! Content provider module
//!
//! Defines the Provider and Adapter traits, the fail-soft HTTP adapter and
//! the registry mapping each content category to its adapter.

mod adapter;
mod loader;
mod registry;
mod traits;

// Provider implementations
pub mod github;
pub mod kaggle;
pub mod semantic_scholar;
pub mod youtube;

pub use adapter::HttpAdapter;
pub use loader::ProviderLoader;
pub use registry::ProviderRegistry;
pub use traits::*;
