//! Configuration for the Scholar Compass client.
//!
//! This module provides:
//!
//! - [`ClientConfig`] and [`ClientConfigBuilder`] for configuring the client
//! - The [`ScholarName`] newtype for query strings
//! - Backend endpoint paths in [`endpoints`]
//!
//! # Example
//!
//! ```ignore
//! use scholar_compass::config::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .base_url("http://localhost:5000")
//!     .timeout(Duration::from_secs(60))
//!     .build()?;
//! ```

pub mod builder;
pub mod options;

// Re-export commonly used types
pub use builder::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use options::{endpoints, ScholarName};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_exports_accessible() {
        let _: ScholarName = ScholarName::new("test");
        let _: &str = endpoints::ANALYZE;
        let _: &str = DEFAULT_BASE_URL;
    }

    #[test]
    fn builder_accessible() {
        let _ = ClientConfig::builder();
    }
}
