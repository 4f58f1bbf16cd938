//! Version-specific REST resource implementations.
//!
//! ```text
//! resources/
//!   mod.rs           <- This file (re-exports latest version)
//!   v2025_10/
//!     mod.rs         <- Version-specific resources
//! ```
//!
//! The latest version is re-exported at this level:
//!
//! ```rust,ignore
//! use shopify_tables::rest::resources::Product;            // latest
//! use shopify_tables::rest::resources::v2025_10::Product;  // pinned
//! ```

pub mod v2025_10;

// Re-export types from the latest version for convenience
pub use v2025_10::*;
