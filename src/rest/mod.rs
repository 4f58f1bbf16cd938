//! Read-only REST resource layer.
//!
//! - **[`RestResource`]**: names, path templates and the `find` /
//!   `list_page` / `list_page_with_parent` reads every resource shares
//! - **[`PageRequest`]**: page size (capped at [`MAX_PAGE_SIZE`]) and cursor
//! - **[`ResourceResponse<T>`]**: decoded data plus cursor and rate-limit state
//! - **Path building**: most-specific template selection for nested resources
//! - **[`ResourceError`]**: semantic errors, with 404 mapped to `NotFound`
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_tables::rest::{PageRequest, RestResource};
//! use shopify_tables::rest::resources::{Product, Variant, VariantListParams};
//!
//! let product = Product::find(&client, &632910392).await?;
//! println!("{:?}", product.title);
//!
//! let mut page = PageRequest::first(250);
//! loop {
//!     let variants = Variant::list_page_with_parent(
//!         &client, "product_id", 632910392, &VariantListParams::default(), &page,
//!     ).await?;
//!     for variant in variants.iter() {
//!         println!("{:?}", variant.sku);
//!     }
//!     match variants.next_page_info() {
//!         Some(cursor) => page = PageRequest::after(250, cursor),
//!         None => break,
//!     }
//! }
//! ```

mod errors;
mod path;
mod resource;
mod response;

pub mod resources;

pub use errors::ResourceError;
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{PageRequest, RestResource, MAX_PAGE_SIZE};
pub use response::ResourceResponse;
