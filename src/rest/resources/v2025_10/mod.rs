//! REST resources for API version 2025-10.
//!
//! All resources are read-only. Top-level listings:
//!
//! - [`Order`] (`orders`, `status=any` by default)
//! - [`Product`] (`products`)
//! - [`CustomCollection`] and [`SmartCollection`]
//! - [`Customer`] (`customers`)
//! - [`DraftOrder`] (`draft_orders`)
//! - [`Theme`] (`themes`, unpaginated)
//!
//! Nested listings, reached through
//! [`RestResource::list_page_with_parent`](crate::rest::RestResource::list_page_with_parent):
//!
//! - [`Variant`] under `product_id`
//! - [`Product`] under `collection_id` (collection members)
//! - [`Metafield`] under `product_id`, `customer_id` or `collection_id`
//!
//! [`Shop`] is a singleton read via [`Shop::current`].

mod collection;
mod custom_collection;
mod customer;
mod draft_order;
mod metafield;
mod order;
mod product;
mod shop;
mod smart_collection;
mod theme;
mod variant;

pub use collection::{Collection, CollectionListParams};
pub use custom_collection::CustomCollection;
pub use customer::{Customer, CustomerListParams, CustomerState};
pub use draft_order::{DraftOrder, DraftOrderListParams, DraftOrderStatus};
pub use metafield::{Metafield, MetafieldListParams};
pub use order::{Order, OrderListParams, OrderStatus};
pub use product::{Product, ProductListParams, ProductStatus};
pub use shop::Shop;
pub use smart_collection::SmartCollection;
pub use theme::{Theme, ThemeListParams};
pub use variant::{Variant, VariantListParams, WeightUnit};
