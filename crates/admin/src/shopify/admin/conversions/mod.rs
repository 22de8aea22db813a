//! Type conversions from GraphQL response types to domain types.
//!
//! These functions convert the wire shapes in `queries` into the
//! normalized `product_desk_core` types the page consumes.

mod products;

pub use products::{convert_product, convert_product_connection, convert_user_errors};
