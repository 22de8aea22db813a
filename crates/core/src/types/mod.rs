//! Core types for Product Desk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use price::{Price, PriceError, parse_user_price};
pub use product::{PLACEHOLDER_IMAGE_URL, Product, Variant};
pub use status::ProductStatus;
