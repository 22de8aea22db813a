//! Newtype IDs for type-safe entity references.
//!
//! Shopify identifies every resource with an opaque global id string
//! (e.g. `gid://shopify/Product/123`). Use the `define_gid!` macro to create
//! wrappers that prevent accidentally mixing ids from different resources.

/// Macro to define a type-safe Shopify global id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use product_desk_core::define_gid;
/// define_gid!(ProductId);
/// define_gid!(VariantId);
///
/// let product_id = ProductId::new("gid://shopify/Product/1");
/// let variant_id = VariantId::new("gid://shopify/ProductVariant/1");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = variant_id;
/// assert_eq!(product_id.as_str(), "gid://shopify/Product/1");
/// # let _ = variant_id;
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying id string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the id string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_gid!(ProductId);
define_gid!(VariantId);
