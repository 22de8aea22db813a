//! Product status as reported by the Admin API.

use serde::{Deserialize, Serialize};

/// Product status.
///
/// Maps to Shopify's `ProductStatus` enum. Values the schema adds later are
/// kept verbatim in [`ProductStatus::Other`] instead of failing the whole
/// product list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ProductStatus {
    /// Product is visible on the storefront.
    #[default]
    Active,
    /// Product is not visible (work in progress).
    Draft,
    /// Product is hidden/archived.
    Archived,
    /// Product is unlisted (not shown in search/collections but accessible via URL).
    Unlisted,
    /// Any other platform-defined value.
    Other(String),
}

impl ProductStatus {
    /// The wire value, e.g. `ACTIVE`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Draft => "DRAFT",
            Self::Archived => "ARCHIVED",
            Self::Unlisted => "UNLISTED",
            Self::Other(value) => value,
        }
    }

    /// Human readable label for the page.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Draft => "Draft",
            Self::Archived => "Archived",
            Self::Unlisted => "Unlisted",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for ProductStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ACTIVE" => Self::Active,
            "DRAFT" => Self::Draft,
            "ARCHIVED" => Self::Archived,
            "UNLISTED" => Self::Unlisted,
            _ => Self::Other(value),
        }
    }
}

impl From<ProductStatus> for String {
    fn from(status: ProductStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_round_trip_through_string() {
        for status in [
            ProductStatus::Active,
            ProductStatus::Draft,
            ProductStatus::Archived,
            ProductStatus::Unlisted,
        ] {
            assert_eq!(ProductStatus::from(String::from(status.clone())), status);
        }
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: ProductStatus = serde_json::from_str("\"SCHEDULED\"").unwrap();
        assert_eq!(status, ProductStatus::Other("SCHEDULED".to_string()));
        assert_eq!(status.label(), "SCHEDULED");
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            "\"SCHEDULED\""
        );
    }
}
