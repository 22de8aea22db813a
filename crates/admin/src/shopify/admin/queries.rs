//! GraphQL query definitions for Shopify Admin API.
//!
//! Uses `graphql_client` to generate type-safe Rust code from the operations
//! in `graphql/admin/queries/products.graphql`.

use graphql_client::GraphQLQuery;

// =============================================================================
// Custom scalar type aliases (used by graphql_client)
// =============================================================================

/// Decimal number as string (preserves precision).
type Decimal = String;

/// Money amount as decimal string.
type Money = String;

/// URL string.
#[allow(clippy::upper_case_acronyms)]
type URL = String;

// =============================================================================
// Product queries
// =============================================================================

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct ProductsOverview;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct ProductTitleAndPriceUpdate;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/products.graphql",
    response_derives = "Debug, Clone"
)]
pub struct ProductDelete;
