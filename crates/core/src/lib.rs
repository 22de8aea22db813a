//! Product Desk Core - Shared types library.
//!
//! This crate provides the types shared by the Product Desk components:
//! - `admin` - Action endpoint and the server-held product page (Shopify Admin API)
//! - `integration-tests` - End-to-end harness driving the rendered page
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no I/O, no HTTP
//! clients. The page controller emits effects; callers decide how to send
//! submissions and deliver notifications.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, statuses and the product model
//! - [`action`] - Form wire contract between the page and the action endpoint
//! - [`page`] - Explicit state machine for the product management page

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod page;
pub mod types;

pub use types::*;
