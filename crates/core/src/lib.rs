//! AURAlos Core - Catalog reconciliation and cart pricing engine.
//!
//! This crate holds the deterministic business logic behind the AURAlos
//! storefront:
//! - mapping free-text product references (as returned by the AI product
//!   finder) back to canonical catalog entries, and
//! - aggregating a shopping cart and pricing it (BOGO tiered discount,
//!   threshold-based shipping).
//!
//! # Architecture
//!
//! The core crate contains only in-memory logic plus a small key-value
//! storage seam for the cart. No network access, no global state: the
//! [`CatalogIndex`] is built once and shared by `Arc` with the
//! [`ReferenceResolver`] and the [`Cart`].
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and price display
//! - [`catalog`] - Product records, the catalog index, and browsing
//! - [`resolver`] - Strict reference-to-product resolution
//! - [`finder`] - Aggregation of AI finder candidates into display results
//! - [`cart`] - Cart line items and persistence
//! - [`pricing`] - Discount and shipping policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod finder;
pub mod pricing;
pub mod resolver;
pub mod types;

pub use cart::{Cart, CartLineItem, CartStorage, FileStorage, MemoryStorage, StorageError};
pub use catalog::{Catalog, CatalogError, CatalogIndex, ColorVocabulary, Product};
pub use finder::{CandidateRecord, Confidence, FinderError, FinderResults, ProductMatch};
pub use pricing::{CartSummary, PricingPolicy};
pub use resolver::{ReconciliationResult, ReferenceResolver};
pub use types::*;
