//! Luxe Storefront - headless storefront engine.
//!
//! Client-side storefront logic with no server component:
//!
//! - [`catalog`] - HTTP client for the third-party mock product API
//! - [`cart`] - Session-scoped shopping cart with derived totals
//! - [`account`] - Mock authentication, wishlist, and order history,
//!   persisted to a local JSON blob
//! - [`checkout`] - Three-step checkout workflow
//! - [`state`] - Explicitly constructed application state handed to the
//!   presentation layer
//!
//! All state mutation happens through closed action sets ([`cart::CartAction`],
//! [`account::AccountAction`]) applied by pure transition functions; the
//! stores wrap dispatch with persistence and convenience methods.
//!
//! # Caveats
//!
//! Authentication is a demo stub against one hard-coded credential record,
//! and the catalog API accepts writes without persisting them. Neither is a
//! design to build on.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod state;
pub mod storage;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use state::AppState;
