//! Domain models for the storefront engine.

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderDraft, PaymentCard, PaymentSummary, ShippingDetails};
pub use product::{NewProduct, Product};
pub use user::{Address, Preferences, ProfileUpdate, UserProfile};
