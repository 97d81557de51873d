//! Demo authentication stub.
//!
//! Matches credentials against a single hard-coded demo record after a
//! simulated network delay. There is no hashing, no token issuance, and no
//! session expiry; a real implementation replaces this module wholesale
//! rather than extending it.
//!
//! Login failure carries one generic message for every cause, so callers
//! cannot tell an unknown user from a wrong password.

use std::time::Duration;

use thiserror::Error;
use tracing::instrument;

use luxe_core::{Email, UserId};

use crate::models::{Address, Preferences, UserProfile};

/// Email of the single demo account.
pub const DEMO_EMAIL: &str = "demo@luxury.com";

const DEMO_PASSWORD: &str = "demo123";

/// Errors that can occur during authentication.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong email or password; intentionally indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Log in against the demo credential record.
///
/// Sleeps `delay` to simulate network latency, then checks the pair. The
/// returned profile carries no credential material.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] for any pair other than the
/// demo account's.
#[instrument(skip(password, delay), fields(email = %email))]
pub async fn login(email: &str, password: &str, delay: Duration) -> Result<UserProfile, AuthError> {
    tokio::time::sleep(delay).await;
    authenticate(email, password)
}

/// The synchronous credential check behind [`login`].
pub(crate) fn authenticate(email: &str, password: &str) -> Result<UserProfile, AuthError> {
    if email == DEMO_EMAIL && password == DEMO_PASSWORD {
        Ok(demo_profile())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

/// The profile stored for the demo account on successful login.
fn demo_profile() -> UserProfile {
    UserProfile {
        id: UserId::new(1),
        email: Email::parse(DEMO_EMAIL).unwrap_or_else(|_| unreachable!("demo email is valid")),
        name: "Alexandra Sterling".to_string(),
        avatar: "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face"
            .to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        address: Address {
            street: "123 Madison Avenue".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip: "10016".to_string(),
            country: "United States".to_string(),
        },
        preferences: Preferences {
            newsletter: true,
            notifications: true,
            currency: "USD".to_string(),
        },
    }
}
