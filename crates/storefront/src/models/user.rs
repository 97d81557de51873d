//! User profile domain types.

use serde::{Deserialize, Serialize};

use luxe_core::{Email, UserId};

/// An authenticated user's profile.
///
/// No password or credential material is ever stored on this type; the demo
/// credential check happens in [`crate::auth`] before a profile is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    /// Avatar image URI.
    pub avatar: String,
    pub phone: String,
    pub address: Address,
    pub preferences: Preferences,
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Account preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub newsletter: bool,
    pub notifications: bool,
    /// ISO 4217 currency code, e.g. "USD".
    pub currency: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            newsletter: false,
            notifications: false,
            currency: "USD".to_string(),
        }
    }
}

/// A partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub preferences: Option<Preferences>,
}

impl ProfileUpdate {
    /// Merge this update into an existing profile.
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(address) = self.address {
            profile.address = address;
        }
        if let Some(preferences) = self.preferences {
            profile.preferences = preferences;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new(1),
            email: Email::parse("user@example.com").unwrap(),
            name: "Test User".to_string(),
            avatar: String::new(),
            phone: "+1 (555) 000-0000".to_string(),
            address: Address::default(),
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        let mut p = profile();
        ProfileUpdate {
            phone: Some("+1 (555) 111-2222".to_string()),
            ..ProfileUpdate::default()
        }
        .apply_to(&mut p);

        assert_eq!(p.phone, "+1 (555) 111-2222");
        assert_eq!(p.name, "Test User");
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut p = profile();
        let before = p.clone();
        ProfileUpdate::default().apply_to(&mut p);
        assert_eq!(p, before);
    }
}
