//! The visitor profile.
//!
//! The profile fixture only seeds a visitor's profile. After that the
//! storefront owns one copy per visitor and changes it through the methods
//! here, never by reaching into the fixture.

use serde::{Deserialize, Serialize};

use crate::types::AddressId;

/// Errors from profile edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("address cannot be empty")]
    EmptyAddress,
}

/// Contact details shown on the profile card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub address: String,
}

/// A visitor profile, shaped like `profile.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "profile")]
    pub details: ProfileDetails,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl Profile {
    /// Profile used when the fixture is unavailable.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            details: ProfileDetails {
                name: "Guest".to_string(),
                ..ProfileDetails::default()
            },
            addresses: Vec::new(),
        }
    }

    /// Update name and phone. Both are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::EmptyName`] if the name is blank; nothing is
    /// changed in that case.
    pub fn update_details(&mut self, name: &str, phone: &str) -> Result<(), ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        self.details.name = name.to_string();
        self.details.phone = phone.trim().to_string();
        Ok(())
    }

    /// Save a new address with the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::EmptyAddress`] if the address is blank.
    pub fn add_address(&mut self, address: &str) -> Result<AddressId, ProfileError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ProfileError::EmptyAddress);
        }
        let next = self
            .addresses
            .iter()
            .map(|a| a.id.as_i32())
            .max()
            .unwrap_or(0)
            + 1;
        let id = AddressId::new(next);
        self.addresses.push(Address {
            id,
            address: address.to_string(),
        });
        Ok(id)
    }

    /// Delete an address. Returns whether it existed.
    pub fn remove_address(&mut self, id: AddressId) -> bool {
        let before = self.addresses.len();
        self.addresses.retain(|a| a.id != id);
        self.addresses.len() != before
    }

    /// The default delivery address (the first one saved).
    #[must_use]
    pub fn primary_address(&self) -> Option<&str> {
        self.addresses.first().map(|a| a.address.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fixture() -> Profile {
        serde_json::from_str(
            r#"{
                "profile": { "name": "Asha", "phone": "98450 00000", "email": "asha@example.in", "avatar": "/a.png" },
                "addresses": [ { "id": 1, "address": "12 MG Road" }, { "id": 4, "address": "7 Park St" } ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_fixture_shape() {
        let profile = fixture();
        assert_eq!(profile.details.name, "Asha");
        assert_eq!(profile.primary_address(), Some("12 MG Road"));
    }

    #[test]
    fn test_update_details_rejects_blank_name() {
        let mut profile = fixture();
        assert_eq!(
            profile.update_details("  ", "1"),
            Err(ProfileError::EmptyName)
        );
        assert_eq!(profile.details.name, "Asha");
        profile.update_details(" Asha R ", " 99 ").unwrap();
        assert_eq!(profile.details.name, "Asha R");
        assert_eq!(profile.details.phone, "99");
    }

    #[test]
    fn test_add_address_uses_next_id() {
        let mut profile = fixture();
        let id = profile.add_address(" 3 Lake View ").unwrap();
        assert_eq!(id, AddressId::new(5));
        assert_eq!(profile.addresses.last().unwrap().address, "3 Lake View");
        assert_eq!(profile.add_address(""), Err(ProfileError::EmptyAddress));
    }

    #[test]
    fn test_remove_address() {
        let mut profile = fixture();
        assert!(profile.remove_address(AddressId::new(1)));
        assert!(!profile.remove_address(AddressId::new(1)));
        assert_eq!(profile.primary_address(), Some("7 Park St"));
    }

    #[test]
    fn test_guest_has_no_addresses() {
        assert!(Profile::guest().primary_address().is_none());
    }
}
