//! Shipping address record.
//!
//! Shared between the buyer checkout payload and the seller order views.
//! Field names serialize in camelCase to match the backend's JSON.

use serde::{Deserialize, Serialize};

/// A shipping address.
///
/// All fields except `address2` are required for checkout; requiredness is
/// checked by [`Address::missing_fields`] rather than the type system so the
/// wizard can report every missing field at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    /// Optional second address line; the only non-required field.
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl Address {
    /// Names of required fields that are empty or whitespace-only.
    ///
    /// An empty result means the address is complete enough to ship to.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let required: [(&'static str, &str); 7] = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("address line 1", &self.address1),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
            ("country", &self.country),
        ];

        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete() -> Address {
        Address {
            first_name: "Asha".into(),
            last_name: "Verma".into(),
            address1: "12 Lake View Road".into(),
            address2: None,
            city: "Pune".into(),
            state: "MH".into(),
            zip: "411001".into(),
            country: "India".into(),
        }
    }

    #[test]
    fn test_complete_address_has_no_missing_fields() {
        assert!(complete().missing_fields().is_empty());
    }

    #[test]
    fn test_address2_is_optional() {
        let mut address = complete();
        address.address2 = None;
        assert!(address.missing_fields().is_empty());
    }

    #[test]
    fn test_blank_required_fields_are_reported() {
        let mut address = complete();
        address.city = "  ".into();
        address.zip = String::new();
        assert_eq!(address.missing_fields(), vec!["city", "zip"]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(complete()).unwrap();
        assert_eq!(json["firstName"], "Asha");
        assert_eq!(json["address1"], "12 Lake View Road");
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_deserializes_without_address2() {
        let address: Address = serde_json::from_str(
            r#"{"firstName":"A","lastName":"B","address1":"C","city":"D","state":"E","zip":"F","country":"G"}"#,
        )
        .unwrap();
        assert_eq!(address.address2, None);
    }
}
