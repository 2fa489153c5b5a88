use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Free-form phone number. Presence and a length cap are the only rules;
/// no format is enforced beyond that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(number: String) -> Result<Self, ValidationError> {
        match number.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Phone number cannot be empty".to_string(),
            )),
            x if x > 15 => Err(ValidationError::new(
                "Max phone number length is 15 characters".to_string(),
            )),
            _ => Ok(Self(number)),
        }
    }
}

impl AsRef<String> for PhoneNumber {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_phone_numbers() {
    let valid_numbers = ["1", "12345678", "+47 123 45 678"];
    for valid_number in valid_numbers.iter() {
        let parsed = PhoneNumber::parse(valid_number.to_string())
            .expect("Failed to parse valid phone number");

        assert_eq!(parsed.as_ref(), valid_number);
    }
}

#[test]
fn test_invalid_phone_numbers() {
    assert!(PhoneNumber::parse("".to_string()).is_err());
    assert!(PhoneNumber::parse("1".repeat(16)).is_err());
}
