use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A member's display name. Also the match key for bulk image uploads,
/// so leading/trailing whitespace is rejected rather than trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberName(String);

impl MemberName {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        if name != name.trim() {
            return Err(ValidationError::new(
                "Member name cannot have surrounding whitespace".to_string(),
            ));
        }
        match name.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Member name cannot be empty".to_string(),
            )),
            x if x > 30 => Err(ValidationError::new(
                "Max name length is 30 characters".to_string(),
            )),
            _ => Ok(Self(name)),
        }
    }
}

impl AsRef<String> for MemberName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_member_names() {
    let valid_names = ["a".to_string(), "a".repeat(30), "Jane Doe".to_string()];
    for valid_name in valid_names.iter() {
        let parsed = MemberName::parse(valid_name.to_owned())
            .expect("Failed to parse valid member name");

        assert_eq!(parsed.as_ref(), valid_name);
    }
}

#[test]
fn test_short_member_names() {
    let short_name = "".to_string();
    let result = MemberName::parse(short_name);
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().as_ref(), "Member name cannot be empty");
}

#[test]
fn test_long_member_names() {
    let long_name = "a".repeat(31);
    let result = MemberName::parse(long_name);
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max name length is 30 characters"
    );
}

#[test]
fn test_padded_member_names() {
    let padded_name = " Jane Doe ".to_string();
    let result = MemberName::parse(padded_name);
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Member name cannot have surrounding whitespace"
    );
}
