use serde::{Deserialize, Serialize};

use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !validator::validate_email(s) {
            return Err(ValidationError::new(format!(
                "Invalid email address: {s}"
            )));
        }

        Ok(Self(s.to_owned()))
    }
}

impl AsRef<String> for Email {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
