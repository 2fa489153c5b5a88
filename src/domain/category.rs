use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Query value that bypasses category filtering and returns the whole roster.
pub const ALL_MEMBERS_SENTINEL: &str = "Alle Medlemmer";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CategoryTitle(String);

impl CategoryTitle {
    pub fn parse(title: String) -> Result<Self, ValidationError> {
        match title.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Category title cannot be empty".to_string(),
            )),
            x if x > 30 => Err(ValidationError::new(
                "Max category title length is 30 characters".to_string(),
            )),
            _ => Ok(Self(title)),
        }
    }
}

impl AsRef<String> for CategoryTitle {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_category_titles() {
    let valid_titles = ["Lead", "Web", "HR"];
    for valid_title in valid_titles.iter() {
        let parsed = CategoryTitle::parse(valid_title.to_string())
            .expect("Failed to parse valid category title");

        assert_eq!(parsed.as_ref(), valid_title);
    }
}

#[test]
fn test_invalid_category_titles() {
    assert!(CategoryTitle::parse("".to_string()).is_err());
    assert!(CategoryTitle::parse("a".repeat(31)).is_err());
}

#[test]
fn test_category_titles_order_alphabetically() {
    let mut titles = vec![
        CategoryTitle::parse("Web".to_string()).unwrap(),
        CategoryTitle::parse("HR".to_string()).unwrap(),
        CategoryTitle::parse("Lead".to_string()).unwrap(),
    ];
    titles.sort();
    let titles: Vec<&String> = titles.iter().map(AsRef::as_ref).collect();
    assert_eq!(titles, ["HR", "Lead", "Web"]);
}
