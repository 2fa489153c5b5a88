use serde::{Deserialize, Serialize};

use super::{CategoryTitle, MemberName};

/// A roster entry. `order` doubles as the unique identifier and the
/// position the frontend displays the member at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub order: i32,
    pub name: MemberName,
    pub title: String,
    pub email: String,
    pub github: String,
    pub linked_in: String,
    pub image: Option<String>,
    pub categories: Vec<CategoryTitle>,
}

impl Member {
    pub fn new(order: i32, name: MemberName) -> Self {
        Self {
            order,
            name,
            title: String::new(),
            email: String::new(),
            github: String::new(),
            linked_in: String::new(),
            image: None,
            categories: Vec::new(),
        }
    }
}
