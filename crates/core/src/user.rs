//! User records. Rules are owned per-user; deleting a user takes its rules
//! and processed features with it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
}

impl User {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: user_name.into(),
        }
    }
}
