use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// A customer's rating of their visit. Not linked to any order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub name: String,
    pub rating: u8,
    #[serde(default)]
    pub comments: String,
    #[serde(with = "timestamp::flexible", alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(name: impl Into<String>, rating: u8, comments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating,
            comments: comments.into(),
            created_at: Utc::now(),
        }
    }
}
