use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A community that posts can be filed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
