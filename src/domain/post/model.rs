use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Characters of the text used when a post is shown as a one-liner.
pub const EXCERPT_LENGTH: usize = 15;

/// A post joined with its author and (optional) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: i64,
    pub author_username: String,
    pub group_id: Option<i64>,
    pub group_slug: Option<String>,
    pub group_title: Option<String>,
}

impl Post {
    pub fn excerpt(&self) -> String {
        self.text.chars().take(EXCERPT_LENGTH).collect()
    }

    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }

    pub fn published(&self) -> String {
        self.pub_date.format("%d.%m.%Y %H:%M").to_string()
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.excerpt())
    }
}
