//! Types for idea records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// The fixed set of idea categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Business,
    #[serde(rename = "Social Impact")]
    SocialImpact,
    Environment,
    Health,
    Education,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 6] = [
        Category::Technology,
        Category::Business,
        Category::SocialImpact,
        Category::Environment,
        Category::Health,
        Category::Education,
    ];

    /// The backend's string value for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::SocialImpact => "Social Impact",
            Category::Environment => "Environment",
            Category::Health => "Health",
            Category::Education => "Education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-submitted startup idea
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Idea {
    /// The idea ID
    #[serde(rename = "_id")]
    pub id: String,

    /// Short title
    pub heading: String,

    /// Full description
    pub details: String,

    /// Category this idea belongs to
    pub category: Category,

    /// Technologies involved, in author order
    #[serde(default)]
    pub technologies: Vec<String>,

    /// Ids of the users who liked this idea
    #[serde(default)]
    pub likes: Vec<String>,

    /// The author, as embedded by the server
    #[serde(rename = "postedBy", default, skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<PostedBy>,

    /// Submission time
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Idea {
    /// Number of likes on this idea
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

/// Author details embedded in an idea record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedBy {
    /// The author's user ID
    #[serde(rename = "_id")]
    pub user_id: String,

    /// First name
    pub name: String,

    /// Last name
    pub surname: String,

    /// Account creation time
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields submitted when creating an idea
#[derive(Debug, Clone, Serialize)]
pub struct IdeaDraft {
    /// Short title, at least 5 characters
    pub heading: String,

    /// Full description, at least 20 characters
    pub details: String,

    /// Category this idea belongs to
    pub category: Category,

    /// Technologies involved
    pub technologies: Vec<String>,
}

impl IdeaDraft {
    /// Field checks performed before the create request is dispatched
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.heading.trim().chars().count() < 5 {
            return Err(Error::validation("Heading must be at least 5 characters"));
        }
        if self.details.trim().chars().count() < 20 {
            return Err(Error::validation("Details must be at least 20 characters"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_to_display_strings() {
        let json = serde_json::to_string(&Category::SocialImpact).unwrap();
        assert_eq!(json, r#""Social Impact""#);

        let back: Category = serde_json::from_str(r#""Social Impact""#).unwrap();
        assert_eq!(back, Category::SocialImpact);
    }

    #[test]
    fn short_heading_is_rejected() {
        let draft = IdeaDraft {
            heading: "App".to_string(),
            details: "A description that is certainly long enough.".to_string(),
            category: Category::Technology,
            technologies: vec![],
        };
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn whitespace_does_not_count_toward_length() {
        let draft = IdeaDraft {
            heading: "  ab  ".to_string(),
            details: "A description that is certainly long enough.".to_string(),
            category: Category::Technology,
            technologies: vec![],
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn valid_draft_passes() {
        let draft = IdeaDraft {
            heading: "Solar kiosks".to_string(),
            details: "Off-grid charging kiosks for rural markets.".to_string(),
            category: Category::Environment,
            technologies: vec!["Rust".to_string()],
        };
        assert!(draft.validate().is_ok());
    }
}
