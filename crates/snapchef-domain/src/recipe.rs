//! Recipe lifecycle and list ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Publication state of a recipe.
///
/// Wire and column format: `"DRAFT"`, `"PENDING"`, `"PUBLISHED"`, `"REJECTED"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipeStatus {
    Draft,
    Pending,
    Published,
    Rejected,
}

impl RecipeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Published => "PUBLISHED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Statuses an author may pick when creating a recipe.
    pub fn allowed_on_create(self) -> bool {
        matches!(self, Self::Draft | Self::Pending)
    }

    /// Transitions an author may make on their own recipe.
    ///
    /// Authors submit drafts for review, withdraw them, and pull a rejected or
    /// published recipe back to draft. They never publish.
    pub fn owner_can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Draft, Self::Pending)
                | (Self::Pending, Self::Draft)
                | (Self::Rejected, Self::Draft)
                | (Self::Published, Self::Draft)
        )
    }

    /// Transitions a moderator may make while reviewing.
    pub fn moderator_can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Published)
                | (Self::Pending, Self::Rejected)
                | (Self::Published, Self::Rejected)
        )
    }
}

impl fmt::Display for RecipeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown recipe status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for RecipeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PENDING" => Ok(Self::Pending),
            "PUBLISHED" => Ok(Self::Published),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Ordering options for recipe lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeSort {
    #[default]
    Newest,
    Oldest,
    Quickest,
    Random,
}

impl RecipeSort {
    pub fn from_query(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "quickest" => Some(Self::Quickest),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}
