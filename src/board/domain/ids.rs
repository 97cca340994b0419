//! Identifier types for the board domain.

use super::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declares an opaque, backend-assigned string identifier.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an existing value.
            ///
            /// # Errors
            ///
            /// Returns [`BoardError::EmptyIdentifier`] when the value is empty
            /// after trimming.
            pub fn new(value: impl Into<String>) -> Result<Self, BoardError> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(BoardError::EmptyIdentifier);
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Creates a fresh random identifier for locally created records.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = BoardError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Unique identifier of a task, stable for the task's lifetime.
    TaskId
);

opaque_id!(
    /// Identifier of the project whose tasks a board displays.
    ProjectId
);

opaque_id!(
    /// Identifier of a team member that tasks can be assigned to.
    MemberId
);

opaque_id!(
    /// Identifier of a task comment.
    CommentId
);

/// Identifier of a board column; doubles as a task status value.
///
/// Column identifiers are trimmed and lower-cased, and must not contain
/// whitespace, so `" In-Progress "` and `"in-progress"` name the same column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a validated column identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidColumnId`] when the value is empty or
    /// contains whitespace after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(BoardError::InvalidColumnId(raw));
        }
        Ok(Self(normalized))
    }

    /// Builds an identifier from a literal already in canonical form.
    pub(crate) fn canonical(value: &'static str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ColumnId {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ColumnId {
    type Error = BoardError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColumnId> for String {
    fn from(value: ColumnId) -> Self {
        value.0
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
