//! Self-validating scalar value objects.
//!
//! Each type can only be constructed from a string that passes its format
//! rule, so anything holding one can rely on it being valid. Deserialization
//! goes through the same check.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SaveItError};

/// Maximum number of characters in a tag.
pub const MAX_TAG_LENGTH: usize = 20;

static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i:(?:https?|ftp)://)?(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}(?::\d{1,5})?(?:[/?#]\S*)?$",
    )
    .expect("link pattern is a valid regex")
});

/// Implements the string plumbing shared by every value object: accessors,
/// `Display`, `FromStr`, `TryFrom<String>` and `From<Self> for String`.
macro_rules! string_value {
    ($name:ident, $validate:path) => {
        impl $name {
            /// Validate and wrap a value.
            ///
            /// # Errors
            ///
            /// Returns `Validation` if the value does not satisfy the format rule.
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                $validate(&value)?;
                Ok(Self(value))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = SaveItError;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = SaveItError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// The one-line problem statement of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueStatement(String);

/// The longer description of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

/// A short label attached to issues. Ordered and compared by its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

/// Where a solution lives, e.g. `https://stackoverflow.com/q/123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SolutionLink(String);

/// A free-text note about a solution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Remark(String);

string_value!(IssueStatement, validate_statement);
string_value!(Description, validate_description);
string_value!(Tag, validate_tag);
string_value!(SolutionLink, validate_link);
string_value!(Remark, validate_remark);

/// Leading-character rule shared by statements and descriptions.
fn validate_leading_text(field: &str, value: &str) -> Result<()> {
    match value.chars().next() {
        None => Err(SaveItError::validation(field, "cannot be empty")),
        Some(c) if c.is_whitespace() => Err(SaveItError::validation(
            field,
            "cannot start with whitespace",
        )),
        Some(_) => Ok(()),
    }
}

fn validate_statement(value: &str) -> Result<()> {
    validate_leading_text("statement", value)
}

fn validate_description(value: &str) -> Result<()> {
    validate_leading_text("description", value)
}

fn validate_tag(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SaveItError::validation("tag", "cannot be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(SaveItError::validation("tag", "cannot contain whitespace"));
    }
    if value.chars().count() > MAX_TAG_LENGTH {
        return Err(SaveItError::validation(
            "tag",
            format!("exceeds {MAX_TAG_LENGTH} characters"),
        ));
    }
    Ok(())
}

fn validate_link(value: &str) -> Result<()> {
    if LINK_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(SaveItError::validation(
            "link",
            "must look like a URL (e.g. https://example.com/page)",
        ))
    }
}

fn validate_remark(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(SaveItError::validation("remark", "cannot be blank"))
    } else {
        Ok(())
    }
}
