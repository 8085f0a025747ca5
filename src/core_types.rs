//! Core identifier types used throughout the crate
//!
//! Course keys and block locations are the only identifiers the population
//! helpers touch. Both are validated string forms owned by the platform, not
//! by this crate; fields are private so construction always goes through the
//! parsing/validation path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Allowed charset for key segments: ASCII alphanumerics plus `_ . -`
fn valid_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Validation errors for course keys
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("course key must be org/course/run: got '{got}'")]
    SegmentCount { got: String },

    #[error("course key {field} segment is empty")]
    EmptySegment { field: &'static str },

    #[error("course key {field} segment '{value}' has characters outside [A-Za-z0-9_.-]")]
    InvalidSegment { field: &'static str, value: String },
}

fn check_segment(field: &'static str, value: &str) -> Result<(), KeyError> {
    if value.is_empty() {
        return Err(KeyError::EmptySegment { field });
    }
    if !value.chars().all(valid_segment_char) {
        return Err(KeyError::InvalidSegment {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// CourseKey - org/course/run triple
// ============================================================================

/// Validated course identifier (`org/course/run`, e.g. `MITx/6.002x/2012_Fall`).
///
/// Fields are private to force validation through [`CourseKey::new`] or
/// [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseKey {
    org: String,
    course: String,
    run: String,
}

impl CourseKey {
    /// Create a validated CourseKey from its three segments.
    ///
    /// # Errors
    /// Returns [`KeyError`] when a segment is empty or carries characters
    /// outside the allowed charset.
    pub fn new(org: &str, course: &str, run: &str) -> Result<Self, KeyError> {
        check_segment("org", org)?;
        check_segment("course", course)?;
        check_segment("run", run)?;

        Ok(Self {
            org: org.to_string(),
            course: course.to_string(),
            run: run.to_string(),
        })
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn run(&self) -> &str {
        &self.run
    }

    /// Build the location of a block inside this course.
    pub fn location(&self, category: &str, name: &str) -> BlockLocation {
        BlockLocation::new(&self.org, &self.course, category, name)
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.org, self.course, self.run)
    }
}

impl FromStr for CourseKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 3 {
            return Err(KeyError::SegmentCount { got: s.to_string() });
        }
        Self::new(parts[0], parts[1], parts[2])
    }
}

impl Serialize for CourseKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CourseKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

// ============================================================================
// BlockLocation - per-node identifier
// ============================================================================

/// Location of one block inside a course tree.
///
/// The `Display`/[`url`](BlockLocation::url) form
/// `i4x://org/course/category/name` is the problem-identifier format that
/// downstream analytics consumers receive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockLocation {
    org: String,
    course: String,
    category: String,
    name: String,
}

impl BlockLocation {
    pub fn new(org: &str, course: &str, category: &str, name: &str) -> Self {
        Self {
            org: org.to_string(),
            course: course.to_string(),
            category: category.to_string(),
            name: name.to_string(),
        }
    }

    /// Block category label (e.g. "subsection", "problem").
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Block name, unique within (course, category).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Legacy URL form of this location.
    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BlockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "i4x://{}/{}/{}/{}",
            self.org, self.course, self.category, self.name
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
