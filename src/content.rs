//! Course content access
//!
//! Population scripts walk a course tree that some modulestore hands them.
//! This module defines the read-only view they walk: block metadata, the
//! [`ContentBlock`] tree interface, the [`ContentStore`] seam behind which
//! the real store lives, and an in-memory store for fixtures and tests.

use anyhow::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core_types::{BlockLocation, CourseKey};

/// Metadata key marking a block as graded.
pub const META_GRADED: &str = "graded";
/// Metadata key carrying the assignment format, e.g. "Homework".
pub const META_FORMAT: &str = "format";

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug, PartialEq)]
pub enum ContentError {
    #[error("course {course} not found in content store")]
    CourseNotFound { course: CourseKey },

    #[error("graded subsection {location} has no assignment format")]
    MissingFormat { location: BlockLocation },
}

// ============================================================================
// Block metadata
// ============================================================================

/// Free-form block metadata, keyed by string.
///
/// Only two keys matter to the population scripts, [`META_GRADED`] and
/// [`META_FORMAT`]; everything else rides along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockMetadata(serde_json::Map<String, Value>);

impl BlockMetadata {
    pub fn new() -> Self {
        Self(serde_json::Map::new())
    }

    /// Whether the block is graded. Only a literal boolean `true` counts;
    /// absent, `false`, or non-boolean values all read as ungraded.
    pub fn graded(&self) -> bool {
        matches!(self.0.get(META_GRADED), Some(Value::Bool(true)))
    }

    /// The assignment format label, if one is set to a string value.
    pub fn format(&self) -> Option<&str> {
        self.0.get(META_FORMAT).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }
}

// ============================================================================
// Content tree
// ============================================================================

/// Read-only view of one block in a course tree.
pub trait ContentBlock {
    fn location(&self) -> &BlockLocation;

    fn metadata(&self) -> &BlockMetadata;

    fn children(&self) -> &[Self]
    where
        Self: Sized;

    /// Block category, e.g. "sequential" or "problem".
    fn category(&self) -> &str {
        self.location().category()
    }
}

/// Owned course tree node, as loaded from fixtures or built in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseNode {
    location: BlockLocation,
    metadata: BlockMetadata,
    children: Vec<CourseNode>,
}

impl CourseNode {
    pub fn new(location: BlockLocation) -> Self {
        Self {
            location,
            metadata: BlockMetadata::new(),
            children: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: BlockMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_child(mut self, child: CourseNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: CourseNode) {
        self.children.push(child);
    }
}

impl ContentBlock for CourseNode {
    fn location(&self) -> &BlockLocation {
        &self.location
    }

    fn metadata(&self) -> &BlockMetadata {
        &self.metadata
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

// ============================================================================
// Content store
// ============================================================================

/// Seam behind which the real course store lives.
///
/// `depth` tells the store how many tree levels the caller is going to walk,
/// so a backing store can prefetch that far. Stores that already hold full
/// trees may ignore it.
pub trait ContentStore {
    type Block: ContentBlock;

    /// Fetch the root block of `course_id`.
    ///
    /// # Errors
    /// Returns [`ContentError::CourseNotFound`] when the store has no such
    /// course; backends may also fail with their own I/O errors.
    fn get_course(&self, course_id: &CourseKey, depth: usize) -> Result<&Self::Block>;
}

/// In-memory [`ContentStore`] holding fully materialized course trees.
///
/// Courses iterate in insertion order; re-adding a course replaces its tree
/// without moving it in that order.
#[derive(Debug)]
pub struct MemoryContentStore {
    courses: FxHashMap<CourseKey, CourseNode>,
    order: Vec<CourseKey>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self {
            courses: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn add_course(&mut self, course_id: CourseKey, root: CourseNode) {
        if self.courses.insert(course_id.clone(), root).is_none() {
            self.order.push(course_id);
        }
    }

    /// Course keys in insertion order.
    pub fn course_keys(&self) -> impl Iterator<Item = &CourseKey> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for MemoryContentStore {
    type Block = CourseNode;

    fn get_course(&self, course_id: &CourseKey, _depth: usize) -> Result<&CourseNode> {
        let root = self.courses.get(course_id).ok_or_else(|| ContentError::CourseNotFound {
            course: course_id.clone(),
        })?;
        Ok(root)
    }
}
