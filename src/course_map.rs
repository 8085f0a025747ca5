//! Assignment-to-problem mapping
//!
//! The answer-distribution population script needs to know, per assignment
//! category ("Homework", "Lab", ...), which problems each graded unit holds.
//! [`assignment_problem_map`] walks a course tree and builds exactly that.

use anyhow::Result;
use rustc_hash::FxHashMap;

use crate::content::{ContentBlock, ContentError, ContentStore};
use crate::core_types::{BlockLocation, CourseKey};

/// Tree depth the mapper walks: course, section, subsection, unit.
pub const COURSE_TREE_DEPTH: usize = 4;

/// Block category counted as a problem.
pub const PROBLEM_CATEGORY: &str = "problem";

/// Problem locations of one unit, in authored order.
pub type ProblemGroup = Vec<BlockLocation>;

#[derive(Debug, Clone, PartialEq)]
struct AssignmentEntry {
    category: String,
    groups: Vec<ProblemGroup>,
}

/// Problems of one course, keyed by assignment category.
///
/// Categories keep first-seen order. Within a category, every unit of a
/// graded subsection contributes one group in traversal order, kept even
/// when empty so groups stay aligned with units.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentProblemMap {
    entries: Vec<AssignmentEntry>,
    index: FxHashMap<String, usize>,
}

impl AssignmentProblemMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    fn ensure_category(&mut self, category: &str) -> usize {
        if let Some(&idx) = self.index.get(category) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(AssignmentEntry {
            category: category.to_string(),
            groups: Vec::new(),
        });
        self.index.insert(category.to_string(), idx);
        idx
    }

    /// Append one unit's problem group under `category`, creating the
    /// category on first use.
    pub fn push_group(&mut self, category: &str, group: ProblemGroup) {
        let idx = self.ensure_category(category);
        self.entries[idx].groups.push(group);
    }

    /// Groups recorded under `category`, or `None` for an unknown category.
    pub fn groups(&self, category: &str) -> Option<&[ProblemGroup]> {
        let &idx = self.index.get(category)?;
        Some(&self.entries[idx].groups)
    }

    /// Categories in first-seen order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ProblemGroup])> {
        self.entries
            .iter()
            .map(|e| (e.category.as_str(), e.groups.as_slice()))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_groups(&self) -> usize {
        self.entries.iter().map(|e| e.groups.len()).sum()
    }

    pub fn total_problems(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|e| e.groups.iter())
            .map(Vec::len)
            .sum()
    }
}

impl Default for AssignmentProblemMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the assignment-to-problem map for one course.
///
/// Walks the tree [`COURSE_TREE_DEPTH`] levels deep, keeping only graded
/// subsections. Each unit of a graded subsection contributes one group with
/// the locations of its [`PROBLEM_CATEGORY`] children; a graded subsection
/// with no units still registers its category.
///
/// # Errors
/// Fails when the course is missing from the store, or when a graded
/// subsection carries no assignment format.
pub fn assignment_problem_map<S: ContentStore>(
    store: &S,
    course_id: &CourseKey,
) -> Result<AssignmentProblemMap> {
    let course = store.get_course(course_id, COURSE_TREE_DEPTH)?;

    let mut map = AssignmentProblemMap::new();
    for section in course.children() {
        for subsection in section.children() {
            if !subsection.metadata().graded() {
                continue;
            }
            let format =
                subsection
                    .metadata()
                    .format()
                    .ok_or_else(|| ContentError::MissingFormat {
                        location: subsection.location().clone(),
                    })?;
            map.ensure_category(format);

            for unit in subsection.children() {
                let problems: ProblemGroup = unit
                    .children()
                    .iter()
                    .filter(|child| child.category() == PROBLEM_CATEGORY)
                    .map(|child| child.location().clone())
                    .collect();
                map.push_group(format, problems);
            }
        }
    }

    tracing::debug!(
        "Mapped {} categories, {} problems for course {}",
        map.len(),
        map.total_problems(),
        course_id
    );

    Ok(map)
}
