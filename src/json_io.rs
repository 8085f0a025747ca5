//! JSON I/O - Load course trees and run history from JSON fixtures
//!
//! Real deployments sit behind a modulestore and a relational log table.
//! The fixture files give the command-line runner and the tests the same
//! data shape without either backend.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::content::{BlockMetadata, CourseNode, MemoryContentStore};
use crate::core_types::CourseKey;
use crate::run_log::{MemoryLogStore, PopulationLog};

// ============================================================
// Constants for file paths
// ============================================================

pub const COURSE_FIXTURE_JSON: &str = "fixtures/course_demo.json";
pub const RUN_LOG_FIXTURE_JSON: &str = "fixtures/run_log.json";

// ============================================================
// Fixture schema
// ============================================================

#[derive(Debug, Deserialize)]
struct CourseFile {
    org: String,
    course: String,
    run: String,
    root: RawBlock,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    category: String,
    name: String,
    #[serde(default)]
    metadata: BlockMetadata,
    #[serde(default)]
    children: Vec<RawBlock>,
}

fn build_node(course_id: &CourseKey, raw: RawBlock) -> CourseNode {
    let mut node =
        CourseNode::new(course_id.location(&raw.category, &raw.name)).with_metadata(raw.metadata);
    for child in raw.children {
        node.push_child(build_node(course_id, child));
    }
    node
}

// ============================================================
// Loading
// ============================================================

/// Load course trees from a JSON fixture into a [`MemoryContentStore`].
///
/// # Errors
/// Fails when the file cannot be read, is not valid JSON, or names an
/// invalid course key.
pub fn load_content_store(path: &str) -> Result<MemoryContentStore> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let courses: Vec<CourseFile> =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path))?;

    let mut store = MemoryContentStore::new();
    for course in courses {
        let course_id = CourseKey::new(&course.org, &course.course, &course.run)
            .with_context(|| format!("Invalid course key in {}", path))?;
        let root = build_node(&course_id, course.root);
        store.add_course(course_id, root);
    }

    println!("Loaded {} courses from {}", store.len(), path);
    Ok(store)
}

/// Load run-history records from a JSON fixture into a [`MemoryLogStore`].
///
/// # Errors
/// Fails when the file cannot be read or is not valid JSON.
pub fn load_log_store(path: &str) -> Result<MemoryLogStore> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let records: Vec<PopulationLog> =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path))?;

    let mut store = MemoryLogStore::new();
    let count = records.len();
    for record in records {
        store.record(record);
    }

    println!("Loaded {} run log records from {}", count, path);
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBlock, ContentStore};
    use crate::course_map::{assignment_problem_map, COURSE_TREE_DEPTH};
    use crate::run_log::LogStore;
    use chrono::{TimeZone, Utc};

    fn fixture_path(rel: &str) -> String {
        format!("{}/{}", env!("CARGO_MANIFEST_DIR"), rel)
    }

    fn scratch_file(tag: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!(
            "queryable_populate_{}_{}.json",
            tag,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_shipped_course_fixture() {
        let store = load_content_store(&fixture_path(COURSE_FIXTURE_JSON)).unwrap();
        assert_eq!(store.len(), 2);

        let first = store.course_keys().next().unwrap().clone();
        assert_eq!(first.to_string(), "MITx/6.002x/2024_Spring");

        let root = store.get_course(&first, COURSE_TREE_DEPTH).unwrap();
        assert_eq!(root.category(), "course");
        assert!(!root.children().is_empty());

        let map = assignment_problem_map(&store, &first).unwrap();
        let categories: Vec<&str> = map.categories().collect();
        assert_eq!(categories, vec!["Homework", "Lab", "Exam"]);
        assert_eq!(map.total_problems(), 4);
    }

    #[test]
    fn test_load_shipped_run_log_fixture() {
        let store = load_log_store(&fixture_path(RUN_LOG_FIXTURE_JSON)).unwrap();
        assert!(!store.is_empty());

        let key = CourseKey::new("MITx", "6.002x", "2024_Spring").unwrap();
        let logs = store.query("problem_answers", &key).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(
            logs[0].created,
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_file_fails() {
        let err = load_content_store("fixtures/does_not_exist.json").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read"));
    }

    #[test]
    fn test_malformed_json_fails() {
        let path = scratch_file("malformed", "{not json");
        let err = load_content_store(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_course_key_fails() {
        let path = scratch_file(
            "badkey",
            r#"[{"org": "bad org", "course": "x", "run": "y",
                "root": {"category": "course", "name": "y"}}]"#,
        );
        let err = load_content_store(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid course key"));
        let _ = fs::remove_file(&path);
    }
}
