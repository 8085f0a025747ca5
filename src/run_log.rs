//! Population run history
//!
//! Every finished population run leaves one [`PopulationLog`] row behind.
//! The pre-run check reads that history through the [`LogStore`] seam to
//! decide between a full and an incremental run.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core_types::CourseKey;

/// One recorded population run of a script over a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationLog {
    pub script_id: String,
    pub course_id: CourseKey,
    pub created: DateTime<Utc>,
}

impl PopulationLog {
    pub fn new(script_id: impl Into<String>, course_id: CourseKey, created: DateTime<Utc>) -> Self {
        Self {
            script_id: script_id.into(),
            course_id,
            created,
        }
    }
}

/// Seam behind which the run-history table lives.
pub trait LogStore {
    /// Records for `script_id` over `course_id`, newest first.
    ///
    /// # Errors
    /// Backends may fail with their own I/O errors; an empty history is not
    /// an error.
    fn query(&self, script_id: &str, course_id: &CourseKey) -> Result<Vec<PopulationLog>>;
}

/// In-memory [`LogStore`] for fixtures and tests.
#[derive(Debug)]
pub struct MemoryLogStore {
    records: Vec<PopulationLog>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, log: PopulationLog) {
        self.records.push(log);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryLogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStore for MemoryLogStore {
    fn query(&self, script_id: &str, course_id: &CourseKey) -> Result<Vec<PopulationLog>> {
        let mut matches: Vec<PopulationLog> = self
            .records
            .iter()
            .filter(|log| log.script_id == script_id && &log.course_id == course_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn key() -> CourseKey {
        CourseKey::new("MITx", "6.002x", "2024_Spring").unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_query_filters_by_script_and_course() {
        let other_key = CourseKey::new("HarvardX", "CS50", "2024").unwrap();
        let mut store = MemoryLogStore::new();
        store.record(PopulationLog::new("problem_answers", key(), at(1, 0)));
        store.record(PopulationLog::new("grades", key(), at(2, 0)));
        store.record(PopulationLog::new("problem_answers", other_key, at(3, 0)));

        let logs = store.query("problem_answers", &key()).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].created, at(1, 0));
    }

    #[test]
    fn test_query_returns_newest_first() {
        let mut store = MemoryLogStore::new();
        store.record(PopulationLog::new("problem_answers", key(), at(2, 12)));
        store.record(PopulationLog::new("problem_answers", key(), at(5, 8)));
        store.record(PopulationLog::new("problem_answers", key(), at(4, 23)));

        let logs = store.query("problem_answers", &key()).unwrap();
        let days: Vec<u32> = logs.iter().map(|l| l.created.day()).collect();
        assert_eq!(days, vec![5, 4, 2]);
    }

    #[test]
    fn test_query_empty_history() {
        let store = MemoryLogStore::new();
        let logs = store.query("problem_answers", &key()).unwrap();
        assert!(logs.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_log_serde_round_trip() {
        let log = PopulationLog::new("problem_answers", key(), at(1, 6));
        let encoded = serde_json::to_string(&log).unwrap();
        let decoded: PopulationLog = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, log);
    }

    #[test]
    fn test_log_decodes_rfc3339() {
        let raw = r#"{
            "script_id": "problem_answers",
            "course_id": "MITx/6.002x/2024_Spring",
            "created": "2024-03-01T06:00:00Z"
        }"#;
        let log: PopulationLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.course_id, key());
        assert_eq!(log.created, at(1, 6));
    }
}
