use serde::{Deserialize, Serialize};
use std::fs;

use crate::json_io;
use crate::populate::PopulateOptions;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Default run options, overridable from the command line.
    #[serde(default)]
    pub populate: PopulateOptions,
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FixturesConfig {
    pub course_file: String,
    pub runs_file: String,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            course_file: json_io::COURSE_FIXTURE_JSON.to_string(),
            runs_file: json_io::RUN_LOG_FIXTURE_JSON.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_yaml_fills_defaults() {
        let yaml = r#"
log_level: info
log_dir: logs
log_file: populate.log
use_json: false
rotation: daily
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.populate.force);
        assert_eq!(config.fixtures.course_file, json_io::COURSE_FIXTURE_JSON);
        assert_eq!(config.fixtures.runs_file, json_io::RUN_LOG_FIXTURE_JSON);
    }

    #[test]
    fn test_shipped_config_files_parse() {
        for env in ["dev", "prod"] {
            let path = format!("{}/config/{}.yaml", env!("CARGO_MANIFEST_DIR"), env);
            let raw = fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing {}: {}", path, e));
            let config: AppConfig =
                serde_yaml::from_str(&raw).unwrap_or_else(|e| panic!("invalid {}: {}", path, e));

            assert!(!config.populate.force, "{} must not force full runs", path);
            assert!(!config.fixtures.course_file.is_empty());
            assert!(!config.fixtures.runs_file.is_empty());
        }
    }

    #[test]
    fn test_explicit_sections_override_defaults() {
        let yaml = r#"
log_level: debug
log_dir: logs
log_file: populate.log
use_json: true
rotation: hourly
populate:
  force: true
fixtures:
  course_file: fixtures/other_courses.json
  runs_file: fixtures/other_runs.json
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.populate.force);
        assert_eq!(config.fixtures.course_file, "fixtures/other_courses.json");
    }
}
