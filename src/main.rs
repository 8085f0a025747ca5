//! queryable_populate - Course analytics population runner
//!
//! Command-line front end for the population helpers:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│ Fixtures │───▶│ Pre-run  │───▶│ Course   │
//! │  (YAML)  │    │  (JSON)  │    │ decision │    │ mapping  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Loads a course tree and run history from JSON fixtures, runs the
//! full-vs-incremental pre-run check, and maps graded assignments to their
//! problems.

use std::io;
use std::time::Instant;

use queryable_populate::config::AppConfig;
use queryable_populate::core_types::CourseKey;
use queryable_populate::course_map::assignment_problem_map;
use queryable_populate::json_io::{load_content_store, load_log_store};
use queryable_populate::logging::init_logging;
use queryable_populate::populate::{pre_run, PopulateOptions};

// ============================================================
// COMMAND LINE
// ============================================================

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

fn get_course_arg() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--course" && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn get_script_id() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--script" && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "problem_answers".to_string()
}

fn use_force() -> bool {
    std::env::args().any(|a| a == "--force")
}

// ============================================================
// MAIN
// ============================================================

fn main() {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = init_logging(&config);

    tracing::info!("Starting queryable_populate in {} mode", env);

    let script_id = get_script_id();
    println!("=== queryable_populate: {} ===", script_id);

    let start_time = Instant::now();

    // Step 1: Load fixtures
    println!("[1] Loading fixtures...");
    let content =
        load_content_store(&config.fixtures.course_file).expect("Failed to load course fixture");
    let run_log =
        load_log_store(&config.fixtures.runs_file).expect("Failed to load run log fixture");

    // Step 2: Resolve target course
    println!("\n[2] Resolving course...");
    let course_id = match get_course_arg() {
        Some(raw) => raw
            .parse::<CourseKey>()
            .unwrap_or_else(|e| panic!("Invalid --course {}: {}", raw, e)),
        None => content
            .course_keys()
            .next()
            .expect("Course fixture is empty")
            .clone(),
    };
    println!("    Course: {}", course_id);

    // Step 3: Pre-run decision
    let options = PopulateOptions {
        force: use_force() || config.populate.force,
    };
    println!("\n[3] Pre-run check...");
    let decision = pre_run(
        &script_id,
        &options,
        &course_id,
        &run_log,
        &mut io::stdout().lock(),
    )
    .expect("Pre-run check failed");

    // Step 4: Map assignments to problems
    println!("\n[4] Mapping assignments to problems...");
    let map = assignment_problem_map(&content, &course_id).expect("Failed to map course");

    // Step 5: Summary
    let total_time = start_time.elapsed();
    println!("\n=== Population Summary ===");
    println!("Mode: {}", decision.mode);
    println!("Started at: {}", decision.started_at);
    println!("Prior runs: {}", decision.prior_runs.len());
    println!("Categories: {}", map.len());
    for (category, groups) in map.iter() {
        let problems: usize = groups.iter().map(Vec::len).sum();
        println!(
            "  {:<16} {} groups, {} problems",
            category,
            groups.len(),
            problems
        );
        if let Some(first) = groups.iter().flat_map(|g| g.iter()).next() {
            println!("      first problem: {}", first.url());
        }
    }
    println!("Total problems: {}", map.total_problems());
    println!("Total time: {:.2?}", total_time);

    println!("\n=== Done ===");
}
