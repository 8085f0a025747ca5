//! Run-mode decision
//!
//! Before a population script touches its table it announces itself and
//! decides between a full rebuild and an incremental update. [`pre_run`]
//! makes that call from the run history and the caller's options, writing
//! the same banner the scripts have always printed.

use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core_types::CourseKey;
use crate::run_log::{LogStore, PopulationLog};

// 80 columns, the width the scripts have always printed
const RULE: &str = "--------------------------------------------------------------------------------";

/// How a population run should proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulateMode {
    /// Rebuild the table from scratch.
    Full,
    /// Update from the most recent recorded run.
    Incremental,
}

impl PopulateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PopulateMode::Full => "full",
            PopulateMode::Incremental => "incremental",
        }
    }
}

impl fmt::Display for PopulateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied options for one population run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulateOptions {
    /// Force a full run even when history would allow an incremental one.
    #[serde(default)]
    pub force: bool,
}

/// Outcome of the pre-run check.
#[derive(Debug, Clone, PartialEq)]
pub struct RunDecision {
    pub mode: PopulateMode,
    /// Wall-clock start of the run, taken before any history lookup.
    pub started_at: DateTime<Utc>,
    /// History consulted for the decision, newest first. Empty when the run
    /// was forced.
    pub prior_runs: Vec<PopulationLog>,
}

impl RunDecision {
    pub fn is_incremental(&self) -> bool {
        self.mode == PopulateMode::Incremental
    }
}

/// Decide whether a population run is full or incremental, announcing the
/// run on `out`. Every announcement line is framed by an 80-dash rule.
///
/// A forced run never consults history. Otherwise at least one recorded run
/// makes this run incremental from the most recent one, and an empty history
/// falls back to a full run.
///
/// # Errors
/// Fails when the log store query fails or `out` cannot be written.
pub fn pre_run<L: LogStore, W: Write>(
    script_id: &str,
    options: &PopulateOptions,
    course_id: &CourseKey,
    log_store: &L,
    out: &mut W,
) -> Result<RunDecision> {
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Populating queryable.{} table for course {}",
        script_id, course_id
    )?;
    writeln!(out, "{}", RULE)?;

    // Grab when we start, to log later
    let started_at = Utc::now();

    if options.force {
        writeln!(out, "{}", RULE)?;
        writeln!(out, "Full populate: Forced full populate")?;
        writeln!(out, "{}", RULE)?;
        tracing::info!("Forced full populate of {} for {}", script_id, course_id);
        return Ok(RunDecision {
            mode: PopulateMode::Full,
            started_at,
            prior_runs: Vec::new(),
        });
    }

    let prior_runs = log_store
        .query(script_id, course_id)
        .with_context(|| format!("querying run history of {} for {}", script_id, course_id))?;

    writeln!(out, "{}", RULE)?;
    let mode = match prior_runs.first() {
        Some(last) => {
            writeln!(out, "Iterative populate: Last log run {}", last.created)?;
            PopulateMode::Incremental
        }
        None => {
            writeln!(out, "Full populate: Can't find log of last run")?;
            PopulateMode::Full
        }
    };
    writeln!(out, "{}", RULE)?;
    tracing::info!("{} populate of {} for {}", mode, script_id, course_id);

    Ok(RunDecision {
        mode,
        started_at,
        prior_runs,
    })
}
