//! JSON snapshots of recorded gestures.

use directmanip_core::{GestureState, MotionEvent};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A touch stream and the states a recognizer went through while consuming it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Recording {
    /// Delivered events, in order
    pub events: Vec<MotionEvent>,
    /// Recorded states, starting with the state before the first event
    pub states: Vec<GestureState>,
}

impl Recording {
    /// Create a recording.
    pub fn new(events: Vec<MotionEvent>, states: Vec<GestureState>) -> Self {
        Self { events, states }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Snapshot comparison for [`Recording`]s.
///
/// Baselines live in `tests/snapshots/<name>.json` relative to the crate
/// under test. Set `SNAPSHOT_UPDATE=1` to write missing baselines.
pub struct Snapshot;

impl Snapshot {
    /// Compare a recording against its baseline.
    ///
    /// # Panics
    ///
    /// Panics if the baseline is missing (and not being created), unreadable,
    /// or differs from `actual`. A differing recording is written next to the
    /// baseline as `<name>.actual.json`.
    #[track_caller]
    pub fn assert_match(name: &str, actual: &Recording) {
        let baseline_path = Self::baseline_path(name);

        match std::fs::read_to_string(&baseline_path) {
            Ok(json) => {
                let baseline = Recording::from_json(&json).unwrap_or_else(|e| {
                    panic!("Invalid baseline {}: {e}", baseline_path.display())
                });
                if baseline != *actual {
                    let actual_path = Self::actual_path(name);
                    Self::save(&actual_path, actual);
                    panic!(
                        "Recording '{}' differs from its baseline\n\
                         Baseline: {}\n\
                         Actual: {}\n\
                         Expected states: {:?}\n\
                         Actual states: {:?}",
                        name,
                        baseline_path.display(),
                        actual_path.display(),
                        baseline.states,
                        actual.states
                    );
                }
            }
            Err(_) if std::env::var("SNAPSHOT_UPDATE").is_ok() => {
                Self::save(&baseline_path, actual);
                println!("Created new baseline: {}", baseline_path.display());
            }
            Err(_) => panic!(
                "No baseline found for '{}'. Run with SNAPSHOT_UPDATE=1 to create.\n\
                 Expected path: {}",
                name,
                baseline_path.display()
            ),
        }
    }

    fn baseline_path(name: &str) -> PathBuf {
        PathBuf::from(format!("tests/snapshots/{name}.json"))
    }

    fn actual_path(name: &str) -> PathBuf {
        PathBuf::from(format!("tests/snapshots/{name}.actual.json"))
    }

    fn save(path: &Path, recording: &Recording) {
        let json = match recording.to_json() {
            Ok(json) => json,
            Err(e) => panic!("Cannot serialize recording: {e}"),
        };
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Err(e) = std::fs::write(path, json) {
            panic!("Cannot write {}: {e}", path.display());
        }
    }
}
