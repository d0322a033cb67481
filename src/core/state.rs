//! Application state shared by the command handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use crate::utils::DEFAULT_OUTPUT_ROOT;

/// Application state held by the front end for its whole lifetime.
///
/// Tracks where output goes and whether the output folder is worth
/// opening: it becomes available after a batch writes at least one file
/// and unavailable again after a clear.
#[derive(Clone, Debug)]
pub struct AppState {
    output_root: Arc<PathBuf>,
    output_available: Arc<AtomicBool>,
}

impl AppState {
    /// Creates state for `output_root` with the open-output action disabled.
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        let output_root = output_root.into();
        debug!("AppState initialized (output root: {})", output_root.display());
        Self {
            output_root: Arc::new(output_root),
            output_available: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Whether the open-output action should be enabled.
    pub fn output_available(&self) -> bool {
        self.output_available.load(Ordering::SeqCst)
    }

    /// Overrides availability, e.g. when a front end restores it from disk.
    pub fn set_output_available(&self, available: bool) {
        self.output_available.store(available, Ordering::SeqCst);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unavailable_and_shares_flag_between_clones() {
        let state = AppState::default();
        assert_eq!(state.output_root(), Path::new("converted"));
        assert!(!state.output_available());

        let clone = state.clone();
        clone.set_output_available(true);
        assert!(state.output_available());
    }
}
