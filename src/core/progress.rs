use serde::{Deserialize, Serialize};

/// Progress message type
#[derive(Debug, Deserialize, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProgressType {
    Start,
    Progress,
    Complete,
    Error,
}

/// Unified progress struct reported while a batch runs.
///
/// One `Start` carrying the total, one `Progress` or `Error` per finished
/// unit, then one `Complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Progress type (start, progress, complete, error)
    pub progress_type: ProgressType,
    /// Number of finished units, failed ones included
    pub completed_tasks: usize,
    /// Total number of units in the batch
    pub total_tasks: usize,
    /// Progress percentage (0-100)
    pub progress_percentage: usize,
    /// Current status message
    pub status: String,
    /// Output path of the unit this update is about
    #[serde(default)]
    pub task_id: Option<String>,
    /// Error message for failed units
    #[serde(default)]
    pub error: Option<String>,
}

impl Progress {
    /// Create a new Progress instance with basic information
    pub fn new(
        progress_type: ProgressType,
        completed_tasks: usize,
        total_tasks: usize,
        status: &str,
    ) -> Self {
        let progress_percentage = if total_tasks > 0 {
            (completed_tasks * 100) / total_tasks
        } else {
            0
        };

        Self {
            progress_type,
            completed_tasks,
            total_tasks,
            progress_percentage,
            status: status.to_string(),
            task_id: None,
            error: None,
        }
    }

    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn is_complete(&self) -> bool {
        self.progress_type == ProgressType::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_floored_and_safe_for_empty_batches() {
        assert_eq!(Progress::new(ProgressType::Progress, 1, 3, "").progress_percentage, 33);
        assert_eq!(Progress::new(ProgressType::Complete, 3, 3, "").progress_percentage, 100);
        assert_eq!(Progress::new(ProgressType::Start, 0, 0, "").progress_percentage, 0);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(
            Progress::new(ProgressType::Error, 2, 4, "error").with_error("boom"),
        )
        .unwrap();
        assert_eq!(json["progressType"], "error");
        assert_eq!(json["completedTasks"], 2);
        assert_eq!(json["progressPercentage"], 50);
        assert_eq!(json["error"], "boom");
    }
}
