//! Command handlers for image conversion.

use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::core::{AppState, BatchReport, ConversionSettings, Progress};
use crate::processing::BatchProcessor;
use crate::utils::{accept_inputs, clear_output_dir, dir_exists, ConverterError, ConverterResult};

/// Converts a batch of dropped files.
///
/// Paths without an accepted image extension are skipped silently. Output
/// goes under the state's output root, whatever root `settings` carries.
/// The batch runs on one blocking thread, one unit after another.
///
/// # Returns
/// The batch report with one entry per unit. An empty report means nothing
/// was accepted.
pub async fn convert_images<P: AsRef<Path>>(
    state: &AppState,
    paths: &[P],
    settings: ConversionSettings,
    progress_callback: impl FnMut(&Progress) + Send + 'static,
) -> ConverterResult<BatchReport> {
    let inputs = accept_inputs(paths);
    debug!("Accepted {} of {} dropped paths", inputs.len(), paths.len());
    if inputs.is_empty() {
        return Ok(BatchReport::default());
    }

    let processor = BatchProcessor::new(settings.with_output_root(state.output_root()));
    let report = tokio::task::spawn_blocking(move || processor.process_batch(inputs.as_slice(), progress_callback))
        .await
        .map_err(|e| ConverterError::processing(format!("Batch panicked: {e}")))?;

    if report.any_written() {
        state.set_output_available(true);
    }
    Ok(report)
}

/// Deletes the whole output tree and disables the open-output action.
///
/// # Returns
/// `true` when something was deleted; a missing tree is not an error.
pub async fn clear_output(state: &AppState) -> ConverterResult<bool> {
    let removed = clear_output_dir(state.output_root()).await?;
    state.set_output_available(false);
    info!("Cleared {}", state.output_root().display());
    Ok(removed)
}

/// Opens the output tree in the desktop file browser.
///
/// Fails with [`ConverterError::OutputUnavailable`] until a batch has
/// written something since the last clear.
pub async fn open_output(state: &AppState) -> ConverterResult<PathBuf> {
    let root = state.output_root();
    if !state.output_available() || !dir_exists(root).await {
        return Err(ConverterError::output_unavailable(format!(
            "nothing converted into {} yet",
            root.display()
        )));
    }

    let absolute = std::path::absolute(root)?;
    debug!("Opening {}", absolute.display());
    open::that_detached(&absolute)
        .map_err(|e| ConverterError::io(format!("Failed to open {}: {e}", absolute.display())))?;
    Ok(absolute)
}
