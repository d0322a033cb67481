use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::{
    plan_image, total_units, BatchReport, ConversionSettings, Progress, ProgressType,
};
use crate::processing::imaging::{decode_input, execute_task, failed_result};

/// Fans inputs out across formats and crop variants, one unit at a time.
pub struct BatchProcessor {
    settings: ConversionSettings,
}

impl BatchProcessor {
    /// Creates a processor bound to one fixed set of settings
    pub fn new(settings: ConversionSettings) -> Self {
        let ratios: Vec<String> = settings
            .ratios()
            .iter()
            .map(|r| format!("{r} ({:.3})", r.value()))
            .collect();
        debug!(
            "Creating BatchProcessor: formats={:?}, ratios={:?}, quality={}, root={}",
            settings.formats(),
            ratios,
            settings.quality(),
            settings.output_root().display()
        );
        Self { settings }
    }

    /// Converts every input synchronously, reporting progress after each unit.
    ///
    /// The total is published in a `Start` event before any work. Unit
    /// failures, including an undecodable input, are recorded in the report
    /// and never stop the batch.
    pub fn process_batch<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        mut progress_callback: impl FnMut(&Progress),
    ) -> BatchReport {
        let total = total_units(inputs.len(), &self.settings);
        info!("Converting {} images into {} files", inputs.len(), total);
        progress_callback(&Progress::new(ProgressType::Start, 0, total, "Converting..."));

        let mut report = BatchReport {
            results: Vec::with_capacity(total),
        };
        let quality = self.settings.quality();

        for input in inputs {
            let input = input.as_ref();
            let tasks = plan_image(input, &self.settings);

            let original = match decode_input(input) {
                Ok(image) => image,
                Err(e) => {
                    warn!("Skipping {}: {}", input.display(), e);
                    for task in &tasks {
                        report.results.push(failed_result(task, &e));
                        progress_callback(
                            &Progress::new(ProgressType::Error, report.total(), total, "error")
                                .with_task_id(task.output_path.to_string_lossy())
                                .with_error(e.to_string()),
                        );
                    }
                    continue;
                }
            };

            for task in &tasks {
                let result = execute_task(&original, task, quality);
                let task_id = result.output_path.to_string_lossy().to_string();
                let update = match &result.error {
                    None => Progress::new(ProgressType::Progress, report.total() + 1, total, "processing"),
                    Some(error) => Progress::new(ProgressType::Error, report.total() + 1, total, "error")
                        .with_error(error.clone()),
                };
                report.results.push(result);
                progress_callback(&update.with_task_id(task_id));
            }
        }

        if report.failed() > 0 {
            warn!(
                "Batch completed with {} failed units out of {}",
                report.failed(),
                report.total()
            );
        } else {
            info!("Done: {} files written", report.succeeded());
        }
        progress_callback(&Progress::new(ProgressType::Complete, report.total(), total, "Done"));

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ImageFormat;

    #[test]
    fn undecodable_input_fails_its_units_and_keeps_progress_in_step() {
        let tmp = tempfile::tempdir().unwrap();
        let bogus = tmp.path().join("bogus.png");
        std::fs::write(&bogus, b"not an image").unwrap();

        let settings = ConversionSettings::new([ImageFormat::PNG, ImageFormat::JPEG], [], 81)
            .unwrap()
            .with_output_root(tmp.path().join("converted"));
        let processor = BatchProcessor::new(settings);

        let mut events = Vec::new();
        let report = processor.process_batch(&[&bogus], |p| events.push(p.clone()));

        assert_eq!(report.total(), 2);
        assert_eq!(report.failed(), 2);
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].progress_type, ProgressType::Start);
        assert_eq!(events[0].total_tasks, 2);
        assert_eq!(events[1].progress_type, ProgressType::Error);
        assert_eq!(events[2].completed_tasks, 2);
        assert!(events[3].is_complete());
        assert!(!tmp.path().join("converted").exists());
    }
}
