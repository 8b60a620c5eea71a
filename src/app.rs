use tracing::error;

use crate::application::{
    CleaningSummary, ModelTrainingUseCase, ReviewCleaningUseCase, TrainingReport,
};
use crate::domain::error::Result;
use crate::infrastructure::config::load_pipeline_config;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}

/// Entry point of the `clean-reviews` binary.
pub fn run_cleaner() -> Result<CleaningSummary> {
    init_tracing();

    load_pipeline_config()
        .and_then(|config| ReviewCleaningUseCase::new(config.cleaner).run())
        .map_err(|err| {
            error!(error = %err, "Review cleaning failed");
            err
        })
}

/// Entry point of the `retrain-model` binary.
pub fn run_trainer() -> Result<TrainingReport> {
    init_tracing();

    load_pipeline_config()
        .and_then(|config| ModelTrainingUseCase::new(config.trainer).run())
        .map_err(|err| {
            error!(error = %err, "Model retraining failed");
            err
        })
}
