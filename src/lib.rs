pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{
    CleaningSummary, ModelTrainingUseCase, ReviewCleaningUseCase, SelfCheck, SentimentModel,
    TrainingReport,
};
pub use domain::error::{AppError, Result};
pub use domain::pipeline_config::{CleanerConfig, PipelineConfig, TrainerConfig};
