pub mod use_cases;

pub use use_cases::model_training::{ModelTrainingUseCase, SelfCheck, TrainingReport};
pub use use_cases::review_cleaning::{CleaningSummary, ReviewCleaningUseCase};
pub use use_cases::sentiment_model::SentimentModel;
