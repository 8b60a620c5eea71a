pub mod error;
pub mod pipeline_config;
pub mod review;
