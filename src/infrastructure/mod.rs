pub mod artifact_store;
#[path = "config/mod.rs"]
pub mod config_mod;
pub use config_mod as config;
pub mod csv;
pub mod linguistic_resources;
pub mod model_store;
