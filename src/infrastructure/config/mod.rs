use std::path::Path;

use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use validator::Validate;

use crate::domain::error::Result;
use crate::domain::pipeline_config::PipelineConfig;

/// Optional override file, looked up in the working directory
pub const CONFIG_FILE: &str = "ulasan.toml";

pub fn load_pipeline_config() -> Result<PipelineConfig> {
    load_pipeline_config_from(Path::new(CONFIG_FILE))
}

/// Compile-time defaults, overridden by `path` when it exists.
pub fn load_pipeline_config_from(path: &Path) -> Result<PipelineConfig> {
    if path.is_file() {
        tracing::info!(path = %path.display(), "Loading configuration overrides");
    }

    let config: PipelineConfig = Figment::from(Serialized::defaults(PipelineConfig::default()))
        .merge(Toml::file(path))
        .extract()?;

    config.validate()?;
    Ok(config)
}
