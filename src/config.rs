use serde::Deserialize;

use crate::render::RenderOptions;

pub const DEFAULT_CONFIG_FILE: &str = "vietqr";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Conf {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub render: RenderOptions,
}

impl Conf {
    /// Loads `<path>.toml` if present, then `VIETQR_*` environment
    /// overrides (`VIETQR_RENDER__SCALE=4`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::with_name(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("VIETQR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
