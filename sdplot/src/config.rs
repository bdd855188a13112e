//! Settings shared by every subcommand.
//!
//! Values are merged from, in increasing precedence: the defaults, an optional
//! TOML (or any format the `config` crate recognizes) file, and environment
//! variables of the form `APP_<SECTION>__<KEY>`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use surplus_render::RenderConfig;
use surplus_solver::SamplingConfig;

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AppConfig {
    /// Grid resolution for integration, the optimum search and plotting
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Image size and font sizes
    #[serde(default)]
    pub render: RenderConfig,
}

impl AppConfig {
    /// Load the configuration, e.g.
    ///
    /// ```bash
    /// export APP_SAMPLING__STEP=0.01
    /// export APP_RENDER__WIDTH=1024
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with(path, config::Environment::with_prefix("APP"))
    }

    pub(crate) fn load_with(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // APP_RENDER__FONT_SIZE maps to render.font_size
        config = config.add_source(
            environment
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
