//! Layered configuration: built-in defaults, an optional TOML file, then
//! `METALOOKUP__<SECTION>__<KEY>` environment variables.

use anyhow::{Context, Result};
use metalookup_common::Config;
use std::path::Path;

pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(true),
        );
    }
    builder = builder.add_source(
        config::Environment::with_prefix("METALOOKUP")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize::<Config>()
        .context("Invalid configuration")
}
