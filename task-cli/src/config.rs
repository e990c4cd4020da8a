use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_PATH: &str = "db/tasks.json";
/// Looked up in the working directory with any extension the `config` crate understands.
pub const CONFIG_FILE_NAME: &str = "task-cli";

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub store: StoreConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StoreConfig {
    pub(crate) path: PathBuf,
}

impl StoreConfig {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Config {
    /// Defaults, overridden by an optional `task-cli.toml` in the working directory.
    pub fn new() -> anyhow::Result<Self> {
        let s = Self::builder()?
            .add_source(::config::File::with_name(CONFIG_FILE_NAME).required(false))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        let s = Self::builder()?
            .add_source(::config::File::from_str(toml_str, ::config::FileFormat::Toml))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn builder() -> anyhow::Result<::config::ConfigBuilder<::config::builder::DefaultState>> {
        Ok(::config::Config::builder().set_default("store.path", DEFAULT_STORE_PATH)?)
    }
}
