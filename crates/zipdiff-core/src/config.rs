use std::collections::HashMap;

use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Exactly two descriptors, left then right; each may be a
    /// comma-separated list of archive references merged into one side.
    #[serde(default)]
    pub resources: Vec<String>,
    /// Absolute-path regex patterns excluding entries from comparison.
    #[serde(default)]
    pub filters: Vec<String>,
    /// Expectation pattern lists and the diff mode, under the fixed keys
    /// expectAdds / expectRemoves / expectChanges / expectUnchanges /
    /// diffVersion.
    #[serde(default)]
    pub params: HashMap<String, String>,
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
