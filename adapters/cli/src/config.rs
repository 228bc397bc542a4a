use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use wrapper_world::RobotLoadout;

/// Optional settings read from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Body configuration applied to the robot when the map is parsed.
    pub(crate) loadout: RobotLoadout,
}

impl CliConfig {
    /// Loads the configuration stored at `path`.
    pub(crate) fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(contents).context("failed to parse config toml contents")?;
        if let Some(duplicate) = first_duplicate(&config.loadout) {
            bail!(
                "loadout declares tentacle ({}, {}) more than once",
                duplicate.x,
                duplicate.y
            );
        }
        Ok(config)
    }
}

fn first_duplicate(loadout: &RobotLoadout) -> Option<wrapper_core::Point> {
    loadout
        .tentacles
        .iter()
        .enumerate()
        .find(|(index, tentacle)| loadout.tentacles[..*index].contains(tentacle))
        .map(|(_, tentacle)| *tentacle)
}
