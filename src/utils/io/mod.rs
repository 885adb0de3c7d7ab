// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::Path;

use anyhow::Context as _;

/// Converts a TOML file represented as a string to `S`
pub fn read_toml<S>(toml_string: &str) -> anyhow::Result<S>
where
    for<'de> S: serde::de::Deserialize<'de>,
{
    let new_struct: S = toml::from_str(toml_string)?;
    Ok(new_struct)
}

/// Reads the file at `path` and parses it as TOML.
pub fn read_toml_file<S>(path: &Path) -> anyhow::Result<S>
where
    for<'de> S: serde::de::Deserialize<'de>,
{
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    read_toml(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Config {
        name: String,
    }

    #[test]
    fn read_toml_from_str() {
        let config: Config = read_toml("name = \"forest\"\n").unwrap();
        assert_eq!(config.name, "forest");
    }

    #[test]
    fn read_toml_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_toml_file::<Config>(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
