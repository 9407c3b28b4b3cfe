//! Configuration loading from TOML files

mod simulation;

pub use simulation::SimulationConfig;

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Failure to read or parse a config file. Range checks happen afterwards
/// and surface as `SimError::InvalidConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse simulation TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    parse_toml(&fs::read_to_string(path)?)
}

/// Parse a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
        #[serde(default)]
        count: u32,
    }

    #[test]
    fn test_parse_toml() {
        let sample: Sample = parse_toml("name = \"dummy\"").unwrap();
        assert_eq!(sample.name, "dummy");
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn test_parse_error() {
        let result: Result<Sample, _> = parse_toml("name = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result: Result<Sample, _> = load_toml(Path::new("/nonexistent/sim.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
