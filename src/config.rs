use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Run parameters for a simulation, exportable to and importable from JSON.
///
/// Only parameters are persisted, never bath contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Side length of the square bath
    pub bath_width: usize,
    /// Radius of the release circle (also the saturation threshold)
    pub r_start: u32,
    /// Radius beyond which a walker is discarded
    pub r_escape: u32,
    /// Seed for the random sequence
    pub seed: u32,
    /// Stop after this many attached ions (0 = run until saturated)
    pub max_ions: usize,
    /// Ions crystallized per batch
    pub batch_size: u32,
    /// Print a snapshot every this many batches (0 = final snapshot only)
    pub snapshot_every: usize,
}

impl SimConfig {
    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        fs::write(path, json).map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Default per-user config location, if the platform exposes one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("crystal-growth").join("config.json"))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            version: 1,
            bath_width: 61,
            r_start: 20,
            r_escape: 28,
            seed: 1,
            max_ions: 0,
            batch_size: 25,
            snapshot_every: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CrystalModel;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = SimConfig {
            version: 1,
            bath_width: 101,
            r_start: 30,
            r_escape: 45,
            seed: 1234,
            max_ions: 500,
            batch_size: 10,
            snapshot_every: 4,
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: SimConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.version, config.version);
        assert_eq!(parsed.bath_width, config.bath_width);
        assert_eq!(parsed.r_start, config.r_start);
        assert_eq!(parsed.r_escape, config.r_escape);
        assert_eq!(parsed.seed, config.seed);
        assert_eq!(parsed.max_ions, config.max_ions);
        assert_eq!(parsed.batch_size, config.batch_size);
        assert_eq!(parsed.snapshot_every, config.snapshot_every);
    }

    #[test]
    fn test_config_file_save_and_load() {
        let config = SimConfig::default();

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        config.save_to_file(&path).unwrap();
        let loaded = SimConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded.version, config.version);
        assert_eq!(loaded.bath_width, config.bath_width);
        assert_eq!(loaded.seed, config.seed);
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not valid json").unwrap();

        let result = SimConfig::load_from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = SimConfig::load_from_file(Path::new("/nonexistent/path/config.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_builds_an_engine() {
        let config = SimConfig::default();
        assert!(CrystalModel::new(config.bath_width, config.r_start, config.r_escape).is_ok());
    }
}
