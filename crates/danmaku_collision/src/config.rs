//! Configuration system
//!
//! Stage scripts ship a collision config next to their other data files;
//! it is loaded once at stage start and turned into the immutable
//! [`CollisionMatrix`](crate::CollisionMatrix) and grid tuning the
//! detector runs with. TOML and RON are both accepted, picked by file
//! extension.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::group::{CollisionGroup, CollisionMatrix, STANDARD_RULES};
use crate::spatial::GridConfig;

/// Configuration trait
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Collision engine configuration
///
/// `rules` lists enabled group pairs one direction each; the matrix
/// mirrors them. Omitted fields fall back to the standard rule table and
/// default grid tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Spatial grid tuning
    pub grid: GridConfig,

    /// Enabled group pairs
    pub rules: Vec<(CollisionGroup, CollisionGroup)>,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            rules: STANDARD_RULES.to_vec(),
        }
    }
}

impl Config for CollisionConfig {}

impl CollisionConfig {
    /// Build the compatibility matrix from the rule list
    pub fn matrix(&self) -> CollisionMatrix {
        CollisionMatrix::from_rules(&self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_standard_matrix() {
        let config = CollisionConfig::default();
        assert_eq!(config.matrix(), CollisionMatrix::standard());
    }

    #[test]
    fn toml_round_trip_preserves_rules() {
        let config = CollisionConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: CollisionConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.rules, config.rules);
        assert_eq!(back.matrix(), config.matrix());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let text = r#"
            [grid]
            cell_size = 16.0
        "#;
        let config: CollisionConfig = toml::from_str(text).unwrap();
        assert_eq!(config.grid.cell_size, 16.0);
        assert_eq!(config.matrix(), CollisionMatrix::standard());
    }

    #[test]
    fn custom_rules_override_the_table() {
        let text = r#"
            rules = [["EnemyShot", "Player"]]
        "#;
        let config: CollisionConfig = toml::from_str(text).unwrap();
        let matrix = config.matrix();
        assert!(matrix.can_collide(CollisionGroup::EnemyShot, CollisionGroup::Player));
        assert!(!matrix.can_collide(CollisionGroup::Item, CollisionGroup::Player));
    }

    #[test]
    fn ron_parses_too() {
        let text = r#"(
            grid: (cell_size: 24.0, max_cells_per_entry: 32),
            rules: [(EnemyShot, PlayerGraze)],
        )"#;
        let config: CollisionConfig = ron::from_str(text).unwrap();
        assert_eq!(config.grid.max_cells_per_entry, 32);
        assert!(config
            .matrix()
            .can_collide(CollisionGroup::PlayerGraze, CollisionGroup::EnemyShot));
    }
}
