use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use chessmate::placement::PlacementMode;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    // Paint the board with background colors. Otherwise plain text is printed.
    pub use_colors: bool,
    // Let the engine answer automatically after each correct puzzle move.
    pub auto_play_replies: bool,
    // Mark attacked squares after each placement.
    pub show_threats: bool,
    pub default_placement_mode: PlacementMode,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            use_colors: true,
            auto_play_replies: true,
            show_threats: false,
            default_placement_mode: PlacementMode::EightQueens,
        }
    }
}

pub fn read_config_file(path: &Path) -> anyhow::Result<ConsoleConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'.", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<ConsoleConfig> {
    serde_yaml::from_str(contents).context("Failed to parse config file.")
}


#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = parse_config(indoc! {"
            show_threats: true
            default_placement_mode: 16-kings
        "})
        .unwrap();
        assert_eq!(
            config,
            ConsoleConfig {
                show_threats: true,
                default_placement_mode: PlacementMode::SixteenKings,
                ..ConsoleConfig::default()
            }
        );
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(parse_config("default_placement_mode: 9-queens").is_err());
    }
}
