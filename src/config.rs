use std::path::Path;

use crate::ai::{AlphaBeta, AlphaBetaAgent, HeuristicWeights, Score, WIN_SCORE};
use crate::error::ConfigError;
use crate::game::{Geometry, Player, MAX_DIMENSION};

/// Deepest search the configuration accepts.
pub const MAX_DEPTH: u32 = 12;

/// Search engine settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched per AI move.
    pub depth: u32,
    /// Alpha-beta cutoffs; `false` runs plain minimax.
    pub pruning: bool,
    /// Seed for the tie-break RNG. Unset means seeded from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 5,
            pruning: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side played by the human. X moves first.
    pub human: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { human: Player::X }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: Geometry,
    pub search: SearchConfig,
    pub heuristic: HeuristicWeights,
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!(
                "config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DIMENSION).contains(&self.board.rows) {
            return Err(ConfigError::Validation(format!(
                "board.rows must be in [1, {MAX_DIMENSION}]"
            )));
        }
        if !(1..=MAX_DIMENSION).contains(&self.board.cols) {
            return Err(ConfigError::Validation(format!(
                "board.cols must be in [1, {MAX_DIMENSION}]"
            )));
        }
        if !(1..=MAX_DEPTH).contains(&self.search.depth) {
            return Err(ConfigError::Validation(format!(
                "search.depth must be in [1, {MAX_DEPTH}]"
            )));
        }

        // Evaluations of unfinished positions must stay below a real win,
        // and no evaluation may leave the score range.
        let quiet = self.heuristic.max_evaluation(self.board, false);
        if quiet >= i64::from(WIN_SCORE) {
            return Err(ConfigError::Validation(format!(
                "heuristic weights reach {quiet} on a {}x{} board, must stay below {WIN_SCORE}",
                self.board.rows, self.board.cols
            )));
        }
        let loud = self.heuristic.max_evaluation(self.board, true);
        if loud > i64::from(Score::MAX) {
            return Err(ConfigError::Validation(format!(
                "heuristic weights reach {loud} on a {}x{} board, beyond the score range",
                self.board.rows, self.board.cols
            )));
        }

        Ok(())
    }

    /// Build the AI opponent described by this configuration.
    pub fn agent(&self) -> AlphaBetaAgent {
        let engine = AlphaBeta::with_weights(self.heuristic, self.search.seed)
            .with_pruning(self.search.pruning);
        AlphaBetaAgent::new(engine, self.search.depth)
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Agent;
    use crate::game::GameState;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.board, Geometry::new(6, 7));
        assert_eq!(config.search.depth, 5);
        assert_eq!(config.game.human, Player::X);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[search]
depth = 3
seed = 9
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.depth, 3);
        assert_eq!(config.search.seed, Some(9));
        // Other fields should be defaults
        assert!(config.search.pruning);
        assert_eq!(config.heuristic, HeuristicWeights::default());
        assert_eq!(config.board.cols, 7);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_human_side_parses() {
        let config: AppConfig = toml::from_str("[game]\nhuman = \"O\"\n").unwrap();
        assert_eq!(config.game.human, Player::O);
        assert!(toml::from_str::<AppConfig>("[game]\nhuman = \"Z\"\n").is_err());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.search.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_deep_search() {
        let mut config = AppConfig::default();
        config.search.depth = MAX_DEPTH + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_geometry() {
        let mut config = AppConfig::default();
        config.board.rows = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.board.cols = MAX_DIMENSION + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_overflowing_weights() {
        let config: AppConfig = toml::from_str("[heuristic]\nown_three = 2000000000\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config: AppConfig = toml::from_str("[heuristic]\nown_four = 2000000000\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_keeps_heuristic_below_win_score() {
        // 69 windows * (14_000 + 70) + 30 is just under 1_000_000 on 6x7.
        let mut config = AppConfig::default();
        config.heuristic.own_three = 14_000;
        config.validate().expect("bounded weights should be valid");

        config.heuristic.own_three = 15_000;
        assert!(config.validate().is_err());

        // Same weights pass on a board with fewer windows.
        config.board = Geometry::new(4, 4);
        config.validate().expect("4x4 has only 10 windows");
    }

    #[test]
    fn test_default_weights_valid_on_largest_board() {
        let mut config = AppConfig::default();
        config.board = Geometry::new(MAX_DIMENSION, MAX_DIMENSION);
        config.validate().expect("defaults should fit every supported board");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
rows = 5
cols = 9

[heuristic]
opponent_three = -90
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.board, Geometry::new(5, 9));
        assert_eq!(config.heuristic.opponent_three, -90);
        // Others are defaults
        assert_eq!(config.heuristic.own_three, 50);
        assert_eq!(config.search.depth, 5);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[search]\ndepth = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "[search\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_agent_uses_configured_depth() {
        let mut config = AppConfig::default();
        config.search.depth = 2;
        config.search.seed = Some(5);
        let mut agent = config.agent();
        assert_eq!(agent.depth(), 2);
        assert_eq!(agent.select_action(&GameState::initial()), Some(3));
    }
}
