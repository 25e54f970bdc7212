//! Configuration loading.
//!
//! Settings come from a TOML file, then `UCT_*` environment variables, then
//! command-line flags (applied by the caller), each layer overriding the last.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uct_mcts::{SearchConfig, TieBreak};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "uct.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "UCT_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub search: SearchSettings,
    pub tournament: TournamentSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub simulations: usize,
    pub exploration_constant: f64,
    pub tie_break: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentSettings {
    /// Simulation budget of each competing bot.
    pub bots: Vec<usize>,
    /// Games per ordered pair of bots.
    pub games: usize,
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            search: SearchSettings::default(),
            tournament: TournamentSettings::default(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        let defaults = SearchConfig::default();
        Self {
            simulations: defaults.simulations,
            exploration_constant: defaults.exploration_constant,
            tie_break: defaults.tie_break.to_string(),
        }
    }
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            bots: vec![1, 50, 100, 200, 500, 1000],
            games: 10,
            seed: 42,
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, `$UCT_CONFIG` or `uct.toml`, in that order,
    /// then apply environment overrides.
    ///
    /// A missing default file falls back to built-in defaults; a missing
    /// explicitly named file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        let settings = match named {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Self::from_path(&path)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    info!("Loading config from {}", path.display());
                    Self::from_path(path)?
                } else {
                    debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
                    Self::default()
                }
            }
        };

        settings.with_overrides(|key| std::env::var(key).ok())
    }

    /// Read and parse a TOML config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `UCT_SIMULATIONS`, `UCT_EXPLORATION` and `UCT_LOG_LEVEL` as
    /// returned by `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("UCT_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(value) = lookup("UCT_SIMULATIONS") {
            self.search.simulations = value
                .parse()
                .with_context(|| format!("UCT_SIMULATIONS={} is not a count", value))?;
        }
        if let Some(value) = lookup("UCT_EXPLORATION") {
            self.search.exploration_constant = value
                .parse()
                .with_context(|| format!("UCT_EXPLORATION={} is not a number", value))?;
        }
        Ok(self)
    }

    /// Engine configuration described by the `[search]` section.
    pub fn search_config(&self) -> Result<SearchConfig> {
        let tie_break: TieBreak = self.search.tie_break.parse()?;
        let config = SearchConfig::with_simulations(self.search.simulations)
            .exploration_constant(self.search.exploration_constant)
            .tie_break(tie_break);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.search_config()?;
        if self.tournament.bots.len() < 2 {
            bail!("tournament needs at least two bots");
        }
        if self.tournament.bots.contains(&0) {
            bail!("tournament bots need a positive simulation budget");
        }
        let mut budgets = self.tournament.bots.clone();
        budgets.sort_unstable();
        budgets.dedup();
        if budgets.len() != self.tournament.bots.len() {
            bail!("tournament bots must have distinct simulation budgets");
        }
        if self.tournament.games == 0 {
            bail!("tournament.games must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.search.simulations, 1000);
        assert_eq!(settings.search.tie_break, "first-created");
        assert_eq!(settings.search_config().unwrap(), SearchConfig::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let settings = Settings::from_toml(
            r#"
            log_level = "debug"

            [search]
            simulations = 250
            tie_break = "random"

            [tournament]
            bots = [10, 100]
            "#,
        )
        .unwrap();

        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.search.simulations, 250);
        assert_eq!(
            settings.search.exploration_constant,
            std::f64::consts::SQRT_2
        );
        assert_eq!(settings.tournament.bots, vec![10, 100]);
        assert_eq!(settings.tournament.games, 10);

        let config = settings.search_config().unwrap();
        assert_eq!(config.tie_break, TieBreak::Random);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(Settings::from_toml("[search]\nsimulations = \"many\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("UCT_SIMULATIONS", "64"),
            ("UCT_EXPLORATION", "0.5"),
            ("UCT_LOG_LEVEL", "trace"),
        ]
        .into_iter()
        .collect();

        let settings = Settings::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.search.simulations, 64);
        assert_eq!(settings.search.exploration_constant, 0.5);
        assert_eq!(settings.log_level, "trace");
    }

    #[test]
    fn test_bad_env_override() {
        let result = Settings::default().with_overrides(|key| {
            (key == "UCT_SIMULATIONS").then(|| "lots".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_search_section() {
        let mut settings = Settings::default();
        settings.search.tie_break = "coin-flip".to_string();
        assert!(settings.search_config().is_err());

        let mut settings = Settings::default();
        settings.search.simulations = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_tournament_section() {
        let mut settings = Settings::default();
        settings.tournament.bots = vec![100];
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.tournament.games = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_duplicate_tournament_budgets() {
        let mut settings = Settings::default();
        settings.tournament.bots = vec![5, 50, 5];
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("distinct"));

        settings.tournament.bots = vec![5, 50];
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/uct.toml")));
        assert!(result.is_err());
    }
}
