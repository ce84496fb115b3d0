//! Solver settings read from a TOML file.
//!
//! Every field is optional. The command line builds a second
//! [`SolverConfig`] from its flags and [`SolverConfig::merge`]s it on top, so
//! flags win over the file and the file wins over the defaults.

use crate::board::Coord;
use crate::search::{Algorithm, HillClimbOptions, SearchLimits};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub algorithm: Option<Algorithm>,
    /// Cells that must end up covered. Without targets the goal is to fill
    /// every cell.
    pub targets: Option<Vec<Coord>>,
    pub max_expansions: Option<u64>,
    pub max_visited: Option<usize>,
    pub time_budget_ms: Option<u64>,
    pub prune: Option<bool>,
    pub seed: Option<u64>,
    pub restarts: Option<u32>,
    pub walk_length: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config file at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl SolverConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fields set in `overrides` replace the ones in `self`.
    pub fn merge(self, overrides: SolverConfig) -> SolverConfig {
        SolverConfig {
            algorithm: overrides.algorithm.or(self.algorithm),
            targets: overrides.targets.or(self.targets),
            max_expansions: overrides.max_expansions.or(self.max_expansions),
            max_visited: overrides.max_visited.or(self.max_visited),
            time_budget_ms: overrides.time_budget_ms.or(self.time_budget_ms),
            prune: overrides.prune.or(self.prune),
            seed: overrides.seed.or(self.seed),
            restarts: overrides.restarts.or(self.restarts),
            walk_length: overrides.walk_length.or(self.walk_length),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or(Algorithm::Bfs)
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
            max_visited: self.max_visited,
            time_budget: self.time_budget_ms.map(Duration::from_millis),
        }
    }

    pub fn hill_climb(&self) -> HillClimbOptions {
        let defaults = HillClimbOptions::default();
        HillClimbOptions {
            seed: self.seed.unwrap_or(defaults.seed),
            restarts: self.restarts.unwrap_or(defaults.restarts),
            walk_length: self.walk_length.unwrap_or(defaults.walk_length),
        }
    }

    pub fn prune(&self) -> bool {
        self.prune.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_file() {
        let config: SolverConfig = toml::from_str(
            r#"
            algorithm = "ucs"
            targets = [{ row = 0, col = 2 }, { row = 4, col = 4 }]
            max_expansions = 1000
            time_budget_ms = 250
            prune = false
            seed = 9
            "#,
        )
        .unwrap();

        assert_eq!(config.algorithm(), Algorithm::Ucs);
        assert_eq!(
            config.targets,
            Some(vec![Coord::new(0, 2), Coord::new(4, 4)])
        );
        assert_eq!(
            config.limits(),
            SearchLimits {
                max_expansions: Some(1000),
                max_visited: None,
                time_budget: Some(Duration::from_millis(250)),
            }
        );
        assert!(!config.prune());
        assert_eq!(config.hill_climb().seed, 9);
        assert_eq!(config.hill_climb().restarts, HillClimbOptions::default().restarts);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config: SolverConfig = toml::from_str("").unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.algorithm(), Algorithm::Bfs);
        assert_eq!(config.limits(), SearchLimits::default());
        assert!(config.prune());
    }

    #[test]
    fn rejects_unknown_algorithms_and_fields() {
        assert!(toml::from_str::<SolverConfig>(r#"algorithm = "a-star""#).is_err());
        assert!(toml::from_str::<SolverConfig>("max_depth = 3").is_err());
    }

    #[test]
    fn overrides_win() {
        let file = SolverConfig {
            algorithm: Some(Algorithm::Dfs),
            seed: Some(1),
            ..SolverConfig::default()
        };
        let flags = SolverConfig {
            seed: Some(2),
            max_visited: Some(10),
            ..SolverConfig::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.algorithm(), Algorithm::Dfs);
        assert_eq!(merged.seed, Some(2));
        assert_eq!(merged.max_visited, Some(10));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SolverConfig::load(Path::new("/nonexistent/solver.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
