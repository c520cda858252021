//! Launch configuration assembled from an optional TOML file and command-line overrides.
//!
//! The file is split into a `[maze]` table mirroring [`SessionConfig`] and a
//! `[window]` table for presentation settings:
//!
//! ```toml
//! [maze]
//! width = 31
//! height = 21
//! seed = 7
//!
//! [window]
//! vsync = false
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use maze_escape_core::{GridError, SessionConfig};
use serde::Deserialize;
use thiserror::Error;

/// Settings used to launch the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LaunchConfig {
    /// Configuration seeding the game session.
    pub(crate) session: SessionConfig,
    /// Whether presentation should be synchronised with the display refresh rate.
    pub(crate) vsync: bool,
}

/// Command-line values that take precedence over the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    /// Path to the TOML configuration file, if any.
    pub(crate) path: Option<PathBuf>,
    /// Replacement number of maze columns.
    pub(crate) width: Option<u32>,
    /// Replacement number of maze rows.
    pub(crate) height: Option<u32>,
    /// Replacement generator seed.
    pub(crate) seed: Option<u64>,
    /// Replacement vsync preference.
    pub(crate) vsync: Option<bool>,
}

/// Errors raised while assembling the launch configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}", .path.display())]
    Read {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid TOML or has unexpected fields.
    #[error("failed to parse configuration file {}", .path.display())]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
    /// The resulting maze dimensions cannot be carved.
    #[error(transparent)]
    Invalid(#[from] GridError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    maze: SessionConfig,
    window: WindowSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WindowSection {
    vsync: bool,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self { vsync: true }
    }
}

/// Resolves the launch configuration, applying overrides on top of the file contents.
pub(crate) fn resolve(overrides: &Overrides) -> Result<LaunchConfig, ConfigError> {
    let file = match &overrides.path {
        Some(path) => load(path)?,
        None => ConfigFile::default(),
    };

    let mut session = file.maze;
    if let Some(width) = overrides.width {
        session.width = width;
    }
    if let Some(height) = overrides.height {
        session.height = height;
    }
    if let Some(seed) = overrides.seed {
        session.seed = seed;
    }
    session.validate()?;

    Ok(LaunchConfig {
        session,
        vsync: overrides.vsync.unwrap_or(file.window.vsync),
    })
}

fn load(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse(&text, path)
}

fn parse(text: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::DEFAULT_SEED;

    fn sample_path() -> PathBuf {
        PathBuf::from("maze.toml")
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let launch = resolve(&Overrides::default()).expect("defaults are valid");

        assert_eq!(launch.session, SessionConfig::default());
        assert!(launch.vsync);
    }

    #[test]
    fn file_sections_are_optional() {
        let file = parse("[maze]\nwidth = 31\n", &sample_path()).expect("valid toml");

        assert_eq!(file.maze.width, 31);
        assert_eq!(file.maze.height, 15);
        assert_eq!(file.maze.seed, DEFAULT_SEED);
        assert!(file.window.vsync);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = parse("[maze]\nwidth = 31\n\n[audio]\nvolume = 2\n", &sample_path())
            .expect_err("unknown table");

        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("maze.toml"));
    }

    #[test]
    fn misspelled_maze_keys_are_rejected() {
        let error = parse("[maze]\nwidht = 31\n", &sample_path()).expect_err("typo in [maze]");

        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn overrides_take_precedence() {
        let launch = resolve(&Overrides {
            width: Some(11),
            seed: Some(3),
            vsync: Some(false),
            ..Overrides::default()
        })
        .expect("valid overrides");

        assert_eq!(
            launch.session,
            SessionConfig {
                width: 11,
                height: 15,
                seed: 3,
            }
        );
        assert!(!launch.vsync);
    }

    #[test]
    fn even_dimensions_are_rejected() {
        let error = resolve(&Overrides {
            height: Some(14),
            ..Overrides::default()
        })
        .expect_err("even height");

        assert!(matches!(
            error,
            ConfigError::Invalid(GridError::InvalidConfiguration {
                width: 21,
                height: 14
            })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let error = resolve(&Overrides {
            path: Some(PathBuf::from("definitely/not/here.toml")),
            ..Overrides::default()
        })
        .expect_err("missing file");

        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("here.toml"));
    }
}
