use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("engine binary not found at {0}")]
    MissingBinary(PathBuf),
}

/// Where to find the engine. Validated on construction so a bad path
/// fails before any process is launched.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub binary: PathBuf,
}

impl EngineConfig {
    pub fn new(binary: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let binary = binary.into();
        if !binary.is_file() {
            return Err(ConfigError::MissingBinary(binary));
        }
        Ok(Self { binary })
    }
}

/// Configuration for a single match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Thinking time per move.
    pub think_time: Duration,
    /// Pacing delay after each published snapshot, so the match is
    /// watchable in real time.
    pub move_delay: Duration,
    /// Safety net: stop with an unterminated result after this many plies.
    pub max_plies: u32,
    pub white_name: String,
    pub black_name: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            think_time: Duration::from_millis(300),
            move_delay: Duration::from_millis(100),
            max_plies: 512,
            white_name: "white".to_string(),
            black_name: "black".to_string(),
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn missing_binary_fails_fast() {
        let err = EngineConfig::new("/no/such/engine").unwrap_err();
        assert!(matches!(err, ConfigError::MissingBinary(_)));
    }

    #[test]
    fn existing_file_is_accepted() {
        let path = std::env::temp_dir().join("mirror_match_fake_engine");
        std::fs::write(&path, b"").unwrap();
        assert!(EngineConfig::new(&path).is_ok());
        let _ = std::fs::remove_file(&path);
    }
}
