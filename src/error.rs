use std::fmt;

/// Errors raised while locating, parsing or validating a [`GameConfig`].
///
/// [`GameConfig`]: crate::config::GameConfig
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    Io(std::io::Error),

    /// Config file is not valid JSON for the expected shape
    Parse(serde_json::Error),

    /// Values parsed fine but make no sense together
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Top-level error for starting and running the game.
///
/// Game over is not an error; it is a normal terminal state of the scene.
#[derive(Debug)]
pub enum GameError {
    Config(ConfigError),

    /// A named asset could not be resolved or loaded
    Asset { key: String, reason: String },

    /// Failure reported by the windowing/audio platform
    Platform(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Config(e) => write!(f, "{}", e),
            GameError::Asset { key, reason } => {
                write!(f, "Failed to load asset '{}': {}", key, reason)
            }
            GameError::Platform(msg) => write!(f, "Platform error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Config(err)
    }
}

// SDL reports failures as plain strings
impl From<String> for GameError {
    fn from(msg: String) -> Self {
        GameError::Platform(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_names_key() {
        let err = GameError::Asset {
            key: "frog".to_string(),
            reason: "file not found".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to load asset 'frog': file not found");
    }

    #[test]
    fn test_config_error_wraps_into_game_error() {
        let err: GameError = ConfigError::Invalid("pool_size must be > 0".to_string()).into();
        assert!(matches!(err, GameError::Config(ConfigError::Invalid(_))));
        assert_eq!(err.to_string(), "Invalid config: pool_size must be > 0");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = parse_err.into();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
