//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML file without validating it.
///
/// Validation waits until command-line flags have been applied on top, see
/// [`Cli::into_config`](crate::config::Cli::into_config).
pub fn read_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::LogLevel;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_file() {
        let file = write_temp(
            r#"
            log_level = "error"

            [listener]
            port = 9090

            [identify]
            enabled = false
            "#,
        );

        let config = read_config(file.path()).unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.listener.port, 9090);
        assert!(!config.identify.enabled);
    }

    #[test]
    fn unknown_log_level_is_a_parse_error() {
        let file = write_temp(r#"log_level = "verbose""#);
        assert!(matches!(read_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn reading_does_not_validate() {
        let file = write_temp("[timeouts]\nwrite_secs = 0\n");
        let config = read_config(file.path()).unwrap();
        assert_eq!(config.timeouts.write_secs, 0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_config(Path::new("/nonexistent/discard-server.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
