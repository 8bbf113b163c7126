//! Command-line flags.
//!
//! Flags override the config file, which overrides built-in defaults.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::config::loader::{read_config, ConfigError};
use crate::config::schema::ServerConfig;
use crate::config::validation::validate_config;
use crate::observability::logging::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "discard-server", version)]
#[command(about = "HTTP sink that drains request bodies and answers 200", long_about = None)]
pub struct Cli {
    /// Log level [default: debug]
    #[arg(long = "log-level", visible_alias = "logLevel", value_enum)]
    pub log_level: Option<LogLevel>,

    /// Port to bind for the listening server [default: 8080]
    #[arg(short = 'p', long = "listening-port", visible_alias = "listeningPort")]
    pub listening_port: Option<u16>,

    /// Interface to bind [default: 0.0.0.0]
    #[arg(long)]
    pub bind_host: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not expose the identify route
    #[arg(long)]
    pub no_ident: bool,
}

impl Cli {
    /// Full usage text, printed alongside flag errors.
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }

    /// Merge flags onto the config file (if any) and validate the result.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(port) = self.listening_port {
            config.listener.port = port;
        }
        if let Some(host) = self.bind_host {
            config.listener.bind_host = host;
        }
        if self.no_ident {
            config.identify.enabled = false;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("discard-server").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_flags() {
        let config = parse(&[]).unwrap().into_config().unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn accepts_both_flag_spellings() {
        let config = parse(&["--logLevel", "warn", "--listeningPort", "9000"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.listener.port, 9000);

        let config = parse(&["--log-level", "fatal", "-p", "1234", "--no-ident"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Fatal);
        assert_eq!(config.listener.port, 1234);
        assert!(!config.identify.enabled);
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = parse(&["--log-level", "verbose"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        assert!(err.use_stderr());
    }

    #[test]
    fn usage_lists_every_flag() {
        let usage = Cli::usage();
        let has_line = |flag: &str| usage.lines().any(|line| line.contains(flag));

        assert!(usage.contains("Usage:"), "{usage}");
        for flag in ["--log-level", "--listening-port", "--bind-host", "--config", "--no-ident"] {
            assert!(has_line(flag), "{flag} missing from:\n{usage}");
        }
        assert!(usage.contains("Log level"), "{usage}");
        assert!(usage.contains("Port to bind"), "{usage}");
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(parse(&["--listening-port", "70000"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"log_level = \"error\"\n[listener]\nport = 7000\nbind_host = \"127.0.0.1\"\n")
            .unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path, "--listening-port", "7001"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.listener.port, 7001);
        assert_eq!(config.listener.bind_host, "127.0.0.1");
    }

    #[test]
    fn invalid_config_file_values_fail_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[timeouts]\nwrite_secs = 0\n").unwrap();
        let path = file.path().to_str().unwrap();

        let err = parse(&["--config", path]).unwrap().into_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("write_secs"));
    }

    #[test]
    fn invalid_bind_host_fails_validation() {
        let err = parse(&["--bind-host", "nowhere"]).unwrap().into_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
