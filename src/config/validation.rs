//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, idle >= read, bind host is an IP)
//! - Check the identify path is a literal route that does not shadow `/`
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::ServerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("timeouts.idle_secs ({idle_secs}) must not be shorter than timeouts.read_secs ({read_secs})")]
    IdleShorterThanRead { idle_secs: u64, read_secs: u64 },
    #[error("listener.bind_host {0:?} is not an IP address")]
    InvalidBindHost(String),
    #[error("identify.path {0:?} must be a literal path other than '/'")]
    InvalidIdentifyPath(String),
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let timeouts = &config.timeouts;
    for (name, secs) in [
        ("read_secs", timeouts.read_secs),
        ("write_secs", timeouts.write_secs),
        ("idle_secs", timeouts.idle_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }
    if timeouts.idle_secs < timeouts.read_secs {
        errors.push(ValidationError::IdleShorterThanRead {
            idle_secs: timeouts.idle_secs,
            read_secs: timeouts.read_secs,
        });
    }

    if config.listener.bind_address().is_err() {
        errors.push(ValidationError::InvalidBindHost(
            config.listener.bind_host.clone(),
        ));
    }

    let path = &config.identify.path;
    let literal = path.starts_with('/') && path != "/" && !path.contains(['{', '}', ':', '*']);
    if config.identify.enabled && !literal {
        errors.push(ValidationError::InvalidIdentifyPath(path.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
